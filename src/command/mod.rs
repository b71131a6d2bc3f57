//! Slash-command text parsing.
//!
//! A command line such as `deploy env=prod,version=3` is split into an
//! action (`deploy`) and a remainder value (`env=prod,version=3`). The
//! remainder can then be parsed into an ordered [`ParameterSet`].

pub mod parameters;

pub use parameters::{
    MalformedParameter, ParameterPolicy, ParameterSet, normalized_parameter_string,
    try_parse_parameters, try_parse_parameters_with,
};

/// An action name paired with the unparsed remainder of the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub action: String,
    pub value: String,
}

impl ParsedCommand {
    /// Returns `true` when no action could be read from the input.
    pub fn is_empty(&self) -> bool {
        self.action.is_empty() && self.value.is_empty()
    }

    /// Parse the remainder value into parameters using `policy`.
    pub fn parameters(&self, policy: ParameterPolicy) -> Result<ParameterSet, MalformedParameter> {
        try_parse_parameters_with(&self.value, policy)
    }
}

/// Split a raw command into its action and remainder value.
///
/// The action ends at the first `=` or space character. When the action
/// is followed by spaces and then `=`, the `=` belongs to the
/// delimiter, so `a = b` parses the same as `a=b`. Both halves are
/// trimmed. Input without any delimiter becomes the action with an empty
/// value. Never fails; empty input yields an empty command.
pub fn parse_action_with_value(raw: &str) -> ParsedCommand {
    let text = raw.trim();

    let Some(split) = text.find(['=', ' ']) else {
        return ParsedCommand {
            action: text.to_string(),
            value: String::new(),
        };
    };

    let action = text[..split].trim_end();
    let mut rest = text[split..].trim_start();
    if let Some(stripped) = rest.strip_prefix('=') {
        rest = stripped;
    }

    ParsedCommand {
        action: action.to_string(),
        value: rest.trim().to_string(),
    }
}
