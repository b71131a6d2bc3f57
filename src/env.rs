//! Lookups for the `HOOKLOG_*` environment overrides.
//!
//! [`Env::process()`] reads the process environment. [`Env::with_vars()`]
//! reads a fixed set of pairs, so hosts and tests can pin the overrides
//! without mutating global state. Blank values count as unset.

use std::collections::HashMap;

/// Source of environment overrides.
#[derive(Clone, Debug)]
pub struct Env {
    vars: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the process environment.
    pub fn process() -> Self {
        Self { vars: None }
    }

    /// Read only from the given pairs.
    pub fn with_vars(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Trimmed value of `name`, or `None` when it is unset or blank.
    pub fn get(&self, name: &str) -> Option<String> {
        let raw = match &self.vars {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }?;
        let value = raw.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Boolean override. `Err` carries a value that is not a recognised
    /// spelling of true or false.
    pub fn flag(&self, name: &str) -> Option<Result<bool, String>> {
        let value = self.get(name)?;
        Some(match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(value),
        })
    }

    /// Comma-separated override with blank items dropped.
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        let value = self.get(name)?;
        Some(
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::process()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn process_env_is_visible() {
        // Cargo sets this for every test binary.
        assert!(Env::process().get("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn blank_values_are_unset() {
        let env = Env::with_vars([("HOOKLOG_LOG_LEVEL", "  "), ("HOOKLOG_RECEIVERS", "")]);
        assert_eq!(env.get("HOOKLOG_LOG_LEVEL"), None);
        assert_eq!(env.list("HOOKLOG_RECEIVERS"), None);
        assert_eq!(env.get("HOOKLOG_LOG_JSON"), None);
    }

    #[test]
    fn values_are_trimmed() {
        let env = Env::with_vars([("HOOKLOG_LOG_LEVEL", " debug\n")]);
        assert_eq!(env.get("HOOKLOG_LOG_LEVEL").as_deref(), Some("debug"));
    }

    #[test]
    fn flag_spellings() {
        let env = Env::with_vars([
            ("HOOKLOG_LOG_JSON", "Yes"),
            ("OFF_FLAG", "off"),
            ("BAD_FLAG", "maybe"),
        ]);
        assert_eq!(env.flag("HOOKLOG_LOG_JSON"), Some(Ok(true)));
        assert_eq!(env.flag("OFF_FLAG"), Some(Ok(false)));
        assert_eq!(env.flag("BAD_FLAG"), Some(Err("maybe".to_string())));
        assert_eq!(env.flag("MISSING"), None);
    }

    #[test]
    fn list_drops_blank_items() {
        let env = Env::with_vars([("HOOKLOG_RECEIVERS", "github, ,slack,")]);
        assert_eq!(
            env.list("HOOKLOG_RECEIVERS"),
            Some(vec!["github".to_string(), "slack".to_string()])
        );
    }
}
