//! `tang-check` configuration.
//!
//! Settings resolve in this order, later layers winning:
//!
//! 1. built-in defaults
//! 2. YAML file (`--config` / `TANG_CHECK_CONFIG`)
//! 3. environment variables
//! 4. command-line flags (applied by the command itself)
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `TANG_CHECK_FORMAT` | Report format: `text` or `json` |
//! | `TANG_CHECK_REQUIRE_SUCCESS` | Fail when `is_success` is not true (`1`/`true`) |

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tang_model::OperationKind;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Report format for `validate`.
    pub format: OutputFormat,

    /// Treat a document whose `is_success` is not `true` as a failure.
    pub require_success: bool,

    /// Run context validation as `request` or `response`. Absent runs plain validation.
    pub context: Option<String>,

    /// Operation name placed in the validation context.
    pub operation: Option<String>,
}

impl CheckConfig {
    /// Parse a YAML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        cfg.context_kind()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    /// Defaults, then the optional file, then the process environment.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        let cfg = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TANG_CHECK_FORMAT") {
            self.format = <OutputFormat as ValueEnum>::from_str(&v, true)
                .map_err(|e| anyhow::anyhow!("TANG_CHECK_FORMAT: {e}"))?;
        }
        if let Some(v) = lookup("TANG_CHECK_REQUIRE_SUCCESS") {
            self.require_success = v == "1" || v.eq_ignore_ascii_case("true");
        }
        Ok(self)
    }

    /// Parsed `context` setting.
    pub fn context_kind(&self) -> anyhow::Result<Option<OperationKind>> {
        self.context
            .as_deref()
            .map(|s| s.parse::<OperationKind>().map_err(anyhow::Error::msg))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = CheckConfig::default();
        assert_eq!(cfg.format, OutputFormat::Text);
        assert!(!cfg.require_success);
        assert_eq!(cfg.context_kind().unwrap(), None);
    }

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "format: json\nrequire_success: true\ncontext: request\noperation: v2TangCheck"
        )
        .unwrap();

        let cfg = CheckConfig::load(file.path()).unwrap();
        assert_eq!(cfg.format, OutputFormat::Json);
        assert!(cfg.require_success);
        assert_eq!(cfg.context_kind().unwrap(), Some(OperationKind::Request));
        assert_eq!(cfg.operation.as_deref(), Some("v2TangCheck"));
    }

    #[test]
    fn test_load_rejects_unknown_keys_and_bad_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "formats: json").unwrap();
        assert!(CheckConfig::load(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "context: sideways").unwrap();
        assert!(CheckConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let cfg = CheckConfig {
            format: OutputFormat::Text,
            require_success: true,
            ..CheckConfig::default()
        };
        let cfg = cfg
            .apply_env(env(&[
                ("TANG_CHECK_FORMAT", "JSON"),
                ("TANG_CHECK_REQUIRE_SUCCESS", "0"),
            ]))
            .unwrap();
        assert_eq!(cfg.format, OutputFormat::Json);
        assert!(!cfg.require_success);
    }

    #[test]
    fn test_env_rejects_unknown_format() {
        let err = CheckConfig::default()
            .apply_env(env(&[("TANG_CHECK_FORMAT", "xml")]))
            .unwrap_err();
        assert!(err.to_string().contains("TANG_CHECK_FORMAT"));
        assert!(err.to_string().contains("xml"));
    }
}
