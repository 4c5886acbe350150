//! # Compiler Configuration
//!
//! Keys the compiler writes into every entry, and an optional owner-name
//! suffix to strip.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. [`CompilerConfig::default`]
//! 2. A TOML file ([`CompilerConfig::from_toml_file`])
//! 3. Environment variables ([`CompilerConfig::apply_env`])
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `WAYMARK_OWNER_KEY` | `owner_key` |
//! | `WAYMARK_HANDLER_KEY` | `handler_key` |
//! | `WAYMARK_VERB_CONSTRAINT_KEY` | `verb_constraint_key` |
//! | `WAYMARK_OWNER_SUFFIX` | `owner_suffix` (empty string clears it) |
//!
//! ## Example
//!
//! ```toml
//! owner_key = "controller"
//! handler_key = "action"
//! verb_constraint_key = "httpMethod"
//! owner_suffix = "Controller"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Settings for [`RouteTableCompiler`](crate::compiler::RouteTableCompiler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Default key holding the owner name (default `owner`)
    pub owner_key: String,
    /// Default key holding the handler name (default `handler`)
    pub handler_key: String,
    /// Constraint key holding the verb constraint (default `verb`)
    pub verb_constraint_key: String,
    /// Suffix stripped from owner names in route names and defaults
    pub owner_suffix: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            owner_key: "owner".to_string(),
            handler_key: "handler".to_string(),
            verb_constraint_key: "verb".to_string(),
            owner_suffix: None,
        }
    }
}

impl CompilerConfig {
    /// Load from a TOML file. Missing fields keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from `WAYMARK_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| env::var(name).ok());
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("WAYMARK_OWNER_KEY") {
            self.owner_key = v;
        }
        if let Some(v) = lookup("WAYMARK_HANDLER_KEY") {
            self.handler_key = v;
        }
        if let Some(v) = lookup("WAYMARK_VERB_CONSTRAINT_KEY") {
            self.verb_constraint_key = v;
        }
        if let Some(v) = lookup("WAYMARK_OWNER_SUFFIX") {
            self.owner_suffix = if v.is_empty() { None } else { Some(v) };
        }
    }

    /// Owner name as written into route names and defaults.
    #[must_use]
    pub fn display_owner<'a>(&self, owner: &'a str) -> &'a str {
        match self.owner_suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() && owner.len() > suffix.len() => {
                owner.strip_suffix(suffix).unwrap_or(owner)
            }
            _ => owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.owner_key, "owner");
        assert_eq!(config.handler_key, "handler");
        assert_eq!(config.verb_constraint_key, "verb");
        assert_eq!(config.owner_suffix, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CompilerConfig::from_toml_str("owner_suffix = \"Controller\"\n").unwrap();
        assert_eq!(config.owner_key, "owner");
        assert_eq!(config.owner_suffix.as_deref(), Some("Controller"));
    }

    #[test]
    fn test_unknown_toml_field_is_rejected() {
        assert!(CompilerConfig::from_toml_str("bogus = 1\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WAYMARK_OWNER_KEY", "controller"),
            ("WAYMARK_OWNER_SUFFIX", "Controller"),
        ]
        .into_iter()
        .collect();
        let mut config = CompilerConfig::default();
        config.apply_vars(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.owner_key, "controller");
        assert_eq!(config.handler_key, "handler");
        assert_eq!(config.owner_suffix.as_deref(), Some("Controller"));

        config.apply_vars(|name| (name == "WAYMARK_OWNER_SUFFIX").then(String::new));
        assert_eq!(config.owner_suffix, None);
    }

    #[test]
    fn test_display_owner_strips_suffix() {
        let config = CompilerConfig {
            owner_suffix: Some("Controller".into()),
            ..CompilerConfig::default()
        };
        assert_eq!(config.display_owner("TestController"), "Test");
        assert_eq!(config.display_owner("Test"), "Test");
        assert_eq!(config.display_owner("Controller"), "Controller");
    }
}
