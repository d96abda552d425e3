use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use datacheck_core::RuleInvocation;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub dataset: Dataset,
    #[serde(default, rename = "check", alias = "checks")]
    pub checks: Vec<Check>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    pub path: Option<String>,
    pub reference: Option<String>,
    pub delimiter: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// One `[[check]]` entry: the rule name plus its parameters, left untyped
/// until the engine compiles them.
#[derive(Debug, Deserialize)]
pub struct Check {
    pub rule: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Check {
    pub fn to_invocation(&self) -> RuleInvocation {
        RuleInvocation::new(self.rule.clone(), Value::Object(self.params.clone()))
    }
}

impl Dataset {
    pub fn delimiter_byte(&self) -> Result<Option<u8>, CliError> {
        match self.delimiter.as_deref() {
            None => Ok(None),
            Some(d) if d.len() == 1 && d.is_ascii() => Ok(Some(d.as_bytes()[0])),
            Some(d) => Err(CliError::InvalidDelimiter {
                value: d.to_string(),
            }),
        }
    }
}

impl Config {
    pub fn invocations(&self) -> Vec<RuleInvocation> {
        self.checks.iter().map(Check::to_invocation).collect()
    }
}

/// Resolve a path from the config document against the document's directory.
pub fn resolve_relative(config_path: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    match config_path.parent() {
        Some(parent) if path.is_relative() => parent.join(path),
        _ => path.to_path_buf(),
    }
}

/// Read a TOML document, or JSON when the file ends in `.json`.
pub fn parse_config(config_path: &Path) -> Result<Config> {
    let config_str = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let is_json = config_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        serde_json::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    };
    Ok(config)
}
