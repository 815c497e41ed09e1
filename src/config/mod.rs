use anyhow::Context;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::ProviderKind;
use crate::errors::GenError;

pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderKind,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout_secs: u64,
    pub bind: String,
    pub favorites_path: String,
    pub transcripts_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            model: "gpt-4o-mini".into(),
            max_tokens: 300,
            temperature: 0.8,
            api_key: None,
            api_base: "https://api.openai.com/v1".into(),
            timeout_secs: 30,
            bind: "127.0.0.1:3000".into(),
            favorites_path: crate::favorites::DEFAULT_FILE.into(),
            transcripts_root: ".".into(),
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then `OPENAI_*` variables.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Unparseable numeric values are ignored and the previous value kept.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup("OPENAI_MODEL").filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        if let Some(n) = lookup("OPENAI_MAX_TOKENS").and_then(|v| v.trim().parse().ok()) {
            self.max_tokens = n;
        }
        if let Some(t) = lookup("OPENAI_TEMPERATURE").and_then(|v| v.trim().parse().ok()) {
            self.temperature = t;
        }
        if let Some(base) = lookup("OPENAI_BASE_URL").filter(|b| !b.trim().is_empty()) {
            self.api_base = base;
        }
    }

    /// Returns the usable API key or the `config` error shown to the user.
    pub fn require_api_key(&self) -> Result<&str, GenError> {
        check_api_key(self.api_key.as_deref())
    }
}

pub fn check_api_key(key: Option<&str>) -> Result<&str, GenError> {
    match key.map(str::trim) {
        None | Some("") => Err(GenError::config(
            "OpenAI API key is not configured. Please set OPENAI_API_KEY in .env.local",
        )),
        Some(PLACEHOLDER_API_KEY) => Err(GenError::config(
            "Please replace the placeholder API key in .env.local with your actual OpenAI API key",
        )),
        Some(key) => Ok(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4.1-mini"),
            ("OPENAI_MAX_TOKENS", "512"),
            ("OPENAI_TEMPERATURE", "0.3"),
        ]));
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.model, "gpt-4.1-mini");
        assert_eq!(cfg.max_tokens, 512);
        assert!((cfg.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn bad_numbers_keep_defaults() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[("OPENAI_MAX_TOKENS", "lots"), ("OPENAI_TEMPERATURE", "hot")]));
        assert_eq!(cfg.max_tokens, 300);
        assert!((cfg.temperature - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_or_placeholder_key_is_config_error() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.message.contains("not configured"));

        let cfg = Config { api_key: Some(PLACEHOLDER_API_KEY.into()), ..Config::default() };
        let err = cfg.require_api_key().unwrap_err();
        assert!(err.message.contains("placeholder"));

        let cfg = Config { api_key: Some("sk-real".into()), ..Config::default() };
        assert_eq!(cfg.require_api_key().unwrap(), "sk-real");
    }

    #[test]
    fn toml_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neurosong.toml");
        fs::write(&path, "model = \"gpt-4.1\"\nbind = \"0.0.0.0:8080\"\nprovider = \"mock\"\n").unwrap();
        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.model, "gpt-4.1");
        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.provider, ProviderKind::Mock);
        assert_eq!(cfg.max_tokens, 300);
    }
}
