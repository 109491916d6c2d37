use crate::error::InitProcessError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_IP_IN_IP_DEPTH: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// IP-in-IPを何段まで展開するか。0なら外側のIPヘッダーで止まる
    pub max_ip_in_ip_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_ip_in_ip_depth: DEFAULT_MAX_IP_IN_IP_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InitProcessError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, InitProcessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_ip_in_ip_depth = match lookup("DECODER_MAX_IP_IN_IP_DEPTH") {
            Some(value) => value.trim().parse::<usize>().map_err(|e| {
                InitProcessError::EnvVarParseError(format!(
                    "DECODER_MAX_IP_IN_IP_DEPTH={}: {}",
                    value, e
                ))
            })?,
            None => DEFAULT_MAX_IP_IN_IP_DEPTH,
        };

        let level = match lookup("LOG_LEVEL") {
            Some(value) => value.trim().parse::<LevelFilter>().map_err(|e| {
                InitProcessError::EnvVarParseError(format!("LOG_LEVEL={}: {}", value, e))
            })?,
            None => LevelFilter::Info,
        };

        let file = lookup("LOG_FILE").filter(|path| !path.trim().is_empty());

        Ok(Self {
            decoder: DecoderConfig { max_ip_in_ip_depth },
            logging: LoggingConfig { level, file },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.decoder, DecoderConfig::default());
        assert_eq!(config.decoder.max_ip_in_ip_depth, 8);
        assert_eq!(config.logging.level, LevelFilter::Info);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_reads_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DECODER_MAX_IP_IN_IP_DEPTH", "2"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FILE", "decoder.log"),
        ]))
        .unwrap();
        assert_eq!(config.decoder.max_ip_in_ip_depth, 2);
        assert_eq!(config.logging.level, LevelFilter::Debug);
        assert_eq!(config.logging.file.as_deref(), Some("decoder.log"));
    }

    #[test]
    fn test_rejects_invalid_depth() {
        let result = AppConfig::from_lookup(lookup_from(&[("DECODER_MAX_IP_IN_IP_DEPTH", "-1")]));
        assert!(matches!(result, Err(InitProcessError::EnvVarParseError(_))));
    }

    #[test]
    fn test_rejects_invalid_level() {
        let result = AppConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "verbose")]));
        assert!(matches!(result, Err(InitProcessError::EnvVarParseError(_))));
    }

    #[test]
    fn test_empty_log_file_is_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[("LOG_FILE", "  ")])).unwrap();
        assert!(config.logging.file.is_none());
    }
}
