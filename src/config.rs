use std::{path::PathBuf, str::FromStr};

use shuttle_runtime::SecretStore;
use url::Url;

use crate::service::DigestStyle;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing config key: {0}")]
    MissingKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub judge: JudgeConfig,
    pub registry: RegistryConfig,
    pub digest: DigestConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig(pub String);

#[derive(Clone, Debug)]
pub struct JudgeConfig {
    pub graphql_url: Url,
    /// Problem slugs are joined onto this, so it keeps its trailing slash.
    pub problem_base_url: Url,
    pub recent_limit: usize,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct RegistryConfig {
    pub file_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct DigestConfig {
    pub style: DigestStyle,
}

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub queue_capacity: usize,
    pub worker_concurrency: usize,
}

impl AppConfig {
    #[cfg(test)]
    pub fn new_test_config() -> Self {
        Self {
            telegram: TelegramConfig("test_token".to_string()),
            judge: JudgeConfig {
                graphql_url: Url::parse("http://127.0.0.1:9/graphql").expect("valid test url"),
                problem_base_url: Url::parse("https://leetcode.com/problems/").expect("valid test url"),
                recent_limit: 100,
                request_timeout_secs: 1,
            },
            registry: RegistryConfig {
                file_path: std::env::temp_dir().join("leetstash_test_user_data.json"),
            },
            digest: DigestConfig {
                style: DigestStyle::Panel,
            },
            runtime: RuntimeConfig {
                queue_capacity: 8,
                worker_concurrency: 1,
            },
        }
    }
}

fn get_required(secret_store: &SecretStore, key: &str) -> Result<String, ConfigError> {
    secret_store
        .get(key)
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn get_parsed_or<T: FromStr>(secret_store: &SecretStore, key: &str, default: T) -> Result<T, ConfigError> {
    match secret_store.get(key) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn get_url_or(secret_store: &SecretStore, key: &str, default: &str) -> Result<Url, ConfigError> {
    let value = secret_store.get(key).unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

pub fn build_config(secret_store: &SecretStore) -> Result<AppConfig, ConfigError> {
    info!("Building AppConfig...");

    let mut problem_base_url = get_url_or(secret_store, "JUDGE_PROBLEM_BASE_URL", "https://leetcode.com/problems/")?;
    if !problem_base_url.path().ends_with('/') {
        let path = format!("{}/", problem_base_url.path());
        problem_base_url.set_path(&path);
    }

    let config = AppConfig {
        telegram: TelegramConfig(get_required(secret_store, "TELEGRAM_BOT_TOKEN")?),
        judge: JudgeConfig {
            graphql_url: get_url_or(secret_store, "JUDGE_GRAPHQL_URL", "https://leetcode.com/graphql")?,
            problem_base_url,
            recent_limit: get_parsed_or(secret_store, "JUDGE_RECENT_LIMIT", 100)?,
            request_timeout_secs: get_parsed_or(secret_store, "JUDGE_REQUEST_TIMEOUT_SECS", 30)?,
        },
        registry: RegistryConfig {
            file_path: PathBuf::from(
                secret_store
                    .get("REGISTRY_FILE_PATH")
                    .unwrap_or_else(|| "user_data.json".to_string()),
            ),
        },
        digest: DigestConfig {
            style: get_parsed_or(secret_store, "DIGEST_STYLE", DigestStyle::Panel)?,
        },
        runtime: RuntimeConfig {
            queue_capacity: get_parsed_or(secret_store, "RUNTIME_QUEUE_CAPACITY", 32)?,
            worker_concurrency: get_parsed_or(secret_store, "RUNTIME_WORKER_CONCURRENCY", 2)?,
        },
    };

    info!("AppConfig built");

    Ok(config)
}
