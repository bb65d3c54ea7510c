use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 每个 LMS 请求的超时（毫秒）
    pub request_timeout_ms: u64,
    /// 相邻两个课程提交之间的间隔（毫秒），0 表示不等待
    pub job_delay_ms: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 失败信息中保留的 LMS 响应字符数
    pub response_preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_ms: 30_000,
            job_delay_ms: 0,
            user_agent: concat!("edx-report-submit/", env!("CARGO_PKG_VERSION")).to_string(),
            verbose_logging: false,
            response_preview_chars: 300,
        }
    }
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|name| std::env::var(name).ok())
    }

    /// 默认值 + TOML 文件（可选）+ 环境变量
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
                toml::from_str::<Config>(&content)
                    .with_context(|| format!("无法解析配置文件: {}", path.display()))?
            }
            None => Self::default(),
        };

        Ok(base.with_env(|name| std::env::var(name).ok())?)
    }

    /// 用环境变量覆盖已有值
    pub fn with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            request_timeout_ms: env_or(&lookup, "LMS_REQUEST_TIMEOUT_MS", self.request_timeout_ms)?,
            job_delay_ms: env_or(&lookup, "LMS_JOB_DELAY_MS", self.job_delay_ms)?,
            user_agent: lookup("LMS_USER_AGENT").unwrap_or(self.user_agent),
            verbose_logging: env_or(&lookup, "VERBOSE_LOGGING", self.verbose_logging)?,
            response_preview_chars: env_or(
                &lookup,
                "LMS_RESPONSE_PREVIEW_CHARS",
                self.response_preview_chars,
            )?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn job_delay(&self) -> Option<Duration> {
        (self.job_delay_ms > 0).then(|| Duration::from_millis(self.job_delay_ms))
    }
}

fn env_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var_name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: std::any::type_name::<T>().to_string(),
            }),
        None => Ok(default),
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.job_delay(), None);
        assert_eq!(config.response_preview_chars, 300);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_env(lookup_from(&[
                ("LMS_REQUEST_TIMEOUT_MS", "1500"),
                ("LMS_JOB_DELAY_MS", "250"),
                ("VERBOSE_LOGGING", "true"),
            ]))
            .unwrap();

        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
        assert_eq!(config.job_delay(), Some(Duration::from_millis(250)));
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_bad_env_value() {
        let err = Config::default()
            .with_env(lookup_from(&[("LMS_REQUEST_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "LMS_REQUEST_TIMEOUT_MS"
        ));
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("job_delay_ms = 1000\n").unwrap();
        assert_eq!(config.job_delay_ms, 1000);
        assert_eq!(config.request_timeout_ms, 30_000);
    }
}
