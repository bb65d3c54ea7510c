use serde::Serialize;
use thiserror::Error;

/// 批量级错误
///
/// 出现任意一种都意味着一个任务都不会提交。单个课程的失败不走这里，
/// 而是记录为 `Outcome { success: false, .. }`
#[derive(Debug, Error)]
pub enum BatchError {
    /// 输入中没有任何课程
    #[error("输入校验失败: {0}")]
    Validation(String),

    /// 配置错误（LMS 地址非法等）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// LMS 拒绝登录
    #[error("登录失败: {message}")]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// 登录阶段的网络错误（连接 / TLS / 超时）
    #[error("网络错误 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// LMS 地址不是合法的绝对地址
    #[error("LMS 地址非法 '{url}': {reason}")]
    InvalidLmsUrl { url: String, reason: String },

    /// 不支持的报表类型
    #[error("不支持的报表类型: {name}")]
    UnsupportedReport { name: String },

    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {0}")]
    HttpClientBuild(#[source] reqwest::Error),
}

/// 返回给外部请求层的错误体
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: String,
}

impl BatchError {
    /// 外部请求层应当返回的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            BatchError::Validation(_) | BatchError::Config(_) => 400,
            BatchError::Auth { .. } => 401,
            BatchError::Network { .. } => 502,
        }
    }

    /// 错误类别名
    pub fn kind(&self) -> &'static str {
        match self {
            BatchError::Validation(_) => "validation_error",
            BatchError::Config(_) => "config_error",
            BatchError::Auth { .. } => "auth_error",
            BatchError::Network { .. } => "network_error",
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind(),
            detail: self.to_string(),
        }
    }
}

// ========== 便捷构造函数 ==========

impl BatchError {
    /// 创建登录失败错误
    pub fn auth_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        BatchError::Auth {
            status,
            message: message.into(),
        }
    }

    /// 创建网络错误
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        BatchError::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建 LMS 地址非法错误
    pub fn invalid_lms_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        BatchError::Config(ConfigError::InvalidLmsUrl {
            url: url.into(),
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 批量结果类型
pub type AppResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(BatchError::Validation("empty".into()).http_status(), 400);
        assert_eq!(
            BatchError::invalid_lms_url("lms", "relative URL without a base").http_status(),
            400
        );
        assert_eq!(BatchError::auth_failed(Some(401), "nope").http_status(), 401);
    }

    #[test]
    fn test_error_body() {
        let body = BatchError::auth_failed(Some(400), "Email or password is incorrect.").to_body();
        assert_eq!(body.error, "auth_error");
        assert!(body.detail.contains("Email or password is incorrect."));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "auth_error");
    }
}
