//! LMS 会话 - 基础设施层
//!
//! 持有唯一的 cookie jar 和 HTTP 客户端，只暴露"带认证发请求"的能力

use crate::config::Config;
use crate::error::{AppResult, BatchError, ConfigError};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Django 下发的 CSRF cookie 名
pub const CSRF_COOKIE: &str = "csrftoken";

/// LMS 会话
///
/// 职责：
/// - 在同一批次内的所有请求之间保留 cookie
/// - 每次写请求前从 jar 中读取最新的 CSRF token
/// - 写请求不跟随重定向，3xx 原样交给调用方
/// - 不认识课程和报表
/// - 不保存密码
pub struct LmsSession {
    client: Client,
    post_client: Client,
    jar: Arc<Jar>,
    base: Url,
    base_url: String,
}

impl LmsSession {
    /// 创建尚未登录的会话
    ///
    /// # 参数
    /// - `lms_base_url`: LMS 地址，必须是 http/https 绝对地址
    /// - `config`: 配置（超时、User-Agent）
    pub fn open(lms_base_url: &str, config: &Config) -> AppResult<Self> {
        let base_url = normalize_base_url(lms_base_url)?;
        let base = Url::parse(&base_url)
            .map_err(|e| BatchError::invalid_lms_url(lms_base_url, e.to_string()))?;

        let jar = Arc::new(Jar::default());
        let build = |redirect: Policy| {
            Client::builder()
                .cookie_provider(jar.clone())
                .redirect(redirect)
                .timeout(config.request_timeout())
                .user_agent(config.user_agent.as_str())
                .build()
                .map_err(ConfigError::HttpClientBuild)
        };
        let client = build(Policy::default())?;
        // 写请求被重定向到登录页时必须能看到 3xx
        let post_client = build(Policy::none())?;

        debug!("创建 LMS 会话: {}", base_url);

        Ok(Self {
            client,
            post_client,
            jar,
            base,
            base_url,
        })
    }

    /// 去除末尾斜杠后的 LMS 地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 登录页地址，同时用作 Referer
    pub fn login_page_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    /// jar 中当前的 CSRF token
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        let cookies = header.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == CSRF_COOKIE)
            .map(|(_, value)| value.to_string())
    }

    /// GET 请求
    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.client.get(url).send().await
    }

    /// 表单 POST 请求，自动附带 CSRF token 和 Referer，不跟随重定向
    pub async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> reqwest::Result<Response> {
        let mut request = self
            .post_client
            .post(url)
            .header(reqwest::header::REFERER, self.login_page_url())
            .form(form);

        if let Some(token) = self.csrf_token() {
            request = request.header("X-CSRFToken", token);
        }

        request.send().await
    }
}

impl fmt::Debug for LmsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LmsSession")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// 校验并规范化 LMS 地址（去除末尾斜杠）
pub fn normalize_base_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let parsed =
        Url::parse(trimmed).map_err(|e| BatchError::invalid_lms_url(raw, e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BatchError::invalid_lms_url(
            raw,
            format!("不支持的协议 '{}'", parsed.scheme()),
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(BatchError::invalid_lms_url(raw, "缺少主机名"));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
