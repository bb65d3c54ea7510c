/// LMS 登录客户端
///
/// 封装"拿 CSRF token → 提交账号密码"这一登录流程
use crate::clients::response::{is_explicit_failure, lms_message, parse_json};
use crate::config::Config;
use crate::error::{AppResult, BatchError};
use crate::infrastructure::LmsSession;
use crate::models::Credentials;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// 登录接口路径
pub const LOGIN_SESSION_PATH: &str = "/api/user/v1/account/login_session/";

/// LMS 未给出原因时的提示
pub const DEFAULT_AUTH_FAILURE: &str = "invalid credentials or insufficient permissions";

/// LMS 登录客户端
pub struct LmsAuthClient {
    config: Config,
}

impl LmsAuthClient {
    /// 创建新的登录客户端
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 登录 LMS
    ///
    /// 一次登录页请求 + 一次登录请求，失败不重试
    ///
    /// # 返回
    /// 返回已登录的会话；地址非法为 `Config`，LMS 拒绝为 `Auth`，
    /// 连接 / TLS / 超时为 `Network`
    pub async fn authenticate(&self, credentials: &Credentials) -> AppResult<LmsSession> {
        let session = LmsSession::open(&credentials.lms_base_url, &self.config)?;

        // 登录页会下发 csrftoken cookie
        let login_page = session.login_page_url();
        let page = session
            .get(&login_page)
            .await
            .map_err(|e| BatchError::network(&login_page, e))?;
        debug!("登录页响应: {}", page.status());

        if session.csrf_token().is_none() {
            warn!("⚠️ 登录页未下发 CSRF token，继续尝试登录");
        }

        let login_url = format!("{}{}", session.base_url(), LOGIN_SESSION_PATH);
        let response = session
            .post_form(
                &login_url,
                &[
                    ("email", credentials.email.as_str()),
                    ("password", credentials.password.as_str()),
                ],
            )
            .await
            .map_err(|e| BatchError::network(&login_url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BatchError::network(&login_url, e))?;

        check_login_response(status, &body)?;

        info!("✓ 已登录 {}", session.base_url());
        Ok(session)
    }
}

/// 判断登录响应是否成功
///
/// 非 2xx，或 2xx 但响应体带 `"success": false`，都算登录失败
pub fn check_login_response(status: StatusCode, body: &str) -> AppResult<()> {
    let json = parse_json(body);
    let explicit_failure = json.as_ref().is_some_and(is_explicit_failure);

    if status.is_success() && !explicit_failure {
        return Ok(());
    }

    let message = json
        .as_ref()
        .and_then(lms_message)
        .unwrap_or_else(|| DEFAULT_AUTH_FAILURE.to_string());

    warn!("❌ 登录被拒绝 ({}): {}", status, message);
    Err(BatchError::auth_failed(Some(status.as_u16()), message))
}
