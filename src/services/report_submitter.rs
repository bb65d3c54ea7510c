//! 报表提交服务 - 业务能力层
//!
//! 只负责"为一门课程触发一次报表生成"，不关心批次和顺序

use crate::clients::response::{is_explicit_failure, lms_message, parse_json, truncate_text};
use crate::config::Config;
use crate::infrastructure::LmsSession;
use crate::models::{JobDescriptor, Outcome, OutcomeKind, ReportType};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// LMS 未返回说明时的成功提示
pub const DEFAULT_SUBMITTED: &str = "report task submitted";

/// 一次报表请求的 LMS 响应
#[derive(Debug, Clone, Copy)]
pub struct LmsReply<'a> {
    pub status: StatusCode,
    /// 3xx 时的 Location 头
    pub location: Option<&'a str>,
    pub body: &'a str,
}

impl<'a> LmsReply<'a> {
    pub fn new(status: StatusCode, body: &'a str) -> Self {
        Self {
            status,
            location: None,
            body,
        }
    }

    pub fn redirect(status: StatusCode, location: &'a str) -> Self {
        Self {
            status,
            location: Some(location),
            body: "",
        }
    }
}

/// 题目作答报表的表单字段
const PROBLEM_LOCATION_FIELD: &str = "problem_location";

/// 报表提交服务
///
/// 职责：
/// - 拼接单个课程的报表地址和表单
/// - 发送一次 POST，不重试
/// - 把任何响应或传输错误归类为 `Outcome`，从不返回错误
pub struct ReportSubmitter {
    response_preview_chars: usize,
}

impl ReportSubmitter {
    /// 创建新的提交服务
    pub fn new(config: &Config) -> Self {
        Self {
            response_preview_chars: config.response_preview_chars,
        }
    }

    /// 为单个课程提交报表任务
    ///
    /// # 参数
    /// - `session`: 已登录的会话
    /// - `report_type`: 报表类型
    /// - `job`: 课程任务
    ///
    /// # 返回
    /// 返回该课程的结果，失败也以 `success = false` 返回
    pub async fn submit(
        &self,
        session: &LmsSession,
        report_type: ReportType,
        job: &JobDescriptor,
    ) -> Outcome {
        let form = match build_form(report_type, job) {
            Ok(form) => form,
            Err(outcome) => {
                warn!("⚠️ {} 缺少 block id，跳过", job.course_id);
                return outcome;
            }
        };

        let url = report_type.endpoint(session.base_url(), &job.course_id);
        debug!("提交报表 '{}' -> {} (表单字段 {})", report_type, url, form.len());

        let response = match session.post_form(&url, &form).await {
            Ok(response) => response,
            Err(e) => return self.transport_failure(job, &e),
        };

        let status = response.status();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.transport_failure(job, &e),
        };

        let reply = LmsReply {
            status,
            location: location.as_deref(),
            body: &body,
        };
        let outcome = self.classify(session.base_url(), job, &reply);
        if outcome.success {
            info!("✓ {} 报表 '{}' 已提交", job, report_type);
        } else {
            warn!("❌ {} 报表 '{}' 提交失败: {}", job, report_type, outcome.message);
        }
        outcome
    }

    /// 按状态码、重定向目标和响应体归类结果
    ///
    /// 只有 2xx 且响应体为空或为未声明失败的 JSON 才算提交成功
    pub fn classify(&self, base_url: &str, job: &JobDescriptor, reply: &LmsReply<'_>) -> Outcome {
        let LmsReply {
            status,
            location,
            body,
        } = *reply;
        let json = parse_json(body);
        let lms_text = json.as_ref().and_then(lms_message);
        let code = status.as_u16();

        if status.is_success() {
            return match &json {
                Some(json) if is_explicit_failure(json) => {
                    let detail = lms_text.unwrap_or_else(|| format!("HTTP {}", code));
                    Outcome::new(
                        job,
                        OutcomeKind::Rejected,
                        format!("{}: Rejected by LMS - {}", job.course_id, detail),
                    )
                }
                None if !body.trim().is_empty() => Outcome::new(
                    job,
                    OutcomeKind::Rejected,
                    format!(
                        "{}: Unexpected non-JSON response ({}){}",
                        job.course_id,
                        code,
                        self.detail_suffix(None, body)
                    ),
                ),
                _ => {
                    let confirmation = lms_text.unwrap_or_else(|| DEFAULT_SUBMITTED.to_string());
                    Outcome::new(
                        job,
                        OutcomeKind::Submitted,
                        format!("{}: {}", job.course_id, confirmation),
                    )
                }
            };
        }

        if status.is_redirection() {
            let target = location.unwrap_or("<no Location header>");
            // 被踢回登录页：会话失效或账号无权访问讲师面板
            return if target.contains("/login") {
                Outcome::new(
                    job,
                    OutcomeKind::PermissionDenied,
                    format!(
                        "{}: Redirected to login ({}) -> {}. The session was lost or the account \
                         cannot open the instructor view: {}/courses/{}/instructor#view-data_download",
                        job.course_id, code, target, base_url, job.course_id
                    ),
                )
            } else {
                Outcome::new(
                    job,
                    OutcomeKind::Rejected,
                    format!("{}: Redirected ({}) -> {}", job.course_id, code, target),
                )
            };
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Outcome::new(
                job,
                OutcomeKind::PermissionDenied,
                format!(
                    "{}: Permission denied ({}). Check that the account has data researcher \
                     access to the Instructor Data Download tab: {}/courses/{}/instructor#view-data_download",
                    job.course_id, code, base_url, job.course_id
                ),
            ),
            s if s.is_server_error() => Outcome::new(
                job,
                OutcomeKind::ServerError,
                format!(
                    "{}: LMS server error ({}), try again later{}",
                    job.course_id,
                    code,
                    self.detail_suffix(lms_text, body)
                ),
            ),
            _ => Outcome::new(
                job,
                OutcomeKind::Rejected,
                format!(
                    "{}: Failed ({}){}",
                    job.course_id,
                    code,
                    self.detail_suffix(lms_text, body)
                ),
            ),
        }
    }

    /// 传输层错误（连接失败、超时）
    fn transport_failure(&self, job: &JobDescriptor, error: &reqwest::Error) -> Outcome {
        let message = if error.is_timeout() {
            format!("{}: Request timed out, the LMS may be busy", job.course_id)
        } else {
            format!("{}: Network error - {}", job.course_id, error)
        };
        warn!("❌ {} 请求失败: {}", job, error);
        Outcome::new(job, OutcomeKind::NetworkError, message)
    }

    /// 失败信息的补充说明：优先 LMS 消息，其次截断后的原始响应
    fn detail_suffix(&self, lms_text: Option<String>, body: &str) -> String {
        let detail = lms_text.or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| truncate_text(trimmed, self.response_preview_chars))
        });
        match detail {
            Some(detail) => format!(" - {}", detail),
            None => String::new(),
        }
    }
}

/// 构建请求表单；题目作答报表缺少 block id 时直接返回失败结果
fn build_form<'a>(
    report_type: ReportType,
    job: &'a JobDescriptor,
) -> Result<Vec<(&'static str, &'a str)>, Outcome> {
    if !report_type.accepts_block_id() {
        return Ok(Vec::new());
    }

    match job.block_id.as_deref() {
        Some(block_id) => Ok(vec![(PROBLEM_LOCATION_FIELD, block_id)]),
        None => Err(Outcome::new(
            job,
            OutcomeKind::MissingBlockId,
            format!(
                "{}: Missing block id, '{}' needs a problem block (e.g. block-v1:...+type@problem+block@...)",
                job.course_id, report_type
            ),
        )),
    }
}
