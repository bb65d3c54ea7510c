//! 批量报表提交器 - 编排层
//!
//! ## 职责
//!
//! 一次批量提交的完整驱动：解析课程列表 → 登录 → 逐个提交 → 汇总。
//!
//! ## 状态流转
//!
//! ```text
//! Idle → ParsingInput → Authenticating → SubmittingJobs(1..N) → Completed
//!            ↓                ↓
//!          Failed           Failed
//! ```
//!
//! `SubmittingJobs` 不会进入 `Failed`：单个课程失败只记录，不中断批次。
//!
//! ## 设计特点
//!
//! - **严格顺序**：LMS 对短时间内的大量请求会临时锁定账号，这里不并发
//! - **会话独占**：每个批次自己登录、自己持有 `LmsSession`，结束即丢弃
//! - **不重试**：失败的课程由调用方决定是否重新提交

use crate::clients::LmsAuthClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{parse_course_list, BatchRequest, BatchResult, Credentials, ReportType};
use crate::services::ReportSubmitter;
use crate::utils::logging;
use tokio::time::sleep;
use tracing::{debug, error};

/// 批量报表提交器
///
/// 不持有任何跨批次状态，可在多个并发请求间共享
pub struct BatchOrchestrator {
    config: Config,
    auth_client: LmsAuthClient,
    submitter: ReportSubmitter,
}

impl BatchOrchestrator {
    /// 创建新的提交器
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            auth_client: LmsAuthClient::new(config),
            submitter: ReportSubmitter::new(config),
        }
    }

    /// 运行一次批量提交
    ///
    /// # 参数
    /// - `credentials`: 登录凭据
    /// - `report_type`: 报表类型
    /// - `pasted_text`: 粘贴的课程列表
    /// - `uploaded`: 上传文件内容（可选）
    ///
    /// # 返回
    /// 输入为空或登录失败时返回错误（没有任何课程被提交）；
    /// 否则总是返回完整的 `BatchResult`
    pub async fn run(
        &self,
        credentials: &Credentials,
        report_type: ReportType,
        pasted_text: &str,
        uploaded: Option<&[u8]>,
    ) -> AppResult<BatchResult> {
        debug!("批次状态: Idle → ParsingInput");
        let jobs = match parse_course_list(pasted_text, uploaded, report_type) {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("❌ 输入无效: {}", e);
                return Err(e);
            }
        };

        let total = jobs.len();
        logging::log_batch_start(report_type, &credentials.lms_base_url, total);

        debug!("批次状态: ParsingInput → Authenticating");
        let session = match self.auth_client.authenticate(credentials).await {
            Ok(session) => session,
            Err(e) => {
                error!("❌ 登录失败，批次终止: {}", e);
                return Err(e);
            }
        };

        let mut results = Vec::with_capacity(total);
        for (idx, job) in jobs.iter().enumerate() {
            let current = idx + 1;
            debug!("批次状态: SubmittingJobs({}/{})", current, total);

            if idx > 0 {
                if let Some(delay) = self.config.job_delay() {
                    sleep(delay).await;
                }
            }

            logging::log_job_start(current, total, job);
            results.push(self.submitter.submit(&session, report_type, job).await);
        }

        // 会话在此随批次一起释放
        drop(session);
        debug!("批次状态: SubmittingJobs → Completed");

        let result = BatchResult::from_outcomes(results);
        logging::print_final_stats(&result);
        Ok(result)
    }

    /// 运行外部请求层传入的批量请求
    pub async fn run_request(&self, request: &BatchRequest) -> AppResult<BatchResult> {
        self.run(
            &request.credentials(),
            request.report_type,
            &request.pasted_course_text,
            request.uploaded_file_bytes.as_deref(),
        )
        .await
    }
}
