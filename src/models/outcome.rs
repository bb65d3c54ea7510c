use crate::models::job::JobDescriptor;
use serde::{Deserialize, Serialize};

/// 批量结果附带的提示
pub const DOWNLOAD_NOTE: &str =
    "Reports are submitted. Download them later from the LMS Instructor Data Download tab.";

/// 单个课程的结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// 报表任务已提交
    Submitted,
    /// 题目作答报表缺少 block id，未发请求
    MissingBlockId,
    /// 401 / 403
    PermissionDenied,
    /// 其余 4xx，或 2xx 但 LMS 明确返回失败
    Rejected,
    /// 5xx
    ServerError,
    /// 连接失败 / 超时
    NetworkError,
}

impl OutcomeKind {
    pub fn is_success(self) -> bool {
        matches!(self, OutcomeKind::Submitted)
    }
}

/// 单个课程的提交结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    pub success: bool,
    pub kind: OutcomeKind,
    pub message: String,
}

impl Outcome {
    pub fn new(job: &JobDescriptor, kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            course_id: job.course_id.clone(),
            block_id: job.block_id.clone(),
            success: kind.is_success(),
            kind,
            message: message.into(),
        }
    }
}

/// 批量提交汇总
///
/// 恒有 `total == success + failed == results.len()`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub results: Vec<Outcome>,
    pub note: String,
}

impl BatchResult {
    /// 由结果序列计算统计
    pub fn from_outcomes(results: Vec<Outcome>) -> Self {
        let success = results.iter().filter(|o| o.success).count();
        Self {
            total: results.len(),
            success,
            failed: results.len() - success,
            results,
            note: DOWNLOAD_NOTE.to_string(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_derived_from_outcomes() {
        let a = JobDescriptor::new("course-v1:A+A+A");
        let b = JobDescriptor::new("course-v1:B+B+B");
        let result = BatchResult::from_outcomes(vec![
            Outcome::new(&a, OutcomeKind::Submitted, "ok"),
            Outcome::new(&b, OutcomeKind::PermissionDenied, "denied"),
            Outcome::new(&a, OutcomeKind::ServerError, "boom"),
        ]);

        assert_eq!(result.total, 3);
        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 2);
        assert_eq!(result.total, result.success + result.failed);
        assert!(!result.all_succeeded());
    }

    #[test]
    fn test_empty_batch_is_consistent() {
        let result = BatchResult::from_outcomes(Vec::new());
        assert_eq!((result.total, result.success, result.failed), (0, 0, 0));
        assert!(result.all_succeeded());
    }

    #[test]
    fn test_serialized_shape() {
        let job = JobDescriptor::with_block("course-v1:X+Y+Z", "block-v1:abc");
        let outcome = Outcome::new(&job, OutcomeKind::Submitted, "report task submitted");
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["course_id"], "course-v1:X+Y+Z");
        assert_eq!(value["block_id"], "block-v1:abc");
        assert_eq!(value["success"], true);
        assert_eq!(value["kind"], "submitted");
    }
}
