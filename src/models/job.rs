use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 单个课程任务
///
/// `(course_id, block_id)` 为唯一键
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

impl JobDescriptor {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            block_id: None,
        }
    }

    pub fn with_block(course_id: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            block_id: Some(block_id.into()),
        }
    }
}

impl Display for JobDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.block_id {
            Some(block_id) => write!(f, "{} ({})", self.course_id, block_id),
            None => write!(f, "{}", self.course_id),
        }
    }
}
