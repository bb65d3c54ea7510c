//! # edX Report Submit
//!
//! 为多门 Open edX 课程批量触发讲师报表生成任务（只提交，不下载）
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（cookie jar + HTTP 客户端），只暴露能力
//! - `LmsSession` - 每批次唯一的会话，自动附带 CSRF token
//!
//! ### ② 客户端层（Clients）
//! - `LmsAuthClient` - 登录 LMS，得到 `LmsSession`
//!
//! ### ③ 业务能力层（Services）
//! - `ReportSubmitter` - 为单个课程提交一次报表任务，失败归类为 `Outcome`
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 解析课程列表 → 登录 → 顺序提交 → 汇总
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::LmsAuthClient;
pub use config::Config;
pub use error::{AppResult, BatchError, ConfigError};
pub use infrastructure::LmsSession;
pub use models::{BatchRequest, BatchResult, Credentials, JobDescriptor, Outcome, OutcomeKind, ReportType};
pub use orchestrator::BatchOrchestrator;
pub use services::ReportSubmitter;
