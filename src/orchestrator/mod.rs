//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次批量提交的流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<JobDescriptor>)
//!     ↓
//! services::ReportSubmitter (处理单个课程)
//!     ↓
//! clients::LmsAuthClient (登录，每批一次)
//!     ↓
//! infrastructure::LmsSession (cookie + CSRF)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 LmsSession，并以参数形式交给下层
//! 2. **向下依赖**：编排层 → services → clients → infrastructure
//! 3. **无业务判断**：只做调度和统计，结果归类交给 services

pub mod batch_processor;

pub use batch_processor::BatchOrchestrator;
