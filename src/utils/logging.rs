/// 日志工具模块
///
/// 提供日志初始化和批次进度输出的辅助函数
use crate::models::{BatchResult, JobDescriptor, ReportType};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，详细模式下为 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（如测试中）直接忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录批次启动信息
///
/// # 参数
/// - `report_type`: 报表类型
/// - `lms_url`: LMS 地址
/// - `total`: 课程总数
pub fn log_batch_start(report_type: ReportType, lms_url: &str, total: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始批量提交报表: {}", report_type);
    info!("🌐 LMS: {}", lms_url);
    info!("📋 共 {} 个课程任务，逐个顺序提交", total);
    info!("{}", "=".repeat(60));
}

/// 记录单个任务开始
pub fn log_job_start(index: usize, total: usize, job: &JobDescriptor) {
    info!("[{}/{}] 📤 {}", index, total, job);
}

/// 打印最终统计信息
pub fn print_final_stats(result: &BatchResult) {
    info!("\n{}", "=".repeat(60));
    info!("📊 批量提交完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.success, result.total);
    if result.failed > 0 {
        warn!("❌ 失败: {}", result.failed);
        for outcome in result.results.iter().filter(|o| !o.success) {
            warn!("   - {}", outcome.message);
        }
    } else {
        info!("❌ 失败: 0");
    }
    info!("{}", "=".repeat(60));
    info!("💡 {}", result.note);
}
