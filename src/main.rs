use anyhow::Result;
use clap::Parser;
use edx_report_submit::cli::Args;
use edx_report_submit::utils::logging;
use edx_report_submit::{App, Config};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let config = Config::load(args.config.as_deref())?;

    // 初始化日志
    logging::init(config.verbose_logging || args.verbose);

    // 初始化并运行应用
    let app = App::initialize(config, args).await?;
    match app.run().await {
        Ok(result) if result.all_succeeded() => Ok(()),
        Ok(_) => std::process::exit(2),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
