use crate::cli::Args;
use crate::config::Config;
use crate::models::{load_course_file, BatchResult, Credentials};
use crate::orchestrator::BatchOrchestrator;
use anyhow::{Context, Result};
use tracing::info;

/// 命令行应用主结构
pub struct App {
    args: Args,
    orchestrator: BatchOrchestrator,
    uploaded: Option<Vec<u8>>,
}

impl App {
    /// 初始化应用：读取课程文件
    pub async fn initialize(config: Config, args: Args) -> Result<Self> {
        let uploaded = match &args.course_ids_file {
            Some(path) => {
                let bytes = load_course_file(path).await?;
                info!("📁 已读取课程文件: {}", path.display());
                Some(bytes)
            }
            None => None,
        };

        Ok(Self {
            orchestrator: BatchOrchestrator::new(&config),
            args,
            uploaded,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchResult> {
        let credentials = Credentials::new(
            &self.args.email,
            &self.args.password,
            &self.args.lms_url,
        );

        let outcome = self
            .orchestrator
            .run(
                &credentials,
                self.args.report,
                &self.args.pasted_text(),
                self.uploaded.as_deref(),
            )
            .await;

        if self.args.json {
            let rendered = match &outcome {
                Ok(result) => serde_json::to_string_pretty(result),
                Err(e) => serde_json::to_string_pretty(&e.to_body()),
            }
            .context("无法序列化结果")?;
            println!("{}", rendered);
        }

        Ok(outcome?)
    }
}
