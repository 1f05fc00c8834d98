//! 应用主结构 - 编排层
//!
//! 初始化日志和配置，加载场景文件，驱动批量回放。

use anyhow::Result;
use tracing::warn;

use crate::config::Config;
use crate::models::loaders::load_all_toml_files;
use crate::orchestrator::batch_runner::{process_all_scenarios, ProcessingStats};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_scenarios);

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        // 加载所有待回放的场景
        let scenarios = load_all_toml_files(&self.config.scenario_folder).await?;

        if scenarios.is_empty() {
            warn!("⚠️ 没有找到待回放的TOML文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        let total = scenarios.len();
        logging::log_scenarios_loaded(total, self.config.max_concurrent_scenarios);

        // 回放所有场景
        let stats = process_all_scenarios(scenarios, &self.config).await?;

        // 输出最终统计
        logging::print_final_stats(
            stats.graded(),
            stats.abandoned,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }
}
