//! 批量回放处理器 - 编排层
//!
//! 管理并发与批次：把全部场景按配置的并发数分批，
//! 每批用 Semaphore 限流并发回放，批内全部完成后再开始下一批。

use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::error;

use crate::config::Config;
use crate::models::scenario::Scenario;
use crate::utils::logging::{log_batch_complete, log_batch_start};
use crate::workflow::{ReplayResult, ScenarioCtx, ScenarioFlow};

/// 回放统计
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessingStats {
    /// 主动交卷数量
    pub submitted: usize,
    /// 到时自动交卷数量
    pub auto_submitted: usize,
    /// 未交卷数量
    pub abandoned: usize,
    /// 回放失败数量
    pub failed: usize,
    /// 场景总数
    pub total: usize,
}

impl ProcessingStats {
    /// 完成判分的场景数（主动 + 自动交卷）
    pub fn graded(&self) -> usize {
        self.submitted + self.auto_submitted
    }
}

/// 处理所有场景
pub async fn process_all_scenarios(
    scenarios: Vec<Scenario>,
    config: &Config,
) -> Result<ProcessingStats> {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_scenarios));
    let total_scenarios = scenarios.len();
    let mut stats = ProcessingStats {
        total: total_scenarios,
        ..Default::default()
    };

    // 分批处理
    for batch_start in (0..total_scenarios).step_by(config.max_concurrent_scenarios) {
        let batch_end = (batch_start + config.max_concurrent_scenarios).min(total_scenarios);
        let batch_scenarios = &scenarios[batch_start..batch_end];
        let batch_num = (batch_start / config.max_concurrent_scenarios) + 1;
        let total_batches = (total_scenarios + config.max_concurrent_scenarios - 1)
            / config.max_concurrent_scenarios;

        log_batch_start(
            batch_num,
            total_batches,
            batch_start + 1,
            batch_end,
            total_scenarios,
        );

        let batch_result =
            process_batch(batch_scenarios, batch_start, semaphore.clone(), config).await;

        stats.submitted += batch_result.submitted;
        stats.auto_submitted += batch_result.auto_submitted;
        stats.abandoned += batch_result.abandoned;
        stats.failed += batch_result.failed;

        log_batch_complete(batch_num, batch_result.graded(), batch_end - batch_start);
    }

    Ok(stats)
}

/// 处理单个批次
async fn process_batch(
    batch_scenarios: &[Scenario],
    batch_start: usize,
    semaphore: Arc<Semaphore>,
    config: &Config,
) -> ProcessingStats {
    let mut batch_handles = Vec::new();

    // 为本批创建并发任务
    for (idx, scenario) in batch_scenarios.iter().enumerate() {
        let scenario_index = batch_start + idx + 1;
        let semaphore = semaphore.clone();
        let scenario = scenario.clone();
        let config = config.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let ctx = ScenarioCtx::new(
                scenario.name.clone(),
                scenario_index,
                scenario.candidate.clone(),
            );
            let flow = ScenarioFlow::new(&config);
            flow.run(&scenario, &ctx).await
        });
        batch_handles.push((scenario_index, handle));
    }

    // 等待本批所有任务完成
    let mut result = ProcessingStats::default();
    let (indexes, handles): (Vec<_>, Vec<_>) = batch_handles.into_iter().unzip();

    for (scenario_index, joined) in indexes.into_iter().zip(join_all(handles).await) {
        match joined {
            Ok(Ok(outcome)) => match outcome.result {
                ReplayResult::Submitted => result.submitted += 1,
                ReplayResult::AutoSubmitted => result.auto_submitted += 1,
                ReplayResult::Abandoned => result.abandoned += 1,
            },
            Ok(Err(e)) => {
                error!("[场景 {}] ❌ 回放过程中发生错误: {}", scenario_index, e);
                result.failed += 1;
            }
            Err(e) => {
                error!("[场景 {}] 任务执行失败: {}", scenario_index, e);
                result.failed += 1;
            }
        }
    }

    result
}
