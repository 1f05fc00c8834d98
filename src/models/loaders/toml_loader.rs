use crate::models::scenario::Scenario;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 Scenario 对象
pub async fn load_toml_to_scenario(toml_file_path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut scenario: Scenario = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 回填章节信息和文件路径
    scenario.exam.normalize();
    scenario.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(scenario)
}

/// 从文件夹中加载所有 TOML 文件并转换为 Scenario 对象列表
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<Scenario>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut scenarios = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_toml_to_scenario(&path).await {
                Ok(scenario) => {
                    tracing::info!(
                        "成功加载场景 {} ({} 道题, {} 条操作)",
                        scenario.name,
                        scenario.exam.total_questions(),
                        scenario.actions.len()
                    );
                    scenarios.push(scenario);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    // 固定处理顺序，方便日志对照
    scenarios.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(scenarios)
}
