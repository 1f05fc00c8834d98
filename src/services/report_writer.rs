//! 报告写入服务 - 业务能力层
//!
//! 只负责"把判分报告写到磁盘"能力，不关心流程

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::services::grading_service::GradeReport;

/// 报告写入服务
///
/// 职责：
/// - 将单次考试的判分报告写为 JSON 文件
/// - 只处理单个报告
/// - 不关心流程顺序
pub struct ReportWriter {
    report_folder: String,
}

impl ReportWriter {
    /// 创建新的报告写入服务
    pub fn new(report_folder: impl Into<String>) -> Self {
        Self {
            report_folder: report_folder.into(),
        }
    }

    /// 写入判分报告
    ///
    /// # 参数
    /// - `scenario_name`: 场景名称（用作文件名）
    /// - `report`: 判分报告
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn write(&self, scenario_name: &str, report: &GradeReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.report_folder)
            .await
            .with_context(|| format!("无法创建报告目录: {}", self.report_folder))?;

        let file_name = format!("{}.json", sanitize_file_name(scenario_name));
        let path = PathBuf::from(&self.report_folder).join(file_name);

        let payload = serde_json::to_string_pretty(report)?;
        fs::write(&path, payload)
            .await
            .with_context(|| format!("无法写入报告文件: {}", path.display()))?;

        debug!(
            "报告已写入: {} ({} 题, 正确 {})",
            path.display(),
            report.total,
            report.correct
        );

        Ok(path)
    }
}

/// 把场景名称转成安全的文件名
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("模拟卷 01/A"), "模拟卷_01_A");
        assert_eq!(sanitize_file_name("mock-01"), "mock-01");
    }
}
