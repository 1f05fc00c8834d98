//! 场景回放上下文
//!
//! 封装"我正在回放第几个场景"这一信息

use std::fmt::Display;

/// 场景回放上下文
///
/// 包含回放单个场景所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    /// 场景名称
    pub scenario_name: String,

    /// 场景索引（仅用于日志显示）
    pub scenario_index: usize,

    /// 考生标识
    pub candidate: Option<String>,
}

impl ScenarioCtx {
    /// 创建新的场景上下文
    pub fn new(scenario_name: String, scenario_index: usize, candidate: Option<String>) -> Self {
        Self {
            scenario_name,
            scenario_index,
            candidate,
        }
    }
}

impl Display for ScenarioCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.candidate {
            Some(candidate) => write!(
                f,
                "[场景 #{} {} 考生#{}]",
                self.scenario_index, self.scenario_name, candidate
            ),
            None => write!(f, "[场景 #{} {}]", self.scenario_index, self.scenario_name),
        }
    }
}
