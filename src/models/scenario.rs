//! 场景文件模型
//!
//! 一个场景 = 一份试卷定义 + 一段按时间顺序记录的考生操作。
//! 回放场景即可完整复现一次考试会话，用于判分和复盘。

use serde::{Deserialize, Serialize};

use crate::models::exam::{Answer, ExamConfig};

/// 考生操作记录
///
/// `tick` 表示时间流逝（秒），其余操作都发生在当前时刻。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioAction {
    /// 跳转到指定题目（全卷展开后的下标，从0开始）
    Navigate { index: usize },
    /// 跳转到指定章节的第一题
    Section { index: usize },
    /// 下一题
    Next,
    /// 上一题
    Prev,
    /// 作答当前题目（或指定题目）
    Answer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_id: Option<String>,
        answer: Answer,
    },
    /// 清除当前题目（或指定题目）的作答
    Clear {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_id: Option<String>,
    },
    /// 标记当前题目（或指定题目）待复查，不移动
    Mark {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_id: Option<String>,
    },
    /// 标记待复查并进入下一题
    MarkNext,
    /// 保存作答并进入下一题
    SaveNext {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<Answer>,
    },
    /// 时间流逝
    Tick { seconds: u64 },
    /// 暂停计时
    Pause,
    /// 恢复计时
    Resume,
    /// 切换作答语言
    Language { code: String },
    /// 主动交卷
    Submit,
}

/// 考试场景
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// 场景名称
    pub name: String,
    /// 考生标识（仅用于日志和报告显示）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    /// 作答语言代码，缺省时使用全局配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 试卷定义
    pub exam: ExamConfig,
    /// 操作序列
    #[serde(default)]
    pub actions: Vec<ScenarioAction>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl Scenario {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
