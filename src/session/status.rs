//! 题目状态机
//!
//! 五种状态，状态迁移只由考生在当前题目上的操作驱动：
//!
//! 1. 首次进入题目：未浏览 → 未作答
//! 2. 选择/修改答案：→ 已作答（若已标记则 → 已作答并标记）
//! 3. 清除作答：已作答并标记 → 标记待复查，已作答 → 未作答
//!    （标记与答案相互独立，清答案不清标记）
//! 4. 标记待复查：有答案 → 已作答并标记，无答案 → 标记待复查
//!
//! 单个题目没有终止状态，整个会话在交卷时冻结。

/// 题目状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// 未浏览
    NotVisited = 0,
    /// 未作答
    NotAnswered = 1,
    /// 已作答
    Answered = 2,
    /// 标记待复查
    MarkedForReview = 3,
    /// 已作答并标记
    AnsweredAndMarked = 4,
}

impl QuestionStatus {
    /// 获取状态代码
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 从代码解析状态
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(QuestionStatus::NotVisited),
            1 => Some(QuestionStatus::NotAnswered),
            2 => Some(QuestionStatus::Answered),
            3 => Some(QuestionStatus::MarkedForReview),
            4 => Some(QuestionStatus::AnsweredAndMarked),
            _ => None,
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionStatus::NotVisited => "未浏览",
            QuestionStatus::NotAnswered => "未作答",
            QuestionStatus::Answered => "已作答",
            QuestionStatus::MarkedForReview => "标记待复查",
            QuestionStatus::AnsweredAndMarked => "已作答并标记",
        }
    }

    /// 当前状态是否携带答案
    pub fn is_answered(self) -> bool {
        matches!(
            self,
            QuestionStatus::Answered | QuestionStatus::AnsweredAndMarked
        )
    }

    /// 当前状态是否带有复查标记
    pub fn is_marked(self) -> bool {
        matches!(
            self,
            QuestionStatus::MarkedForReview | QuestionStatus::AnsweredAndMarked
        )
    }

    /// 迁移：首次进入题目
    pub fn after_visit(self) -> Self {
        match self {
            QuestionStatus::NotVisited => QuestionStatus::NotAnswered,
            other => other,
        }
    }

    /// 迁移：选择或修改答案
    pub fn after_answer(self) -> Self {
        if self.is_marked() {
            QuestionStatus::AnsweredAndMarked
        } else {
            QuestionStatus::Answered
        }
    }

    /// 迁移：清除作答
    ///
    /// 标记独立于答案存在，清除作答不会清掉标记。
    pub fn after_clear(self) -> Self {
        match self {
            QuestionStatus::AnsweredAndMarked => QuestionStatus::MarkedForReview,
            QuestionStatus::Answered => QuestionStatus::NotAnswered,
            other => other,
        }
    }

    /// 迁移：标记待复查
    pub fn after_mark(self) -> Self {
        if self.is_answered() {
            QuestionStatus::AnsweredAndMarked
        } else {
            QuestionStatus::MarkedForReview
        }
    }
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
