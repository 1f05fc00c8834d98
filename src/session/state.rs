//! 会话状态存储
//!
//! 每道题一条 `QuestionState`，整场考试一个 `SessionState`。
//! 不变式：`selected_answer` 非空 当且仅当 状态为已作答/已作答并标记。
//! 状态和答案只通过本模块的方法一起变更，保证不变式不被破坏。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::exam::Answer;
use crate::models::language::Language;
use crate::session::status::QuestionStatus;

/// 单个题目的作答状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionState {
    pub question_id: String,
    pub status: QuestionStatus,
    pub selected_answer: Option<Answer>,
}

impl QuestionState {
    /// 创建初始状态（未浏览、无答案）
    pub fn new(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            status: QuestionStatus::NotVisited,
            selected_answer: None,
        }
    }

    /// 进入题目
    pub fn visit(&mut self) {
        self.status = self.status.after_visit();
    }

    /// 写入作答并迁移状态
    pub fn set_answer(&mut self, answer: Answer) {
        self.selected_answer = Some(answer);
        self.status = self.status.after_answer();
    }

    /// 清除作答并迁移状态
    pub fn clear_answer(&mut self) {
        self.selected_answer = None;
        self.status = self.status.after_clear();
    }

    /// 标记待复查
    pub fn mark(&mut self) {
        self.status = self.status.after_mark();
    }

    /// 校验状态与答案的一致性
    pub fn is_consistent(&self) -> bool {
        self.selected_answer.is_some() == self.status.is_answered()
    }
}

/// 会话统计
///
/// 四个桶互斥，对状态枚举做完整划分：
/// 已作答桶包含"已作答"和"已作答并标记"两种状态。
/// 仅用于交卷前的确认弹窗展示，不参与判分。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub answered: usize,
    pub not_answered: usize,
    pub not_visited: usize,
    pub marked_for_review: usize,
}

impl SessionStats {
    /// 统计覆盖的题目总数
    pub fn total(&self) -> usize {
        self.answered + self.not_answered + self.not_visited + self.marked_for_review
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "已作答 {} | 未作答 {} | 未浏览 {} | 标记待复查 {}",
            self.answered, self.not_answered, self.not_visited, self.marked_for_review
        )
    }
}

/// 考试会话状态
///
/// 会话开始时创建，只能通过 `ExamSession` 的方法变更；
/// `submitted` 置位后整个状态冻结为只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// 题目ID → 作答状态
    pub question_states: HashMap<String, QuestionState>,
    /// 当前章节下标
    pub current_section_index: usize,
    /// 当前题目下标（全卷展开后的位置）
    pub current_question_index: usize,
    /// 作答语言
    pub language: Language,
    /// 计时是否暂停
    pub is_paused: bool,
    /// 是否已交卷
    pub submitted: bool,
}

impl SessionState {
    /// 为一组题目ID创建初始会话状态
    pub fn new(question_ids: impl IntoIterator<Item = String>, language: Language) -> Self {
        let question_states = question_ids
            .into_iter()
            .map(|id| (id.clone(), QuestionState::new(id)))
            .collect();

        Self {
            question_states,
            current_section_index: 0,
            current_question_index: 0,
            language,
            is_paused: false,
            submitted: false,
        }
    }

    /// 按状态枚举划分四个互斥统计桶
    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats::default();
        for state in self.question_states.values() {
            match state.status {
                QuestionStatus::Answered | QuestionStatus::AnsweredAndMarked => {
                    stats.answered += 1
                }
                QuestionStatus::NotAnswered => stats.not_answered += 1,
                QuestionStatus::NotVisited => stats.not_visited += 1,
                QuestionStatus::MarkedForReview => stats.marked_for_review += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_consistent() {
        let state = QuestionState::new("q1");
        assert_eq!(state.status, QuestionStatus::NotVisited);
        assert!(state.selected_answer.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_answer_then_clear_keeps_consistency() {
        let mut state = QuestionState::new("q1");
        state.visit();
        state.set_answer(Answer::Single("A".to_string()));
        assert!(state.is_consistent());
        assert_eq!(state.status, QuestionStatus::Answered);

        state.clear_answer();
        assert!(state.is_consistent());
        assert_eq!(state.status, QuestionStatus::NotAnswered);
    }

    #[test]
    fn test_marked_question_survives_clear() {
        let mut state = QuestionState::new("q1");
        state.visit();
        state.set_answer(Answer::Single("A".to_string()));
        state.mark();
        assert_eq!(state.status, QuestionStatus::AnsweredAndMarked);

        state.clear_answer();
        assert_eq!(state.status, QuestionStatus::MarkedForReview);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_stats_partition_is_exhaustive() {
        let mut session = SessionState::new(
            ["q1", "q2", "q3", "q4", "q5"].map(String::from),
            Language::English,
        );

        // q1 已作答, q2 已作答并标记, q3 标记待复查, q4 未作答, q5 未浏览
        session.question_states.get_mut("q1").unwrap().visit();
        session
            .question_states
            .get_mut("q1")
            .unwrap()
            .set_answer(Answer::Single("A".to_string()));
        session.question_states.get_mut("q2").unwrap().visit();
        session
            .question_states
            .get_mut("q2")
            .unwrap()
            .set_answer(Answer::Single("B".to_string()));
        session.question_states.get_mut("q2").unwrap().mark();
        session.question_states.get_mut("q3").unwrap().visit();
        session.question_states.get_mut("q3").unwrap().mark();
        session.question_states.get_mut("q4").unwrap().visit();

        let stats = session.stats();
        assert_eq!(stats.answered, 2);
        assert_eq!(stats.marked_for_review, 1);
        assert_eq!(stats.not_answered, 1);
        assert_eq!(stats.not_visited, 1);
        assert_eq!(stats.total(), 5);
    }
}
