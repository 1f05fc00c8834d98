//! 判分服务 - 业务能力层
//!
//! 只负责"作答映射 → 判分报告"能力，不关心流程。
//! 判分规则：
//! - 单选题：答案精确匹配
//! - 多选题：集合相等（与作答顺序无关）
//! - 数值题：数值比较，无法解析时退回去空格的文本比较

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppResult, GradingError};
use crate::models::exam::{Answer, ExamConfig, QuestionKind};

/// 单题判分结果
#[derive(Debug, Clone, Serialize)]
pub struct QuestionGrade {
    pub question_id: String,
    pub question_number: u32,
    pub section_name: String,
    /// 题型名称
    pub kind: &'static str,
    pub given: Option<Answer>,
    pub correct_answer: Answer,
    pub attempted: bool,
    pub is_correct: bool,
}

/// 全卷判分报告
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub exam_title: String,
    /// 判分时间
    pub graded_at: String,
    pub total: usize,
    pub attempted: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unattempted: usize,
    pub details: Vec<QuestionGrade>,
}

impl GradeReport {
    /// 正确率（按作答题目计算，百分比）
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.attempted as f64
        }
    }
}

impl std::fmt::Display for GradeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "共 {} 题 | 作答 {} | 正确 {} | 错误 {} | 未作答 {} | 正确率 {:.1}%",
            self.total,
            self.attempted,
            self.correct,
            self.incorrect,
            self.unattempted,
            self.accuracy()
        )
    }
}

/// 判分服务
///
/// 职责：
/// - 将一份作答映射与标准答案逐题比对
/// - 不持有会话状态
/// - 不关心流程顺序
pub struct GradingService;

impl GradingService {
    /// 创建新的判分服务
    pub fn new() -> Self {
        Self
    }

    /// 判分
    ///
    /// # 参数
    /// - `exam`: 试卷定义
    /// - `responses`: 题目ID → 作答内容（未作答为 None），每道题一条
    ///
    /// # 返回
    /// 作答映射中出现试卷外的题目ID时返回错误
    pub fn grade(
        &self,
        exam: &ExamConfig,
        responses: &HashMap<String, Option<Answer>>,
    ) -> AppResult<GradeReport> {
        // 作答映射与试卷的契约校验
        for question_id in responses.keys() {
            if exam.question(question_id).is_none() {
                return Err(GradingError::UnknownQuestionId {
                    question_id: question_id.clone(),
                }
                .into());
            }
        }

        let mut details = Vec::with_capacity(exam.total_questions());
        for question in exam.flattened() {
            let given = responses.get(&question.id).cloned().flatten();
            let attempted = given.is_some();
            let is_correct = given
                .as_ref()
                .map(|answer| Self::answer_matches(&question.kind, answer))
                .unwrap_or(false);

            debug!(
                "判分: 题目 {} ({}) 作答 {:?} → {}",
                question.id,
                question.kind.name(),
                given.as_ref().map(|a| a.to_string()),
                if is_correct { "正确" } else { "错误/未作答" }
            );

            details.push(QuestionGrade {
                question_id: question.id.clone(),
                question_number: question.question_number,
                section_name: question.section_name.clone(),
                kind: question.kind.name(),
                given,
                correct_answer: question.kind.correct_answer(),
                attempted,
                is_correct,
            });
        }

        let total = details.len();
        let attempted = details.iter().filter(|d| d.attempted).count();
        let correct = details.iter().filter(|d| d.is_correct).count();

        Ok(GradeReport {
            exam_title: exam.title.clone(),
            graded_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total,
            attempted,
            correct,
            incorrect: attempted - correct,
            unattempted: total - attempted,
            details,
        })
    }

    /// 单题比对
    fn answer_matches(kind: &QuestionKind, given: &Answer) -> bool {
        match kind {
            QuestionKind::Mcq { correct_answer, .. } => match given {
                Answer::Single(s) => s == correct_answer,
                Answer::Multiple(_) => {
                    warn!("⚠️ 单选题收到数组作答，按错误处理");
                    false
                }
            },
            QuestionKind::Msq { correct_answer, .. } => {
                // 集合相等，与顺序无关
                let expected: BTreeSet<&str> =
                    correct_answer.iter().map(|s| s.as_str()).collect();
                let actual: BTreeSet<&str> = match given {
                    Answer::Single(s) => std::iter::once(s.as_str()).collect(),
                    Answer::Multiple(items) => items.iter().map(|s| s.as_str()).collect(),
                };
                expected == actual
            }
            QuestionKind::Numerical { correct_answer } => match given {
                Answer::Single(s) => Self::numeric_equal(s, correct_answer),
                Answer::Multiple(_) => {
                    warn!("⚠️ 数值题收到数组作答，按错误处理");
                    false
                }
            },
        }
    }

    /// 数值比较：两边都能解析为浮点数时按数值比，否则按去空格文本比
    fn numeric_equal(given: &str, expected: &str) -> bool {
        match (given.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => (a - b).abs() < 1e-9,
            _ => given.trim() == expected.trim(),
        }
    }
}

impl Default for GradingService {
    fn default() -> Self {
        Self::new()
    }
}
