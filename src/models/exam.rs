use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppResult, SessionError};

/// 考生作答内容
///
/// 单选/数值题为单个字符串，多选题为字符串数组。
/// TOML/JSON 中既可以写字符串也可以写数组，反序列化时自动识别。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// 单个选项ID或数值文本
    Single(String),
    /// 多个选项ID
    Multiple(Vec<String>),
}

impl Answer {
    /// 作答内容是否为空白
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Single(s) => s.trim().is_empty(),
            Answer::Multiple(items) => items.is_empty(),
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Single(s) => write!(f, "{}", s),
            Answer::Multiple(items) => write!(f, "{}", items.join(",")),
        }
    }
}

/// 选择题选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// 题型
///
/// 按题型携带各自合法的字段：选择题有选项列表，数值题没有。
/// 标准答案的形态也由题型决定，非法组合无法表示出来。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    /// 单选题
    Mcq {
        options: Vec<AnswerOption>,
        correct_answer: String,
    },
    /// 多选题
    Msq {
        options: Vec<AnswerOption>,
        correct_answer: Vec<String>,
    },
    /// 数值题
    Numerical { correct_answer: String },
}

impl QuestionKind {
    /// 获取题型标准名称
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::Mcq { .. } => "单选题",
            QuestionKind::Msq { .. } => "多选题",
            QuestionKind::Numerical { .. } => "数值题",
        }
    }

    /// 获取标准答案
    pub fn correct_answer(&self) -> Answer {
        match self {
            QuestionKind::Mcq { correct_answer, .. } => Answer::Single(correct_answer.clone()),
            QuestionKind::Msq { correct_answer, .. } => Answer::Multiple(correct_answer.clone()),
            QuestionKind::Numerical { correct_answer } => Answer::Single(correct_answer.clone()),
        }
    }

    /// 获取选项列表（数值题返回 None）
    pub fn options(&self) -> Option<&[AnswerOption]> {
        match self {
            QuestionKind::Mcq { options, .. } | QuestionKind::Msq { options, .. } => {
                Some(options.as_slice())
            }
            QuestionKind::Numerical { .. } => None,
        }
    }
}

/// 试卷题目
///
/// 加载完成后不可变；`section_id` / `section_name` 由所属章节在
/// 加载阶段回填，场景文件中不需要重复书写。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub id: String,
    /// 题号（从1开始，跨章节连续）
    pub question_number: u32,
    #[serde(default)]
    pub section_id: String,
    #[serde(default)]
    pub section_name: String,
    /// 题干（HTML 标记文本）
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl ExamQuestion {
    /// 收集题目关联的全部图片URL（显式字段 + 题干标记内嵌的图片）
    pub fn image_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        if let Some(url) = &self.image_url {
            urls.push(url.clone());
        }
        urls.extend(crate::utils::markup::extract_image_urls(&self.question));
        urls
    }
}

/// 试卷章节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSection {
    pub id: String,
    pub name: String,
    /// 声明的题目数量，与 questions 长度不一致时仅告警
    pub questions_count: usize,
    pub questions: Vec<ExamQuestion>,
}

/// 试卷定义
///
/// 由外部内容管理方提供，本引擎只读取。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamConfig {
    pub title: String,
    /// 考试总时长（分钟）
    pub total_duration: u64,
    pub sections: Vec<ExamSection>,
}

impl ExamConfig {
    /// 考试总时长（秒）
    pub fn total_duration_secs(&self) -> u64 {
        self.total_duration * 60
    }

    /// 全卷题目总数
    pub fn total_questions(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// 按章节顺序展开的题目列表
    pub fn flattened(&self) -> Vec<&ExamQuestion> {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .collect()
    }

    /// 按ID查找题目
    pub fn question(&self, question_id: &str) -> Option<&ExamQuestion> {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .find(|q| q.id == question_id)
    }

    /// 回填题目的章节信息并校验题目数量声明
    pub fn normalize(&mut self) {
        for section in &mut self.sections {
            if section.questions_count != section.questions.len() {
                warn!(
                    "⚠️ 章节 {} 声明了 {} 道题，实际包含 {} 道",
                    section.id,
                    section.questions_count,
                    section.questions.len()
                );
            }
            for question in &mut section.questions {
                question.section_id = section.id.clone();
                question.section_name = section.name.clone();
            }
        }
    }

    /// 校验试卷结构
    ///
    /// # 返回
    /// 空卷或题目ID重复时返回错误
    pub fn validate(&self) -> AppResult<()> {
        if self.total_questions() == 0 {
            return Err(SessionError::EmptyExam.into());
        }

        let mut seen = std::collections::HashSet::new();
        for question in self.flattened() {
            if !seen.insert(question.id.as_str()) {
                return Err(SessionError::DuplicateQuestionId {
                    question_id: question.id.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}
