//! 考试会话引擎
//!
//! 持有试卷定义和会话状态，暴露导航、作答、标记、交卷操作。
//!
//! 约定（对外永不 panic）：
//! - 越界的导航目标：告警并忽略
//! - 交卷后的任何变更操作：静默忽略（会话冻结）
//! - 交卷本身只允许一次，重复交卷返回错误

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{AppResult, SessionError};
use crate::models::exam::{Answer, ExamConfig, ExamQuestion};
use crate::models::language::Language;
use crate::session::state::{QuestionState, SessionState, SessionStats};

/// 展开后的题目定位
#[derive(Debug, Clone)]
struct FlatEntry {
    section_index: usize,
    question_index: usize,
    question_id: String,
}

/// 考试会话
pub struct ExamSession {
    config: ExamConfig,
    flat: Vec<FlatEntry>,
    state: SessionState,
}

impl ExamSession {
    /// 创建新的考试会话
    ///
    /// 校验试卷结构，为每道题建立初始作答状态，并进入第一题。
    pub fn new(config: ExamConfig, language: Language) -> AppResult<Self> {
        config.validate()?;

        let mut flat = Vec::with_capacity(config.total_questions());
        for (section_index, section) in config.sections.iter().enumerate() {
            for (question_index, question) in section.questions.iter().enumerate() {
                flat.push(FlatEntry {
                    section_index,
                    question_index,
                    question_id: question.id.clone(),
                });
            }
        }

        let state = SessionState::new(
            flat.iter().map(|entry| entry.question_id.clone()),
            language,
        );

        let mut session = Self {
            config,
            flat,
            state,
        };

        // 开考即显示第一题
        session.visit_current();

        info!(
            "📝 会话已创建: {} ({} 道题, 时长 {} 分钟)",
            session.config.title,
            session.flat.len(),
            session.config.total_duration
        );

        Ok(session)
    }

    // ========== 只读访问 ==========

    pub fn exam(&self) -> &ExamConfig {
        &self.config
    }

    pub fn total_questions(&self) -> usize {
        self.flat.len()
    }

    pub fn current_flat_index(&self) -> usize {
        self.state.current_question_index
    }

    pub fn current_section_index(&self) -> usize {
        self.state.current_section_index
    }

    /// 当前题目
    pub fn current_question(&self) -> &ExamQuestion {
        let entry = &self.flat[self.state.current_question_index];
        &self.config.sections[entry.section_index].questions[entry.question_index]
    }

    /// 查询某道题的作答状态
    pub fn question_state(&self, question_id: &str) -> Option<&QuestionState> {
        self.state.question_states.get(question_id)
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    pub fn is_submitted(&self) -> bool {
        self.state.submitted
    }

    /// 交卷前确认弹窗所需的统计
    pub fn stats(&self) -> SessionStats {
        self.state.stats()
    }

    /// 提取作答映射：每道题一条，未作答为 None
    pub fn responses(&self) -> HashMap<String, Option<Answer>> {
        self.state
            .question_states
            .iter()
            .map(|(id, state)| (id.clone(), state.selected_answer.clone()))
            .collect()
    }

    // ========== 导航 ==========

    /// 跳转到指定题目（全卷展开后的下标）
    ///
    /// 目标题目若是未浏览状态，进入时迁移为未作答；越界则忽略。
    pub fn navigate_to_question(&mut self, flat_index: usize) {
        if self.frozen("跳转题目") {
            return;
        }
        if flat_index >= self.flat.len() {
            warn!(
                "⚠️ 导航目标越界: {} (共 {} 题)，已忽略",
                flat_index,
                self.flat.len()
            );
            return;
        }

        self.state.current_question_index = flat_index;
        self.state.current_section_index = self.flat[flat_index].section_index;
        self.visit_current();
    }

    /// 跳转到指定章节的第一题
    pub fn navigate_to_section(&mut self, section_index: usize) {
        if self.frozen("跳转章节") {
            return;
        }

        match self
            .flat
            .iter()
            .position(|entry| entry.section_index == section_index)
        {
            Some(flat_index) => self.navigate_to_question(flat_index),
            None => {
                warn!(
                    "⚠️ 章节下标越界: {} (共 {} 个章节)，已忽略",
                    section_index,
                    self.config.sections.len()
                );
            }
        }
    }

    /// 下一题（跨章节连续；最后一题时原地不动）
    pub fn go_to_next(&mut self) {
        if self.frozen("下一题") {
            return;
        }

        let next = self.state.current_question_index + 1;
        if next < self.flat.len() {
            self.navigate_to_question(next);
        } else {
            debug!("已是最后一题，导航忽略");
        }
    }

    /// 上一题（第一题时原地不动）
    pub fn go_to_previous(&mut self) {
        if self.frozen("上一题") {
            return;
        }

        if self.state.current_question_index > 0 {
            let prev = self.state.current_question_index - 1;
            self.navigate_to_question(prev);
        } else {
            debug!("已是第一题，导航忽略");
        }
    }

    // ========== 作答 ==========

    /// 保存作答
    ///
    /// 空白作答等同于清除，避免"有答案记录但内容为空"的状态。
    pub fn save_answer(&mut self, question_id: &str, answer: Answer) {
        if self.frozen("保存作答") {
            return;
        }

        if answer.is_blank() {
            self.clear_response(question_id);
            return;
        }

        match self.state.question_states.get_mut(question_id) {
            Some(state) => {
                state.set_answer(answer);
                debug!("💾 题目 {} 作答已保存 ({})", question_id, state.status);
            }
            None => warn!("⚠️ 题目ID不存在: {}，作答已忽略", question_id),
        }
    }

    /// 清除作答（标记待复查不受影响）
    pub fn clear_response(&mut self, question_id: &str) {
        if self.frozen("清除作答") {
            return;
        }

        match self.state.question_states.get_mut(question_id) {
            Some(state) => {
                state.clear_answer();
                debug!("🧹 题目 {} 作答已清除 ({})", question_id, state.status);
            }
            None => warn!("⚠️ 题目ID不存在: {}，清除已忽略", question_id),
        }
    }

    /// 标记题目待复查（不导航）
    pub fn mark_for_review(&mut self, question_id: &str) {
        if self.frozen("标记待复查") {
            return;
        }

        match self.state.question_states.get_mut(question_id) {
            Some(state) => {
                state.mark();
                debug!("🔖 题目 {} 已标记 ({})", question_id, state.status);
            }
            None => warn!("⚠️ 题目ID不存在: {}，标记已忽略", question_id),
        }
    }

    /// 标记当前题目待复查并进入下一题
    pub fn mark_for_review_and_next(&mut self) {
        if self.frozen("标记待复查") {
            return;
        }

        let question_id = self.flat[self.state.current_question_index]
            .question_id
            .clone();
        self.mark_for_review(&question_id);
        self.go_to_next();
    }

    /// 保存当前题目作答并进入下一题
    pub fn save_and_next(&mut self, answer: Option<Answer>) {
        if self.frozen("保存并下一题") {
            return;
        }

        if let Some(answer) = answer {
            let question_id = self.flat[self.state.current_question_index]
                .question_id
                .clone();
            self.save_answer(&question_id, answer);
        }
        self.go_to_next();
    }

    // ========== 会话级操作 ==========

    pub fn set_language(&mut self, language: Language) {
        if self.frozen("切换语言") {
            return;
        }
        self.state.language = language;
        info!("🌐 作答语言切换为 {}", language.name());
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.frozen("暂停/恢复") {
            return;
        }
        self.state.is_paused = paused;
    }

    /// 交卷
    ///
    /// 一次性操作：置位 submitted 并冻结全部状态，返回完整作答映射。
    /// 重复交卷返回错误，由调用方的幂等保护兜底。
    pub fn submit(&mut self) -> AppResult<HashMap<String, Option<Answer>>> {
        if self.state.submitted {
            return Err(SessionError::AlreadySubmitted.into());
        }

        self.state.submitted = true;
        let stats = self.stats();
        info!("📤 交卷完成: {}", stats);

        Ok(self.responses())
    }

    // ========== 内部辅助 ==========

    /// 当前题目进入浏览状态
    fn visit_current(&mut self) {
        let question_id = &self.flat[self.state.current_question_index].question_id;
        if let Some(state) = self.state.question_states.get_mut(question_id) {
            state.visit();
        }
    }

    /// 会话冻结检查：已交卷时记录并拒绝变更
    fn frozen(&self, operation: &str) -> bool {
        if self.state.submitted {
            debug!("会话已冻结，忽略操作: {}", operation);
            true
        } else {
            false
        }
    }
}
