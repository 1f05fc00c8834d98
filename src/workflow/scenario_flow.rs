//! 场景回放流程 - 流程层
//!
//! 核心职责：定义"一次考试"的完整回放流程
//!
//! 流程顺序：
//! 1. 建立会话 + 倒计时器
//! 2. 按记录顺序回放考生操作（时间流逝由 tick 推进）
//! 3. 交卷（主动交卷或到时自动交卷）→ 判分 → 写报告

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::exam::Answer;
use crate::models::language::Language;
use crate::models::scenario::{Scenario, ScenarioAction};
use crate::services::{GradeReport, GradingService, ReportWriter};
use crate::session::ExamSession;
use crate::timer::{CountdownTimer, TimerEvent};
use crate::utils::logging::truncate_text;
use crate::utils::markup::strip_tags;
use crate::workflow::scenario_ctx::ScenarioCtx;

/// 场景回放结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayResult {
    /// 考生主动交卷
    Submitted,
    /// 时间耗尽自动交卷
    AutoSubmitted,
    /// 回放结束但未交卷（不判分）
    Abandoned,
}

/// 场景回放产出
#[derive(Debug)]
pub struct ReplayOutcome {
    pub result: ReplayResult,
    pub report: Option<GradeReport>,
}

/// 场景回放流程
///
/// - 编排完整的回放流程
/// - 决定何时推进时间、何时交卷、何时判分
/// - 只依赖业务能力（services）和会话引擎
pub struct ScenarioFlow {
    grading_service: GradingService,
    report_writer: ReportWriter,
    warning_threshold_secs: u64,
    default_language: Language,
    verbose_logging: bool,
}

impl ScenarioFlow {
    /// 创建新的场景回放流程
    pub fn new(config: &Config) -> Self {
        Self {
            grading_service: GradingService::new(),
            report_writer: ReportWriter::new(config.report_folder.clone()),
            warning_threshold_secs: config.warning_threshold_secs,
            default_language: Language::from_code(&config.default_language)
                .unwrap_or_default(),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self, scenario: &Scenario, ctx: &ScenarioCtx) -> Result<ReplayOutcome> {
        let language = scenario
            .language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(self.default_language);

        let mut session = ExamSession::new(scenario.exam.clone(), language)?;
        let mut timer = self.build_timer(scenario.exam.total_duration_secs())?;

        info!(
            "[场景 {}] ▶️ 开始回放: {} ({} 条操作, 时长 {})",
            ctx.scenario_index,
            scenario.name,
            scenario.actions.len(),
            timer.format_remaining()
        );

        let mut result = ReplayResult::Abandoned;

        for action in &scenario.actions {
            match action {
                ScenarioAction::Navigate { index } => session.navigate_to_question(*index),
                ScenarioAction::Section { index } => session.navigate_to_section(*index),
                ScenarioAction::Next => session.go_to_next(),
                ScenarioAction::Prev => session.go_to_previous(),
                ScenarioAction::Answer {
                    question_id,
                    answer,
                } => {
                    let target = question_id
                        .clone()
                        .unwrap_or_else(|| session.current_question().id.clone());
                    self.log_answer(ctx, &session, &target, answer);
                    session.save_answer(&target, answer.clone());
                }
                ScenarioAction::Clear { question_id } => {
                    let target = question_id
                        .clone()
                        .unwrap_or_else(|| session.current_question().id.clone());
                    session.clear_response(&target);
                }
                ScenarioAction::Mark { question_id } => {
                    let target = question_id
                        .clone()
                        .unwrap_or_else(|| session.current_question().id.clone());
                    session.mark_for_review(&target);
                }
                ScenarioAction::MarkNext => session.mark_for_review_and_next(),
                ScenarioAction::SaveNext { answer } => session.save_and_next(answer.clone()),
                ScenarioAction::Tick { seconds } => {
                    let time_up = self.apply_ticks(ctx, &mut timer, *seconds);
                    if time_up {
                        // 到时自动交卷（幂等保护：已交卷则只记录）
                        if session.is_submitted() {
                            debug!("[场景 {}] 到时事件到达时已交卷", ctx.scenario_index);
                        } else {
                            warn!(
                                "[场景 {}] ⏰ 时间耗尽，自动交卷",
                                ctx.scenario_index
                            );
                            session.submit()?;
                            result = ReplayResult::AutoSubmitted;
                        }
                        break;
                    }
                }
                ScenarioAction::Pause => {
                    timer.pause();
                    session.set_paused(true);
                    debug!(
                        "[场景 {}] ⏸️ 暂停 (剩余 {})",
                        ctx.scenario_index,
                        timer.format_remaining()
                    );
                }
                ScenarioAction::Resume => {
                    timer.resume();
                    session.set_paused(false);
                    debug!(
                        "[场景 {}] ▶️ 恢复 (剩余 {})",
                        ctx.scenario_index,
                        timer.format_remaining()
                    );
                }
                ScenarioAction::Language { code } => match Language::from_code(code) {
                    Some(language) => session.set_language(language),
                    None => warn!(
                        "[场景 {}] ⚠️ 未知语言代码: {}，已忽略",
                        ctx.scenario_index, code
                    ),
                },
                ScenarioAction::Submit => {
                    if session.is_submitted() {
                        debug!("[场景 {}] 重复的交卷操作，已忽略", ctx.scenario_index);
                        continue;
                    }
                    // 确认弹窗展示的统计
                    info!(
                        "[场景 {}] 📊 交卷确认: {}",
                        ctx.scenario_index,
                        session.stats()
                    );
                    session.submit()?;
                    result = ReplayResult::Submitted;
                }
            }

            if session.is_submitted() && matches!(result, ReplayResult::Submitted) {
                break;
            }
        }

        if !session.is_submitted() {
            warn!(
                "[场景 {}] ⚠️ 回放结束但未交卷，不判分 (剩余 {})",
                ctx.scenario_index,
                timer.format_remaining()
            );
            return Ok(ReplayOutcome {
                result: ReplayResult::Abandoned,
                report: None,
            });
        }

        // 判分并写报告
        let responses = session.responses();
        let report = self.grading_service.grade(session.exam(), &responses)?;

        info!("[场景 {}] ✓ 判分完成: {}", ctx.scenario_index, report);

        let path = self.report_writer.write(&scenario.name, &report).await?;
        info!(
            "[场景 {}] 📄 报告已写入: {}",
            ctx.scenario_index,
            path.display()
        );

        Ok(ReplayOutcome {
            result,
            report: Some(report),
        })
    }

    /// 创建倒计时器，预警阈值不合法时退化为不预警
    fn build_timer(&self, total_seconds: u64) -> Result<CountdownTimer> {
        let warning_at = if self.warning_threshold_secs > 0
            && self.warning_threshold_secs < total_seconds
        {
            Some(self.warning_threshold_secs)
        } else {
            debug!(
                "预警阈值 {} 秒对总时长 {} 秒不适用，跳过预警",
                self.warning_threshold_secs, total_seconds
            );
            None
        };

        Ok(CountdownTimer::new(total_seconds, warning_at)?)
    }

    /// 推进时间并处理计时事件
    ///
    /// # 返回
    /// 返回是否触发了到时事件
    fn apply_ticks(&self, ctx: &ScenarioCtx, timer: &mut CountdownTimer, seconds: u64) -> bool {
        let mut time_up = false;
        for event in timer.advance(seconds) {
            match event {
                TimerEvent::Warning { remaining } => {
                    warn!(
                        "[场景 {}] ⏰ 剩余时间预警: 还剩 {} 秒",
                        ctx.scenario_index, remaining
                    );
                }
                TimerEvent::TimeUp => {
                    time_up = true;
                }
                TimerEvent::Tick { .. } => {}
            }
        }
        time_up
    }

    // ========== 日志辅助方法 ==========

    /// 显示作答信息（详细日志模式）
    fn log_answer(
        &self,
        ctx: &ScenarioCtx,
        session: &ExamSession,
        question_id: &str,
        answer: &Answer,
    ) {
        if !self.verbose_logging {
            return;
        }

        if let Some(question) = session.exam().question(question_id) {
            info!(
                "[场景 {}] 💾 作答 {} ({}): {} | 题干: {}",
                ctx.scenario_index,
                question_id,
                question.kind.name(),
                answer,
                truncate_text(&strip_tags(&question.question), 60)
            );

            let images = question.image_urls();
            if !images.is_empty() {
                debug!(
                    "[场景 {}] 题目 {} 附带 {} 张图片",
                    ctx.scenario_index,
                    question_id,
                    images.len()
                );
            }
        }
    }
}
