//! # Exam Session Engine
//!
//! 考试会话引擎：状态机 + 倒计时 + 判分 + 场景批量回放
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 试卷/题目/作答/场景的数据定义与 TOML 加载
//! - 试卷由外部内容管理方提供，加载后不可变
//!
//! ### ② 会话层（Session）
//! - `session/` - 考试会话核心状态机
//! - `QuestionStatus` - 五状态题目状态机（显式迁移表）
//! - `ExamSession` - 导航、作答、标记、交卷；交卷后整体冻结
//!
//! ### ③ 计时层（Timer）
//! - `timer/` - 倒计时状态机 + tokio 真实时钟驱动
//! - 预警和到时事件各只发一次，到时自动交卷由宿主决定
//!
//! ### ④ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次考试
//! - `GradingService` - 判分能力（单选精确 / 多选集合 / 数值比较）
//! - `ReportWriter` - 写判分报告能力
//!
//! ### ⑤ 流程层（Workflow）
//! - `workflow/` - 定义"一次考试"的完整回放流程
//! - `ScenarioCtx` - 上下文封装（场景名 + 场景序号）
//! - `ScenarioFlow` - 流程编排（回放 → 交卷 → 判分 → 报告）
//!
//! ### ⑥ 编排层（Orchestration）
//! - `orchestrator/` - 批量场景处理器，管理资源和并发
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod timer;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Answer, ExamConfig, ExamQuestion, ExamSection, Language, QuestionKind};
pub use models::{Scenario, ScenarioAction};
pub use orchestrator::App;
pub use services::{GradeReport, GradingService, ReportWriter};
pub use session::{ExamSession, QuestionStatus, SessionStats};
pub use timer::{spawn_countdown, CountdownTimer, TimerCommand, TimerEvent};
pub use workflow::{ReplayOutcome, ReplayResult, ScenarioCtx, ScenarioFlow};
