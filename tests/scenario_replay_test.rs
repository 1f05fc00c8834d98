//! 场景回放集成测试
//!
//! 用内联 TOML 场景走完整流程：回放 → 交卷/超时 → 判分 → 报告落盘。

use std::path::PathBuf;

use exam_session_engine::models::load_all_toml_files;
use exam_session_engine::{Config, ReplayResult, Scenario, ScenarioCtx, ScenarioFlow};

/// 测试专用配置：报告写进独立的临时目录
fn test_config(tag: &str) -> Config {
    let report_folder: PathBuf = std::env::temp_dir().join(format!(
        "exam_session_engine_test_{}_{}",
        std::process::id(),
        tag
    ));

    Config {
        report_folder: report_folder.to_string_lossy().to_string(),
        verbose_logging: true,
        ..Config::default()
    }
}

fn parse_scenario(raw: &str) -> Scenario {
    let mut scenario: Scenario = toml::from_str(raw).expect("场景TOML应能解析");
    scenario.exam.normalize();
    scenario
}

/// 两道题的小场景：q1 作答正确后主动交卷
const SUBMITTED_SCENARIO: &str = r#"
name = "replay_submitted"
candidate = "C-001"
language = "en"

[exam]
title = "回放测试卷"
total_duration = 10

[[exam.sections]]
id = "sec-1"
name = "第一部分"
questions_count = 2

[[exam.sections.questions]]
id = "q1"
question_number = 1
type = "mcq"
question = "<p>1+1=?</p>"
correct_answer = "B"

[[exam.sections.questions.options]]
id = "A"
text = "1"

[[exam.sections.questions.options]]
id = "B"
text = "2"

[[exam.sections.questions]]
id = "q2"
question_number = 2
type = "msq"
question = "<p>哪些是偶数?</p>"
correct_answer = ["A", "C"]

[[exam.sections.questions.options]]
id = "A"
text = "2"

[[exam.sections.questions.options]]
id = "B"
text = "3"

[[exam.sections.questions.options]]
id = "C"
text = "4"

[[actions]]
kind = "answer"
answer = "B"

[[actions]]
kind = "next"

[[actions]]
kind = "answer"
answer = ["C", "A"]

[[actions]]
kind = "tick"
seconds = 60

[[actions]]
kind = "submit"
"#;

#[tokio::test]
async fn test_replay_submitted_scenario() {
    let config = test_config("submitted");
    let flow = ScenarioFlow::new(&config);
    let scenario = parse_scenario(SUBMITTED_SCENARIO);
    let ctx = ScenarioCtx::new(scenario.name.clone(), 1, scenario.candidate.clone());

    let outcome = flow.run(&scenario, &ctx).await.expect("回放应成功");

    assert_eq!(outcome.result, ReplayResult::Submitted);
    let report = outcome.report.expect("交卷后应有判分报告");
    assert_eq!(report.total, 2);
    assert_eq!(report.attempted, 2);
    // q1 正确；q2 多选乱序作答也应判对
    assert_eq!(report.correct, 2);

    // 报告文件已落盘
    let report_path = PathBuf::from(&config.report_folder).join("replay_submitted.json");
    assert!(report_path.exists(), "应存在报告文件 {:?}", report_path);
}

/// 时间耗尽：1分钟的考试 tick 了120秒，应自动交卷并判分
#[tokio::test]
async fn test_replay_auto_submit_on_expiry() {
    let raw = r#"
name = "replay_timeout"
language = "en"

[exam]
title = "超时测试卷"
total_duration = 1

[[exam.sections]]
id = "sec-1"
name = "第一部分"
questions_count = 1

[[exam.sections.questions]]
id = "q1"
question_number = 1
type = "numerical"
question = "<p>3*4=?</p>"
correct_answer = "12"

[[actions]]
kind = "answer"
answer = "12"

[[actions]]
kind = "tick"
seconds = 120

[[actions]]
kind = "clear"
"#;

    let config = test_config("timeout");
    let flow = ScenarioFlow::new(&config);
    let scenario = parse_scenario(raw);
    let ctx = ScenarioCtx::new(scenario.name.clone(), 2, None);

    let outcome = flow.run(&scenario, &ctx).await.expect("回放应成功");

    assert_eq!(outcome.result, ReplayResult::AutoSubmitted);
    let report = outcome.report.expect("自动交卷后应有判分报告");
    // 到时后的 clear 操作不生效，作答保留
    assert_eq!(report.attempted, 1);
    assert_eq!(report.correct, 1);
}

/// 回放结束但未交卷：不判分、无报告
#[tokio::test]
async fn test_replay_abandoned_scenario() {
    let raw = r#"
name = "replay_abandoned"

[exam]
title = "弃考测试卷"
total_duration = 10

[[exam.sections]]
id = "sec-1"
name = "第一部分"
questions_count = 1

[[exam.sections.questions]]
id = "q1"
question_number = 1
type = "mcq"
question = "<p>随便选</p>"
correct_answer = "A"

[[exam.sections.questions.options]]
id = "A"
text = "甲"

[[actions]]
kind = "answer"
answer = "A"

[[actions]]
kind = "tick"
seconds = 30
"#;

    let config = test_config("abandoned");
    let flow = ScenarioFlow::new(&config);
    let scenario = parse_scenario(raw);
    let ctx = ScenarioCtx::new(scenario.name.clone(), 3, None);

    let outcome = flow.run(&scenario, &ctx).await.expect("回放应成功");

    assert_eq!(outcome.result, ReplayResult::Abandoned);
    assert!(outcome.report.is_none());
}

/// 仓库自带的样例场景都应能加载并通过结构校验
#[tokio::test]
async fn test_bundled_scenarios_load() {
    let scenarios = load_all_toml_files("scenarios")
        .await
        .expect("应能读取 scenarios 目录");

    assert!(!scenarios.is_empty(), "scenarios 目录应包含样例场景");

    for scenario in &scenarios {
        scenario
            .exam
            .validate()
            .unwrap_or_else(|e| panic!("场景 {} 的试卷校验失败: {}", scenario.name, e));
        assert!(
            !scenario.actions.is_empty(),
            "场景 {} 应包含操作记录",
            scenario.name
        );
    }
}
