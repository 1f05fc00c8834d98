//! 会话引擎集成测试
//!
//! 覆盖完整走卷路径：作答、标记、统计、交卷、冻结。

use exam_session_engine::models::Answer;
use exam_session_engine::{ExamConfig, ExamSession, GradingService, Language, QuestionStatus};

/// 三道单选题的试卷（q1 正确答案 A，q2 正确答案 B，q3 正确答案 C）
fn three_question_exam() -> ExamConfig {
    let raw = r#"
title = "走卷测试卷"
total_duration = 30

[[sections]]
id = "sec-1"
name = "第一部分"
questions_count = 3

[[sections.questions]]
id = "q1"
question_number = 1
type = "mcq"
question = "<p>第一题</p>"
correct_answer = "A"

[[sections.questions.options]]
id = "A"
text = "甲"

[[sections.questions.options]]
id = "B"
text = "乙"

[[sections.questions]]
id = "q2"
question_number = 2
type = "mcq"
question = "<p>第二题</p>"
correct_answer = "B"

[[sections.questions.options]]
id = "A"
text = "甲"

[[sections.questions.options]]
id = "B"
text = "乙"

[[sections.questions]]
id = "q3"
question_number = 3
type = "mcq"
question = "<p>第三题</p>"
correct_answer = "C"

[[sections.questions.options]]
id = "C"
text = "丙"

[[sections.questions.options]]
id = "D"
text = "丁"
"#;

    let mut exam: ExamConfig = toml::from_str(raw).expect("试卷TOML应能解析");
    exam.normalize();
    exam
}

/// 考生答了 q1、标记了 q2、从未进入 q3：
/// 统计应为 已作答1 / 标记1 / 未浏览1 / 未作答0，
/// 交卷后 responses 覆盖全部三题。
#[test]
fn test_answer_mark_skip_walkthrough() {
    let mut session =
        ExamSession::new(three_question_exam(), Language::English).expect("会话应能创建");

    // q1 作答
    session.save_answer("q1", Answer::Single("A".to_string()));

    // 进入 q2 并标记（不再前进，q3 保持未浏览）
    session.go_to_next();
    session.mark_for_review("q2");

    let stats = session.stats();
    assert_eq!(stats.answered, 1);
    assert_eq!(stats.marked_for_review, 1);
    assert_eq!(stats.not_visited, 1);
    assert_eq!(stats.not_answered, 0);
    assert_eq!(stats.total(), 3);

    let responses = session.submit().expect("首次交卷应成功");
    assert_eq!(responses.len(), 3);
    assert_eq!(
        responses.get("q1").unwrap(),
        &Some(Answer::Single("A".to_string()))
    );
    assert_eq!(responses.get("q2").unwrap(), &None);
    assert_eq!(responses.get("q3").unwrap(), &None);

    // 判分：q1 对，其余未作答
    let report = GradingService::new()
        .grade(session.exam(), &responses)
        .expect("判分应成功");
    assert_eq!(report.correct, 1);
    assert_eq!(report.attempted, 1);
    assert_eq!(report.unattempted, 2);
}

/// 交卷后的会话完全冻结：作答、清除、标记、导航、统计都不再变化。
#[test]
fn test_session_frozen_after_submit() {
    let mut session =
        ExamSession::new(three_question_exam(), Language::English).expect("会话应能创建");

    session.save_answer("q1", Answer::Single("A".to_string()));
    session.submit().expect("首次交卷应成功");

    let stats_before = session.stats();

    session.save_answer("q2", Answer::Single("B".to_string()));
    session.clear_response("q1");
    session.mark_for_review("q3");
    session.navigate_to_question(2);
    session.set_language(Language::Hindi);

    assert_eq!(session.stats(), stats_before);
    assert_eq!(session.current_flat_index(), 0);
    assert_eq!(session.language(), Language::English);
    assert_eq!(
        session.question_state("q1").unwrap().selected_answer,
        Some(Answer::Single("A".to_string()))
    );

    // 重复交卷被拒绝
    assert!(session.submit().is_err());
}

/// 任意操作序列之后，状态与答案的一致性不变式始终成立。
#[test]
fn test_state_answer_consistency_through_mixed_ops() {
    let mut session =
        ExamSession::new(three_question_exam(), Language::English).expect("会话应能创建");

    session.save_answer("q1", Answer::Single("B".to_string()));
    session.mark_for_review("q1");
    session.clear_response("q1");
    session.go_to_next();
    session.save_and_next(Some(Answer::Single("B".to_string())));
    session.mark_for_review_and_next();
    session.go_to_previous();
    session.navigate_to_question(0);
    session.save_answer("q1", Answer::Single("A".to_string()));

    for id in ["q1", "q2", "q3"] {
        let state = session.question_state(id).expect("每道题都应有状态");
        assert!(
            state.is_consistent(),
            "题目 {} 状态与答案不一致: {:?}",
            id,
            state
        );
    }

    // q1 清除后重新作答，标记应保留
    assert_eq!(
        session.question_state("q1").unwrap().status,
        QuestionStatus::AnsweredAndMarked
    );
}
