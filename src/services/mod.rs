pub mod grading_service;
pub mod report_writer;

pub use grading_service::{GradeReport, GradingService, QuestionGrade};
pub use report_writer::ReportWriter;
