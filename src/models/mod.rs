pub mod exam;
pub mod language;
pub mod loaders;
pub mod scenario;

pub use exam::{Answer, AnswerOption, ExamConfig, ExamQuestion, ExamSection, QuestionKind};
pub use language::Language;
pub use loaders::{load_all_toml_files, load_toml_to_scenario};
pub use scenario::{Scenario, ScenarioAction};
