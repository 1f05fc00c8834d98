pub mod app;
pub mod batch_runner;

pub use app::App;
pub use batch_runner::{process_all_scenarios, ProcessingStats};
