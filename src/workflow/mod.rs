pub mod scenario_ctx;
pub mod scenario_flow;

pub use scenario_ctx::ScenarioCtx;
pub use scenario_flow::{ReplayOutcome, ReplayResult, ScenarioFlow};
