pub mod countdown;
pub mod driver;

pub use countdown::{CountdownTimer, TimerEvent};
pub use driver::{spawn_countdown, TimerCommand, TimerHandle};
