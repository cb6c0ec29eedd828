pub mod control;
pub mod pacer;
pub mod session;

pub use control::{delay_for_speed, RunControl, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
pub use pacer::{Pacer, RunReport, RunStatus};
pub use session::{Phase, Session};
