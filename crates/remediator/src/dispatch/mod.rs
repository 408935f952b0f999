pub mod engine;
pub mod executor;

pub use engine::{resolve, ActionResult, DispatchEngine, DispatchReport, SkipReason};
pub use executor::{ActionExecutor, ActionOutcome, DEFAULT_ACTION_TIMEOUT};
