pub mod log;
pub mod plan;

pub use log::{LogError, UndoRequest, UpdateLog, UpdateLogEntry};
pub use plan::{plan_updates, PlannedUpdate};
