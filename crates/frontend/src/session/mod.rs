pub mod context;
pub mod state;
pub mod storage;

pub use context::{SessionContext, View};
pub use state::{SelectAction, SessionState};
