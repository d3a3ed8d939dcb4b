pub mod context;
pub mod hook;
pub mod message;

pub use context::{ContextEstimate, ContextSource, ContextWarning};
pub use hook::{HookCost, HookJson, HookModel, HookWorkspace};
pub use message::{MessageUsage, TranscriptLine};
