pub mod control;
pub mod handler;
pub mod shared_context;
pub mod stage;

// Re-export key types for easier access from other pipekit modules (and lib.rs)
pub use control::{PipelineControl, PipelineResult};
pub use handler::{AsyncHandler, FnHandler, Handler};
pub use shared_context::SharedContext;
pub use stage::Stage;
