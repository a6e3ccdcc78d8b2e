// src/lib.rs

//! pipekit: an ordered handler pipeline for Rust.
//!
//! A `Pipeline` runs a value through a list of handler stages with:
//!  - Per-stage filtering via `can_process`.
//!  - Optional result threading (`pass_result`): each stage sees the previous
//!    stage's output instead of the original input.
//!  - Early exit via `PipelineControl::Stop`, optionally replacing the result.
//!  - Blocking (`Handler`) and suspending (`AsyncHandler`) stages mixed in one
//!    pipeline, run with `run` or `run_async`.
//!  - Dynamic mutation (appending, removing handlers by identity).

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::handler::{AsyncHandler, FnHandler, Handler};
pub use crate::core::shared_context::SharedContext;
pub use crate::core::stage::Stage;

pub use crate::pipeline::definition::{Pipeline, PipelineOptions};

pub use crate::error::{PipekitError, PipekitResult};

// Handlers implementing `AsyncHandler` need the attribute on their impl block.
pub use async_trait::async_trait;

/*
    Core Workflow:
    1. Pick the value type `T` that flows through the pipeline and a context
       type `Ctx` (use `()` or `SharedContext<MyState>` if handlers record state).
    2. Implement `Handler<T, Ctx, Err>` (or `AsyncHandler` for I/O-bound work)
       for each stage, or use `pipeline.add_fn(...)` for closures.
    3. Create a `Pipeline::<T, Ctx, Err>::new(pass_result)` and `add` / `add_async`
       the handlers in execution order, keeping `Arc` clones for later `remove`.
    4. Call `pipeline.run(input, &ctx)` or `pipeline.run_async(input, &ctx).await`
       and match on `PipelineResult::{Completed, Stopped}`.
*/
