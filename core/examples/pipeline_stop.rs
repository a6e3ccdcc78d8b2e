// pipekit/examples/pipeline_stop.rs

use pipekit::{Handler, PipekitError, PipekitResult, Pipeline, PipelineControl, PipelineResult, SharedContext};
use std::sync::Arc;
use tracing::{error, info};

// 1. Define Context Data shared by the handlers
#[derive(Clone, Debug, Default)]
struct StopContext {
  log: Vec<String>,
}

type Ctx = SharedContext<StopContext>;

// 2. Handlers
struct Normalize;

impl Handler<String, Ctx> for Normalize {
  fn process(&self, input: &String, ctx: &Ctx) -> PipekitResult<PipelineControl<String>> {
    ctx.write().log.push("normalize".to_string());
    Ok(PipelineControl::Continue(input.trim().to_lowercase()))
  }
}

/// Rejects blocked words by stopping the pipeline with a replacement value.
struct Censor {
  blocked: Vec<&'static str>,
}

impl Handler<String, Ctx> for Censor {
  fn process(&self, input: &String, ctx: &Ctx) -> PipekitResult<PipelineControl<String>> {
    ctx.write().log.push("censor".to_string());
    if self.blocked.iter().any(|word| input.contains(word)) {
      info!("Blocked word found - issuing STOP.");
      return Ok(PipelineControl::stop_with("[redacted]".to_string()));
    }
    Ok(PipelineControl::Continue(input.clone()))
  }
}

struct Publish;

impl Handler<String, Ctx> for Publish {
  fn process(&self, input: &String, ctx: &Ctx) -> PipekitResult<PipelineControl<String>> {
    ctx.write().log.push("publish".to_string());
    Ok(PipelineControl::Continue(format!("published: {}", input)))
  }
}

fn main() -> Result<(), PipekitError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Pipeline Stop Example ---");

  // 3. Create the pipeline
  let mut pipeline = Pipeline::<String, Ctx>::new(true);
  pipeline.add(Arc::new(Normalize));
  pipeline.add(Arc::new(Censor { blocked: vec!["spam"] }));
  pipeline.add(Arc::new(Publish)); // Should not run for blocked input

  // 4. Clean input runs to completion
  let ctx = SharedContext::new(StopContext::default());
  let result = pipeline.run("  Hello World ".to_string(), &ctx)?;
  info!("Clean input: {:?}", result);
  assert_eq!(result, PipelineResult::Completed("published: hello world".to_string()));

  // 5. Blocked input stops early with the replacement value
  let ctx = SharedContext::new(StopContext::default());
  let result = pipeline.run("Buy SPAM now".to_string(), &ctx)?;
  match &result {
    PipelineResult::Completed(_) => error!("Pipeline completed, but was expected to stop!"),
    PipelineResult::Stopped(payload) => info!("Pipeline stopped as expected with {:?}.", payload),
  }

  let final_state = ctx.read();
  info!("Execution Log: {:?}", final_state.log);
  assert_eq!(result.into_output().as_deref(), Some("[redacted]"));
  assert_eq!(final_state.log, vec!["normalize", "censor"]);

  Ok(())
}
