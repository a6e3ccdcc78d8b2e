// pipekit/examples/basic_pipeline.rs

use pipekit::{Handler, PipekitError, PipekitResult, Pipeline, PipelineControl, PipelineResult};
use std::sync::Arc;
use tracing::info;

// 1. Define handlers. Each one sees the current value and returns its output.
struct AddOne;

impl Handler<i64> for AddOne {
  fn process(&self, input: &i64, _ctx: &()) -> PipekitResult<PipelineControl<i64>> {
    info!("AddOne: {} -> {}", input, input + 1);
    Ok(PipelineControl::Continue(input + 1))
  }
}

struct Double;

impl Handler<i64> for Double {
  fn process(&self, input: &i64, _ctx: &()) -> PipekitResult<PipelineControl<i64>> {
    info!("Double: {} -> {}", input, input * 2);
    Ok(PipelineControl::Continue(input * 2))
  }
}

// A handler with a filter: only touches odd numbers.
struct NegateOdd;

impl Handler<i64> for NegateOdd {
  fn can_process(&self, input: &i64, _ctx: &()) -> bool {
    input % 2 != 0
  }

  fn process(&self, input: &i64, _ctx: &()) -> PipekitResult<PipelineControl<i64>> {
    Ok(PipelineControl::Continue(-input))
  }
}

fn main() -> Result<(), PipekitError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 2. Without pass_result every handler sees the original input,
  //    and the last handler that ran decides the result.
  let mut independent = Pipeline::<i64>::new(false);
  independent.add(Arc::new(AddOne));
  independent.add(Arc::new(Double));
  let result = independent.run(3, &())?;
  info!("pass_result = false: {:?}", result);
  assert_eq!(result, PipelineResult::Completed(6));

  // 3. With pass_result each handler receives the previous output.
  let mut chained = Pipeline::<i64>::new(true);
  chained.add(Arc::new(AddOne));
  chained.add(Arc::new(Double));
  chained.add(Arc::new(NegateOdd)); // 8 is even, so this is skipped
  let result = chained.run(3, &())?;
  info!("pass_result = true: {:?}", result);
  assert_eq!(result, PipelineResult::Completed(8));

  // 4. Closures work too.
  chained.add_fn("minus_three", |value, _ctx| Ok(PipelineControl::Continue(value - 3)));
  let result = chained.run(3, &())?; // (3 + 1) * 2 - 3 = 5
  info!("with closure stage: {:?}", result);
  assert_eq!(result, PipelineResult::Completed(5));

  Ok(())
}
