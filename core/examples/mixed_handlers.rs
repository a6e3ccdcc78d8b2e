// pipekit/examples/mixed_handlers.rs

use pipekit::{async_trait, AsyncHandler, Handler, PipekitError, PipekitResult, Pipeline, PipelineControl};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone, Debug)]
struct Quote {
  symbol: String,
  price_cents: u64,
}

struct Uppercase;

impl Handler<Quote> for Uppercase {
  fn process(&self, input: &Quote, _ctx: &()) -> PipekitResult<PipelineControl<Quote>> {
    Ok(PipelineControl::Continue(Quote {
      symbol: input.symbol.to_uppercase(),
      ..input.clone()
    }))
  }
}

/// Simulates an I/O-bound price lookup.
struct FetchPrice;

#[async_trait]
impl AsyncHandler<Quote> for FetchPrice {
  fn can_process(&self, input: &Quote, _ctx: &()) -> bool {
    input.price_cents == 0
  }

  async fn process(&self, input: &Quote, _ctx: &()) -> PipekitResult<PipelineControl<Quote>> {
    tokio::time::sleep(Duration::from_millis(20)).await;
    let price_cents = 100 * input.symbol.len() as u64;
    info!(symbol = %input.symbol, price_cents, "Fetched price.");
    Ok(PipelineControl::Continue(Quote {
      price_cents,
      ..input.clone()
    }))
  }
}

#[tokio::main]
async fn main() -> Result<(), PipekitError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Mixed Handlers Example ---");

  let mut pipeline = Pipeline::<Quote>::new(true);
  pipeline.add(Arc::new(Uppercase));
  pipeline.add_async(Arc::new(FetchPrice));

  let quote = Quote {
    symbol: "abcd".to_string(),
    price_cents: 0,
  };
  let result = pipeline.run_async(quote, &()).await?;
  info!("Result: {:?}", result);

  // The blocking path refuses stages it would have to await.
  let err = pipeline
    .run(
      Quote {
        symbol: "xyz".to_string(),
        price_cents: 0,
      },
      &(),
    )
    .unwrap_err();
  info!("Blocking run failed as expected: {}", err);

  Ok(())
}
