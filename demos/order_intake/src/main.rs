// demos/order_intake/src/main.rs

mod config;
mod errors;
mod intake;
mod models;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::models::Order;
use pipekit::PipelineResult;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
  // Allow RUST_LOG override, INFO by default
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  tracing::info!("Starting order intake demo...");

  let config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e);
    }
  };

  let pipeline = intake::build_intake_pipeline();
  tracing::info!(stages = pipeline.len(), "Intake pipeline built.");

  let orders = vec![
    Order::new("mug", 2, 1_200),
    Order::new("desk", 3, 45_000).with_coupon(&config.coupon_code),
    Order::new("desk", 3, 45_000),
    Order::new("poster", 0, 900),
    Order::new("sticker", config.max_quantity + 1, 50),
  ];

  for order in orders {
    let sku = order.sku.clone();
    match pipeline.run_async(order, &config).await {
      Ok(PipelineResult::Completed(order)) => {
        tracing::info!(%sku, status = ?order.status, total_cents = order.total_cents(), "Order processed.")
      }
      Ok(PipelineResult::Stopped(Some(order))) => {
        tracing::info!(%sku, status = ?order.status, total_cents = order.total_cents(), "Order stopped early.")
      }
      Ok(PipelineResult::Stopped(None)) => tracing::info!(%sku, "Order dropped."),
      Err(e) => tracing::warn!(%sku, error = %e, "Order rejected."),
    }
  }

  Ok(())
}
