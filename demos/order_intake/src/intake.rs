// demos/order_intake/src/intake.rs

//! The order intake pipeline. Every stage receives the loaded `AppConfig`
//! as its run context.

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{Order, OrderStatus};
use pipekit::{async_trait, AsyncHandler, Handler, Pipeline, PipelineControl, PipelineOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub type IntakePipeline = Pipeline<Order, AppConfig, AppError>;
type Control = Result<PipelineControl<Order>, AppError>;

/// Drops empty orders silently and fails oversized ones.
pub struct Validate;

impl Handler<Order, AppConfig, AppError> for Validate {
  fn process(&self, order: &Order, config: &AppConfig) -> Control {
    if order.quantity == 0 {
      warn!(sku = %order.sku, "Empty order dropped.");
      return Ok(PipelineControl::stop());
    }
    if order.quantity > config.max_quantity {
      return Err(AppError::Validation(format!(
        "quantity {} exceeds the limit of {}",
        order.quantity, config.max_quantity
      )));
    }
    Ok(PipelineControl::Continue(order.clone()))
  }
}

pub struct ApplyCoupon;

impl Handler<Order, AppConfig, AppError> for ApplyCoupon {
  fn can_process(&self, order: &Order, config: &AppConfig) -> bool {
    order.coupon.as_deref() == Some(config.coupon_code.as_str())
  }

  fn process(&self, order: &Order, config: &AppConfig) -> Control {
    let discount_cents = order.subtotal_cents() * u64::from(config.coupon_percent) / 100;
    info!(sku = %order.sku, discount_cents, "Coupon applied.");
    Ok(PipelineControl::Continue(Order {
      discount_cents,
      ..order.clone()
    }))
  }
}

/// Asks the (simulated) fraud service about large orders. A hit ends the
/// pipeline with the order marked for review.
pub struct FraudCheck;

#[async_trait]
impl AsyncHandler<Order, AppConfig, AppError> for FraudCheck {
  async fn process(&self, order: &Order, config: &AppConfig) -> Control {
    tokio::time::sleep(Duration::from_millis(config.fraud_check_delay_ms)).await;
    if order.total_cents() >= config.review_threshold_cents {
      warn!(sku = %order.sku, total_cents = order.total_cents(), "Order held for review.");
      return Ok(PipelineControl::stop_with(Order {
        status: OrderStatus::HeldForReview,
        ..order.clone()
      }));
    }
    Ok(PipelineControl::Continue(order.clone()))
  }
}

pub struct Accept;

impl Handler<Order, AppConfig, AppError> for Accept {
  fn process(&self, order: &Order, _config: &AppConfig) -> Control {
    Ok(PipelineControl::Continue(Order {
      status: OrderStatus::Accepted,
      ..order.clone()
    }))
  }
}

pub fn build_intake_pipeline() -> IntakePipeline {
  let mut pipeline = IntakePipeline::with_options(PipelineOptions {
    name: Some("order_intake".to_string()),
    pass_result: true,
  });
  pipeline.add(Arc::new(Validate));
  pipeline.add(Arc::new(ApplyCoupon));
  pipeline.add_async(Arc::new(FraudCheck));
  pipeline.add(Arc::new(Accept));
  pipeline
}
