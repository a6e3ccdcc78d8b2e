// demos/order_intake/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Orders above this quantity are rejected as invalid.
  pub max_quantity: u32,
  /// Percentage taken off when an order carries a known coupon.
  pub coupon_percent: u8,
  pub coupon_code: String,
  /// Totals at or above this are held for manual review.
  pub review_threshold_cents: u64,
  /// Simulated latency of the fraud service.
  pub fraud_check_delay_ms: u64,
}

fn env_or<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(var_name) {
    Ok(raw) => raw
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
    Err(env::VarError::NotPresent) => Ok(default),
    Err(e) => Err(AppError::Config(format!("Unreadable environment variable '{}': {}", var_name, e))),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let config = Self {
      max_quantity: env_or("INTAKE_MAX_QUANTITY", 100)?,
      coupon_percent: env_or("INTAKE_COUPON_PERCENT", 10)?,
      coupon_code: env_or("INTAKE_COUPON_CODE", "WELCOME".to_string())?,
      review_threshold_cents: env_or("INTAKE_REVIEW_THRESHOLD_CENTS", 100_000)?,
      fraud_check_delay_ms: env_or("INTAKE_FRAUD_DELAY_MS", 5)?,
    };

    if config.coupon_percent > 100 {
      return Err(AppError::Config(format!(
        "INTAKE_COUPON_PERCENT must be at most 100, got {}",
        config.coupon_percent
      )));
    }

    tracing::info!("Application configuration loaded successfully.");
    Ok(config)
  }
}
