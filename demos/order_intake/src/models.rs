// demos/order_intake/src/models.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
  Received,
  Accepted,
  HeldForReview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
  pub sku: String,
  pub quantity: u32,
  pub unit_price_cents: u64,
  pub coupon: Option<String>,
  pub discount_cents: u64,
  pub status: OrderStatus,
}

impl Order {
  pub fn new(sku: &str, quantity: u32, unit_price_cents: u64) -> Self {
    Self {
      sku: sku.to_string(),
      quantity,
      unit_price_cents,
      coupon: None,
      discount_cents: 0,
      status: OrderStatus::Received,
    }
  }

  pub fn with_coupon(mut self, code: &str) -> Self {
    self.coupon = Some(code.to_string());
    self
  }

  pub fn subtotal_cents(&self) -> u64 {
    self.unit_price_cents * u64::from(self.quantity)
  }

  pub fn total_cents(&self) -> u64 {
    self.subtotal_cents().saturating_sub(self.discount_cents)
  }
}
