// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture.

use archiplan_core::checkout::{CheckoutGateway, GatewayError, SubmittedReservation};
use archiplan_core::pipeline::Handler;
use archiplan_core::{
  BuyerInfo, CheckoutPayload, ContextData, DocumentType, FlowError, PaymentInfo, PaymentMethod, PipelineControl,
  Project, ProjectCategory, ReservationStatus, ReservationType,
};
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::Level;
use uuid::Uuid;

// --- Pipeline fixtures ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let step_name_owned = step_name.to_string();
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name_owned.clone());
      tracing::debug!(target: "test_handlers", step = %step_name_owned, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name_owned.as_str()) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(step_name: &'static str, error_message: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let step_name_owned = step_name.to_string();
    let error_message_owned = error_message.to_string();
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name_owned);
      Err(TestError::Handler(error_message_owned))
    })
  })
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Checkout fixtures ---
pub fn sample_project(id: &str, price: i64, currency: &str) -> Project {
  let now = Utc::now();
  Project {
    id: id.to_string(),
    name: "Casa Moderna Minimalista".to_string(),
    description: "Two-storey family home with open plan living.".to_string(),
    category: ProjectCategory::Residential,
    price: Decimal::from(price),
    currency: currency.to_string(),
    images: vec!["https://images.example.com/casa-moderna.jpg".to_string()],
    features: vec!["Open kitchen".to_string(), "Rooftop terrace".to_string()],
    area: 180.0,
    rooms: 3,
    bathrooms: 2,
    floors: 2,
    style: "Modern".to_string(),
    is_active: true,
    created_at: now,
    updated_at: now,
  }
}

pub fn valid_buyer() -> BuyerInfo {
  BuyerInfo {
    first_name: "Ana".to_string(),
    last_name: "Ruiz".to_string(),
    email: "ana@example.com".to_string(),
    phone: "+52 55 1234 5678".to_string(),
    document_type: DocumentType::NationalId,
    document_number: "RUAA900101".to_string(),
    address: "Av. Reforma 100".to_string(),
    city: "Ciudad de México".to_string(),
    state: "CDMX".to_string(),
    country: "México".to_string(),
    postal_code: "06600".to_string(),
    notes: None,
  }
}

pub fn card_payment() -> PaymentInfo {
  let mut info = PaymentInfo::new(PaymentMethod::Card);
  info.cardholder_name = Some("Ana Ruiz".to_string());
  info
}

/// Gateway double: records every payload and answers with a canned result.
pub struct MockGateway {
  pub calls: Mutex<Vec<CheckoutPayload>>,
  reject_with: Option<(u16, String)>,
}

impl MockGateway {
  pub fn accepting() -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      reject_with: None,
    }
  }

  pub fn rejecting(status: u16, message: &str) -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      reject_with: Some((status, message.to_string())),
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().len()
  }
}

#[async_trait]
impl CheckoutGateway for MockGateway {
  async fn submit(&self, payload: &CheckoutPayload) -> Result<SubmittedReservation, GatewayError> {
    self.calls.lock().push(payload.clone());
    if let Some((status, message)) = &self.reject_with {
      return Err(GatewayError::Rejected {
        status: *status,
        message: message.clone(),
      });
    }
    let (status, total) = match payload.reservation_type {
      ReservationType::Quote => (ReservationStatus::Pending, Decimal::ZERO),
      ReservationType::Purchase => (ReservationStatus::Processing, Decimal::from(2500)),
    };
    Ok(SubmittedReservation {
      id: Uuid::new_v4(),
      reservation_number: "RES-LZ0ABC12-7QX2".to_string(),
      status,
      total_amount: total,
      currency: "USD".to_string(),
    })
  }
}

/// Gateway double that parks every call until `release` is notified.
/// `entered` fires once a call has reached the gateway.
pub struct BlockingGateway {
  pub entered: tokio::sync::Notify,
  pub release: tokio::sync::Notify,
  pub calls: std::sync::atomic::AtomicUsize,
}

impl BlockingGateway {
  pub fn new() -> Self {
    Self {
      entered: tokio::sync::Notify::new(),
      release: tokio::sync::Notify::new(),
      calls: std::sync::atomic::AtomicUsize::new(0),
    }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(std::sync::atomic::Ordering::SeqCst)
  }
}

#[async_trait]
impl CheckoutGateway for BlockingGateway {
  async fn submit(&self, _payload: &CheckoutPayload) -> Result<SubmittedReservation, GatewayError> {
    self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    self.entered.notify_one();
    self.release.notified().await;
    Ok(SubmittedReservation {
      id: Uuid::new_v4(),
      reservation_number: "RES-LZ0ABC12-9BLK".to_string(),
      status: ReservationStatus::Processing,
      total_amount: Decimal::from(2500),
      currency: "USD".to_string(),
    })
  }
}
