// tests/review_tests.rs
mod common;

use archiplan_core::checkout::{Review, ReviewController, SubmitError};
use archiplan_core::{CheckoutStep, CheckoutStore, GatewayError, PaymentInfo, PaymentMethod, ReservationType};
use common::*;
use rust_decimal::Decimal;
use serial_test::serial;

fn store_at_review(kind: ReservationType) -> CheckoutStore {
  let mut store = CheckoutStore::new();
  store.select_project(sample_project("p1", 2500, "USD"));
  store.set_reservation_type(kind);
  store.set_buyer_info(valid_buyer());
  let payment = match kind {
    ReservationType::Purchase => card_payment(),
    ReservationType::Quote => PaymentInfo::new(PaymentMethod::Quote),
  };
  store.set_payment_info(payment);
  store.go_to_step(CheckoutStep::Review).unwrap();
  store
}

fn ready(store: &CheckoutStore) -> ReviewController {
  match ReviewController::prepare(store) {
    Review::Ready(controller) => controller,
    Review::Incomplete { .. } => panic!("store should be complete"),
  }
}

#[test]
fn summary_reflects_the_store() {
  let store = store_at_review(ReservationType::Purchase);
  let controller = ready(&store);
  let summary = controller.summary();

  assert_eq!(summary.project_name, "Casa Moderna Minimalista");
  assert_eq!(summary.price_line, "$2,500.00 USD");
  assert_eq!(summary.buyer_name, "Ana Ruiz");
  assert_eq!(summary.buyer_email, "ana@example.com");
  assert_eq!(summary.payment_method_label, PaymentMethod::Card.label());
  assert_eq!(summary.total, Decimal::from(2500));
}

#[test]
fn quote_summary_shows_a_pending_total() {
  let store = store_at_review(ReservationType::Quote);
  let summary = ready(&store).summary().clone();
  assert_eq!(summary.total, Decimal::ZERO);
  assert_eq!(summary.total_line, "To be quoted");
  assert_eq!(summary.price_line, "$2,500.00 USD");
}

#[test]
fn missing_payment_info_is_incomplete() {
  let mut store = CheckoutStore::new();
  store.select_project(sample_project("p1", 2500, "USD"));
  store.set_buyer_info(valid_buyer());
  assert!(matches!(
    ReviewController::prepare(&store),
    Review::Incomplete {
      recover_to: CheckoutStep::ProjectSelection
    }
  ));
}

#[tokio::test]
#[serial]
async fn submit_requires_accepted_terms() {
  setup_tracing();
  let mut store = store_at_review(ReservationType::Purchase);
  let controller = ready(&store);
  let gateway = MockGateway::accepting();

  assert!(!controller.can_submit());
  let err = controller.submit(&mut store, &gateway).await.unwrap_err();
  assert!(matches!(err, SubmitError::TermsNotAccepted));
  assert_eq!(gateway.call_count(), 0);
  assert_eq!(store.current_step(), CheckoutStep::Review);
}

#[tokio::test]
#[serial]
async fn successful_submit_resets_the_store() {
  setup_tracing();
  let mut store = store_at_review(ReservationType::Purchase);
  let mut controller = ready(&store);
  controller.accept_terms(true);
  assert!(controller.can_submit());
  let gateway = MockGateway::accepting();

  let receipt = controller.submit(&mut store, &gateway).await.unwrap();

  assert_eq!(receipt.reservation_number, "RES-LZ0ABC12-7QX2");
  assert_eq!(receipt.confirmation_path, "/confirmacion/RES-LZ0ABC12-7QX2");
  assert_eq!(store.state(), CheckoutStore::new().state());
  assert!(!controller.is_submitting());
  assert_eq!(controller.last_error(), None);

  let sent = gateway.calls.lock()[0].clone();
  assert_eq!(sent.project_id, "p1");
  assert_eq!(sent.reservation_type, ReservationType::Purchase);
  assert_eq!(sent.buyer, valid_buyer());
  assert_eq!(sent.payment, card_payment());
}

#[tokio::test]
#[serial]
async fn failed_submit_keeps_the_store_and_records_the_error() {
  setup_tracing();
  let mut store = store_at_review(ReservationType::Quote);
  let snapshot = store.state().clone();
  let mut controller = ready(&store);
  controller.accept_terms(true);
  let gateway = MockGateway::rejecting(400, "Project is not available");

  let err = controller.submit(&mut store, &gateway).await.unwrap_err();

  assert!(matches!(err, SubmitError::Gateway(GatewayError::Rejected { status: 400, .. })));
  assert_eq!(store.state(), &snapshot);
  assert!(!controller.is_submitting());
  assert!(controller.can_submit());
  assert_eq!(controller.last_error().as_deref(), Some("Project is not available"));
}

#[tokio::test]
#[serial]
async fn submit_after_store_was_cleared_is_incomplete() {
  setup_tracing();
  let mut store = store_at_review(ReservationType::Purchase);
  let mut controller = ready(&store);
  controller.accept_terms(true);
  store.reset();
  let gateway = MockGateway::accepting();

  let err = controller.submit(&mut store, &gateway).await.unwrap_err();
  assert!(matches!(err, SubmitError::Incomplete));
  assert_eq!(gateway.call_count(), 0);
  assert!(!controller.is_submitting());
}

#[tokio::test]
#[serial]
async fn second_submit_is_refused_while_one_is_in_flight() {
  setup_tracing();
  let mut store = store_at_review(ReservationType::Purchase);
  let mut other_store = store_at_review(ReservationType::Purchase);
  let mut controller = ready(&store);
  controller.accept_terms(true);
  let gateway = BlockingGateway::new();

  let mut pending = Box::pin(controller.submit(&mut store, &gateway));
  tokio::select! {
    biased;
    _ = &mut pending => panic!("submission finished before the gateway released it"),
    _ = gateway.entered.notified() => {}
  }
  assert!(controller.is_submitting());
  assert!(!controller.can_submit());

  let second = controller.submit(&mut other_store, &gateway).await;
  assert!(matches!(second, Err(SubmitError::AlreadySubmitting)));
  assert_eq!(gateway.call_count(), 1);
  assert_eq!(other_store.current_step(), CheckoutStep::Review);

  gateway.release.notify_one();
  let receipt = pending.await.unwrap();
  assert_eq!(receipt.reservation_number, "RES-LZ0ABC12-9BLK");
  assert!(!controller.is_submitting());
  assert_eq!(store.current_step(), CheckoutStep::ProjectSelection);
}

#[tokio::test]
#[serial]
async fn dropping_a_pending_submit_clears_the_flag() {
  setup_tracing();
  let mut store = store_at_review(ReservationType::Purchase);
  let mut controller = ready(&store);
  controller.accept_terms(true);
  let gateway = BlockingGateway::new();

  let mut pending = Box::pin(controller.submit(&mut store, &gateway));
  tokio::select! {
    biased;
    _ = &mut pending => panic!("submission finished before the gateway released it"),
    _ = gateway.entered.notified() => {}
  }
  assert!(controller.is_submitting());

  drop(pending);
  assert!(!controller.is_submitting());
  assert!(controller.can_submit());
  assert_eq!(store.current_step(), CheckoutStep::Review);
  assert!(store.buyer_info().is_some());
}
