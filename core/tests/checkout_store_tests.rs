// tests/checkout_store_tests.rs
mod common;

use archiplan_core::checkout::{CheckoutState, CHECKOUT_SNAPSHOT_KEY};
use archiplan_core::{CheckoutStep, CheckoutStore, MemorySnapshotStore, NavigationBlocked, ReservationType, SnapshotStore};
use common::*;
use proptest::prelude::*;
use std::sync::Arc;

fn filled_store() -> CheckoutStore {
  let mut store = CheckoutStore::new();
  store.select_project(sample_project("p1", 2500, "USD"));
  store.set_buyer_info(valid_buyer());
  store.set_payment_info(card_payment());
  store
}

#[test]
fn new_store_starts_at_project_selection() {
  let store = CheckoutStore::new();
  assert_eq!(store.current_step(), CheckoutStep::ProjectSelection);
  assert_eq!(store.step_index(), 0);
  assert_eq!(store.reservation_type(), ReservationType::Purchase);
  assert!(store.selected_project().is_none());
  assert!(!store.can_proceed());
}

#[test]
fn select_project_does_not_advance() {
  let mut store = CheckoutStore::new();
  store.select_project(sample_project("p1", 2500, "USD"));
  assert_eq!(store.current_step(), CheckoutStep::ProjectSelection);
  assert!(store.can_proceed());
}

#[test]
fn next_step_never_passes_review() {
  let mut store = filled_store();
  for _ in 0..10 {
    store.next_step();
  }
  assert_eq!(store.current_step(), CheckoutStep::Review);
}

#[test]
fn prev_step_is_a_no_op_at_the_first_step() {
  let mut store = CheckoutStore::new();
  assert_eq!(store.prev_step(), CheckoutStep::ProjectSelection);
}

#[test]
fn go_to_payment_requires_buyer_info() {
  let mut store = CheckoutStore::new();
  store.select_project(sample_project("p1", 2500, "USD"));

  let result = store.go_to_step(CheckoutStep::PaymentInfo);
  assert_eq!(result, Err(NavigationBlocked::MissingBuyerInfo));
  assert_eq!(store.current_step(), CheckoutStep::ProjectSelection);

  store.set_buyer_info(valid_buyer());
  assert_eq!(store.go_to_step(CheckoutStep::PaymentInfo), Ok(CheckoutStep::PaymentInfo));
}

#[test]
fn go_to_buyer_info_requires_project() {
  let mut store = CheckoutStore::new();
  assert_eq!(
    store.go_to_step(CheckoutStep::BuyerInfo),
    Err(NavigationBlocked::MissingProject)
  );
}

#[test]
fn go_to_review_requires_payment_info() {
  let mut store = CheckoutStore::new();
  store.select_project(sample_project("p1", 2500, "USD"));
  store.set_buyer_info(valid_buyer());
  assert_eq!(
    store.go_to_step(CheckoutStep::Review),
    Err(NavigationBlocked::MissingPaymentInfo)
  );
}

#[test]
fn confirmation_is_only_reached_by_submitting() {
  let mut store = filled_store();
  store.go_to_step(CheckoutStep::Review).unwrap();
  assert_eq!(
    store.go_to_step(CheckoutStep::Confirmation),
    Err(NavigationBlocked::SubmissionRequired)
  );
  assert_eq!(store.current_step(), CheckoutStep::Review);
}

#[test]
fn go_to_step_is_idempotent() {
  let mut store = filled_store();
  store.go_to_step(CheckoutStep::PaymentInfo).unwrap();
  let once = store.state().clone();
  store.go_to_step(CheckoutStep::PaymentInfo).unwrap();
  assert_eq!(store.state(), &once);
}

#[test]
fn backward_navigation_always_succeeds() {
  let mut store = filled_store();
  store.go_to_step(CheckoutStep::Review).unwrap();
  assert_eq!(store.go_to_step(CheckoutStep::ProjectSelection), Ok(CheckoutStep::ProjectSelection));
  // Data is kept when moving back.
  assert!(store.buyer_info().is_some());
}

#[test]
fn clear_project_falls_back_to_project_selection() {
  let mut store = filled_store();
  store.go_to_step(CheckoutStep::PaymentInfo).unwrap();
  store.clear_project();
  assert_eq!(store.current_step(), CheckoutStep::ProjectSelection);
  assert!(store.selected_project().is_none());
}

#[test]
fn reset_returns_to_initial_state() {
  let mut store = filled_store();
  store.set_reservation_type(ReservationType::Quote);
  store.go_to_step(CheckoutStep::Review).unwrap();

  store.reset();
  assert_eq!(store.state(), CheckoutStore::default().state());
  assert_eq!(store.state(), &CheckoutState::default());
}

#[test]
fn reset_snapshot_equals_initial_snapshot() {
  let snapshots: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
  let mut store = CheckoutStore::restore(snapshots.clone());
  store.reset();
  let initial = snapshots.load(CHECKOUT_SNAPSHOT_KEY).unwrap().unwrap();

  store.select_project(sample_project("p1", 2500, "USD"));
  store.set_buyer_info(valid_buyer());
  store.next_step();
  store.reset();
  let after_reset = snapshots.load(CHECKOUT_SNAPSHOT_KEY).unwrap().unwrap();

  assert_eq!(initial, after_reset);
}

#[test]
fn store_is_restored_from_snapshot() {
  let snapshots: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::new());
  {
    let mut store = CheckoutStore::restore(snapshots.clone());
    store.select_project(sample_project("p1", 2500, "USD"));
    store.set_reservation_type(ReservationType::Quote);
    store.next_step();
  }

  let restored = CheckoutStore::restore(snapshots);
  assert_eq!(restored.current_step(), CheckoutStep::BuyerInfo);
  assert_eq!(restored.reservation_type(), ReservationType::Quote);
  assert_eq!(restored.selected_project().map(|p| p.id.as_str()), Some("p1"));
}

#[test]
fn unreadable_snapshot_starts_fresh() {
  setup_tracing();
  let snapshots = Arc::new(MemorySnapshotStore::new());
  snapshots.save(CHECKOUT_SNAPSHOT_KEY, "{not json").unwrap();

  let store = CheckoutStore::restore(snapshots);
  assert_eq!(store.state(), &CheckoutState::default());
}

#[derive(Debug, Clone)]
enum NavOp {
  Next,
  Prev,
  GoTo(usize),
}

fn nav_op() -> impl Strategy<Value = NavOp> {
  prop_oneof![
    Just(NavOp::Next),
    Just(NavOp::Prev),
    (0..CheckoutStep::ALL.len()).prop_map(NavOp::GoTo),
  ]
}

proptest! {
  #[test]
  fn navigation_stays_in_range_and_never_reaches_confirmation(
    with_data in any::<bool>(),
    ops in proptest::collection::vec(nav_op(), 0..40),
  ) {
    let mut store = if with_data { filled_store() } else { CheckoutStore::new() };
    for op in ops {
      match op {
        NavOp::Next => { store.next_step(); }
        NavOp::Prev => { store.prev_step(); }
        NavOp::GoTo(i) => { let _ = store.go_to_step(CheckoutStep::ALL[i]); }
      }
      prop_assert!(store.step_index() < CheckoutStep::ALL.len());
      prop_assert!(store.current_step() <= CheckoutStep::Review);
    }
  }

  #[test]
  fn rejected_navigation_leaves_the_step_unchanged(target in 0..CheckoutStep::ALL.len()) {
    let mut store = CheckoutStore::new();
    let before = store.current_step();
    let target = CheckoutStep::ALL[target];
    match store.go_to_step(target) {
      Ok(step) => prop_assert_eq!(step, target),
      Err(_) => prop_assert_eq!(store.current_step(), before),
    }
  }
}
