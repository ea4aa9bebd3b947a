// core/src/checkout/persistence.rs

use parking_lot::Mutex;
use std::collections::HashMap;

/// Key the checkout store snapshot is saved under.
pub const CHECKOUT_SNAPSHOT_KEY: &str = "archiplan-checkout";

/// Key-value boundary the checkout store persists its snapshot through.
///
/// Implementations decide the scope: a browser adapter maps it onto session
/// storage, tests use `MemorySnapshotStore`.
pub trait SnapshotStore: Send + Sync {
  fn save(&self, key: &str, snapshot: &str) -> anyhow::Result<()>;
  fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
}

/// Process-local snapshot store; lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl SnapshotStore for MemorySnapshotStore {
  fn save(&self, key: &str, snapshot: &str) -> anyhow::Result<()> {
    self.entries.lock().insert(key.to_string(), snapshot.to_string());
    Ok(())
  }

  fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }
}
