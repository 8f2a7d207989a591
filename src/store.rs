use parking_lot::RwLock;
use std::collections::HashMap;

/// Identifier-keyed storage for scored receipts.
///
/// Entries are inserted once and read many times; there is no update or
/// delete. Implementations must be safe to share between request handlers.
pub trait ReceiptStore: Send + Sync {
    /// Insert the points for a freshly generated id.
    fn put(&self, id: String, points: u64);

    /// Look up the points for an id. `None` means the id was never stored,
    /// which is distinct from a stored receipt worth zero points.
    fn get(&self, id: &str) -> Option<u64>;

    /// Number of stored receipts.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile in-memory store, lives for the process lifetime.
///
/// Each operation takes the lock once: writers exclude readers and other
/// writers for the duration of a single insert.
#[derive(Debug, Default)]
pub struct MemoryStore {
    receipts: RwLock<HashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReceiptStore for MemoryStore {
    fn put(&self, id: String, points: u64) {
        self.receipts.write().insert(id, points);
    }

    fn get(&self, id: &str) -> Option<u64> {
        self.receipts.read().get(id).copied()
    }

    fn len(&self) -> usize {
        self.receipts.read().len()
    }
}
