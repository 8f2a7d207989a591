use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{ReceiptError, ReceiptResult};
use crate::id::{IdGenerator, UuidGenerator};
use crate::receipt::Receipt;
use crate::scoring::{calculate_points, validate_receipt};
use crate::store::{MemoryStore, ReceiptStore};

/// Validates, scores and stores receipts, and looks their points up again.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for ReceiptService {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(UuidGenerator))
    }
}

impl ReceiptService {
    pub fn new(store: Arc<dyn ReceiptStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Decode a JSON payload and submit it.
    pub fn submit_json(&self, payload: &[u8]) -> ReceiptResult<String> {
        let receipt: Receipt = serde_json::from_slice(payload).map_err(|e| {
            debug!(error = %e, "rejecting malformed receipt payload");
            ReceiptError::MalformedPayload(e.to_string())
        })?;
        self.submit(receipt)
    }

    /// Validate, score and store a receipt, returning its new id.
    ///
    /// A rejected receipt is never scored, and nothing is stored when the id
    /// cannot be generated.
    pub fn submit(&self, receipt: Receipt) -> ReceiptResult<String> {
        let receipt = validate_receipt(receipt).map_err(|e| {
            debug!(error = %e, "receipt rejected");
            e
        })?;

        let result = calculate_points(&receipt);

        let id = self.ids.generate().map_err(|e| {
            error!(error = %e, "identifier generation failed");
            e
        })?;

        self.store.put(id.clone(), result.points);
        info!(%id, points = result.points, retailer = %receipt.retailer, "receipt stored");

        Ok(id)
    }

    /// Points previously stored under `id`.
    pub fn lookup(&self, id: &str) -> ReceiptResult<u64> {
        match self.store.get(id) {
            Some(points) => Ok(points),
            None => {
                debug!(%id, "receipt not found");
                Err(ReceiptError::NotFound(id.to_string()))
            }
        }
    }

    pub fn stored_count(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdError;
    use crate::receipt::Item;
    use crate::scoring::ValidationError;

    struct FailingIds;

    impl IdGenerator for FailingIds {
        fn generate(&self) -> Result<String, IdError> {
            Err(IdError("entropy source unavailable".to_string()))
        }
    }

    fn sample_receipt() -> Receipt {
        Receipt {
            retailer: "Test Store".to_string(),
            purchase_date: "2021-08-06".to_string(),
            purchase_time: "14:00".to_string(),
            items: vec![Item::new("Item 1", "10.00"), Item::new("Item 2", "20.00")],
            total: "30.00".to_string(),
        }
    }

    #[test]
    fn test_submit_then_lookup() {
        let service = ReceiptService::default();
        let id = service.submit(sample_receipt()).unwrap();
        assert_eq!(service.lookup(&id).unwrap(), 105);
        assert_eq!(service.stored_count(), 1);
    }

    #[test]
    fn test_submit_json() {
        let service = ReceiptService::default();
        let payload = br#"{"retailer": "Test", "purchaseDate": "2021-01-01", "items": [{"shortDescription": "item1", "price": "10"}], "total": "10"}"#;
        let id = service.submit_json(payload).unwrap();
        // 4 + 50 + 25 + 6
        assert_eq!(service.lookup(&id).unwrap(), 85);
    }

    #[test]
    fn test_missing_retailer_is_rejected_and_not_stored() {
        let service = ReceiptService::default();
        let mut receipt = sample_receipt();
        receipt.retailer.clear();
        let err = service.submit(receipt).unwrap_err();
        assert!(matches!(
            err,
            ReceiptError::Validation(ValidationError::MissingField("retailer"))
        ));
        assert_eq!(service.stored_count(), 0);
    }

    #[test]
    fn test_negative_total_is_rejected() {
        let service = ReceiptService::default();
        let mut receipt = sample_receipt();
        receipt.total = "-10".to_string();
        let err = service.submit(receipt).unwrap_err();
        assert!(matches!(
            err,
            ReceiptError::Validation(ValidationError::InvalidTotal(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let service = ReceiptService::default();
        let payload = br#"{"retailer": "Test", "items": [{"shortDescription": "item1", "price": "10"}, "total": "10"}"#;
        let err = service.submit_json(payload).unwrap_err();
        assert!(matches!(err, ReceiptError::MalformedPayload(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_id_generation_failure_stores_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = ReceiptService::new(store.clone(), Arc::new(FailingIds));
        let err = service.submit(sample_receipt()).unwrap_err();
        assert!(matches!(err, ReceiptError::IdentifierGenerationFailed(_)));
        assert!(!err.is_client_error());
        assert!(store.is_empty());
    }

    #[test]
    fn test_lookup_unknown_id() {
        let service = ReceiptService::default();
        let err = service
            .lookup("7fb1377b-b223-49d9-a31a-5a02701dd310")
            .unwrap_err();
        assert!(matches!(err, ReceiptError::NotFound(_)));
    }

    #[test]
    fn test_clones_share_store() {
        let service = ReceiptService::default();
        let other = service.clone();
        let id = service.submit(sample_receipt()).unwrap();
        assert_eq!(other.lookup(&id).unwrap(), 105);
    }
}
