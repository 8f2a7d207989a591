use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use uuid::{Builder, Uuid};

#[derive(Debug, Error)]
#[error("failed to generate identifier: {0}")]
pub struct IdError(pub String);

/// Produces statistically unique string identifiers.
///
/// Generation may fail (e.g. the entropy source is unavailable); callers
/// report the failure instead of retrying.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, IdError>;
}

/// Random (version 4) UUIDs drawn from the operating system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| IdError(e.to_string()))?;
        let id: Uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(id.hyphenated().to_string())
    }
}
