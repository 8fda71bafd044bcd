use uuid::{NoContext, Timestamp, Uuid};

/// Source of fresh book identifiers with negligible collision probability.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Time-ordered UUIDv7 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn generate(&self) -> String {
        Uuid::new_v7(Timestamp::now(NoContext)).to_string()
    }
}
