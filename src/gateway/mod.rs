//! Record store gateway.
//!
//! Thin asynchronous interface to the remote collection: list, create and
//! update. Implementations map every transport or status failure to a single
//! [`StoreError`] and normalize records before handing them back.

mod http;
mod memory;
mod wire;

pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use wire::{MISSING_CATEGORY, PLACEHOLDER_IMAGE};

use crate::error::StoreError;
use crate::types::{Record, RecordId, RecordPayload};
use async_trait::async_trait;

/// Access to the remote record collection.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Fetch every record, in store order.
    async fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Create a record; the store assigns the id.
    async fn create(&self, payload: &RecordPayload) -> Result<Record, StoreError>;

    /// Replace the record with `id`.
    async fn update(&self, id: RecordId, payload: &RecordPayload) -> Result<Record, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str) -> RecordPayload {
        RecordPayload {
            title: title.to_string(),
            price: 9.5,
            category: "Toys".into(),
            description: "A small wooden toy".into(),
            image: "http://x/toy.png".into(),
            images: vec!["http://x/toy.png".into()],
        }
    }

    #[tokio::test]
    async fn test_memory_create_assigns_next_id() {
        let gateway = MemoryGateway::new();

        let first = gateway.create(&payload("Yo-yo")).await.unwrap();
        let second = gateway.create(&payload("Top")).await.unwrap();

        assert_eq!(first.id, RecordId(1));
        assert_eq!(second.id, RecordId(2));
        assert_eq!(gateway.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_seeded_with_max_id() {
        let seeded = Record {
            id: RecordId(u64::MAX),
            title: "Last".into(),
            price: 1.0,
            category: "Toys".into(),
            description: "The very last toy".into(),
            images: vec!["http://x/last.png".into()],
        };
        let gateway = MemoryGateway::with_records(vec![seeded.clone()]);

        let result = gateway.create(&payload("Overflow")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(gateway.list().await.unwrap(), vec![seeded]);
    }

    #[tokio::test]
    async fn test_memory_update_missing_is_404() {
        let gateway = MemoryGateway::new();

        let result = gateway.update(RecordId(5), &payload("Ghost")).await;
        assert!(matches!(result, Err(StoreError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_memory_offline_fails_every_call() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);

        assert!(matches!(gateway.list().await, Err(StoreError::Unavailable(_))));
        assert!(gateway.create(&payload("Kite")).await.is_err());
        assert_eq!(gateway.request_count(), 2);
        assert!(gateway.snapshot().is_empty());
    }
}
