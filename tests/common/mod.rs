//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

pub mod mock_store;

use async_trait::async_trait;
use catalog_view::{
    Dashboard, DashboardConfig, Draft, FixedClock, MemoryGateway, Record, RecordGateway,
    RecordId, RecordPayload, StoreError, Timestamp,
};
use std::sync::Arc;
use tokio::sync::Notify;

pub const EXPORT_TIME: Timestamp = Timestamp(1_717_171_717_000);

pub fn record(id: u64, title: &str, price: f64) -> Record {
    Record {
        id: RecordId(id),
        title: title.to_string(),
        price,
        category: "General".to_string(),
        description: format!("{} description", title),
        images: vec![format!("http://x/{}.png", id)],
    }
}

/// The two-record catalog used by the documented scenarios.
pub fn apple_catalog() -> Vec<Record> {
    vec![
        Record {
            id: RecordId(1),
            title: "Apple Watch".to_string(),
            price: 399.99,
            category: "Electronics".to_string(),
            description: "A watch".to_string(),
            images: vec!["http://x/a.png".to_string()],
        },
        Record {
            id: RecordId(2),
            title: "apple pie".to_string(),
            price: 12.5,
            category: "Food".to_string(),
            description: "Tasty pie".to_string(),
            images: vec!["http://x/b.png".to_string()],
        },
    ]
}

pub fn valid_draft(title: &str) -> Draft {
    Draft {
        title: title.to_string(),
        price: "49.5".to_string(),
        category: "Electronics".to_string(),
        description: "Refurbished and tested".to_string(),
        images: vec!["https://cdn.example/item.png".to_string()],
    }
}

pub fn config(page_size: usize) -> DashboardConfig {
    DashboardConfig {
        default_page_size: page_size,
        page_size_options: Vec::new(),
        ..Default::default()
    }
}

/// Route library logs to the test harness output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Dashboard over an in-memory store, with a fixed export clock.
pub async fn loaded_dashboard(
    records: Vec<Record>,
    page_size: usize,
) -> (Dashboard, Arc<MemoryGateway>) {
    init_tracing();
    let gateway = Arc::new(MemoryGateway::with_records(records));
    let dashboard = Dashboard::with_clock(
        config(page_size),
        gateway.clone(),
        Arc::new(FixedClock(EXPORT_TIME)),
    )
    .unwrap();
    dashboard.load().await.unwrap();
    (dashboard, gateway)
}

/// Gateway whose writes park until released, to observe in-flight state.
pub struct GatedGateway {
    inner: MemoryGateway,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedGateway {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            inner: MemoryGateway::with_records(records),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn request_count(&self) -> usize {
        self.inner.request_count()
    }
}

#[async_trait]
impl RecordGateway for GatedGateway {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        self.inner.list().await
    }

    async fn create(&self, payload: &RecordPayload) -> Result<Record, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.create(payload).await
    }

    async fn update(&self, id: RecordId, payload: &RecordPayload) -> Result<Record, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.update(id, payload).await
    }
}
