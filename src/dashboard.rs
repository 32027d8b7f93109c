//! Main Dashboard struct tying all components together.

use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::export::{export_csv, export_filename, Clock, ExportFile, SystemClock};
use crate::gateway::{HttpGateway, RecordGateway};
use crate::mutation::{MutationCoordinator, SavedRecord, ValidationReport};
use crate::subscriptions::{
    SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager, ViewSummary,
};
use crate::types::{Draft, Record, RecordId, SortField};
use crate::view::{Navigation, PageWindow, QueryState, ViewEngine, ViewPage};

/// Where the initial load stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// `load` has not been called yet.
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last load failed; the view is empty.
    Failed(String),
}

/// The catalog dashboard.
///
/// Provides a unified interface for:
/// - Loading the canonical set from the store
/// - Search, sort and paging of the derived view
/// - Detail lookup and edit drafts
/// - Create/update with reconciliation
/// - CSV export of the filtered view
///
/// All state lives for the dashboard's lifetime. Query operations are
/// synchronous; only `load` and `submit` await the store.
pub struct Dashboard {
    config: DashboardConfig,

    gateway: Arc<dyn RecordGateway>,

    /// Canonical set and query state.
    view: RwLock<ViewEngine>,

    coordinator: MutationCoordinator,

    subscriptions: SubscriptionManager,

    /// Source of export timestamps.
    clock: Arc<dyn Clock>,

    load_state: RwLock<LoadState>,
}

impl Dashboard {
    /// Create a dashboard over `gateway` using the wall clock.
    pub fn new(config: DashboardConfig, gateway: Arc<dyn RecordGateway>) -> Result<Self> {
        Self::with_clock(config, gateway, Arc::new(SystemClock))
    }

    /// Create a dashboard with an explicit clock.
    pub fn with_clock(
        config: DashboardConfig,
        gateway: Arc<dyn RecordGateway>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let page_size = config.page_size()?;

        Ok(Self {
            coordinator: MutationCoordinator::new(Arc::clone(&gateway)),
            view: RwLock::new(ViewEngine::new(page_size)),
            subscriptions: SubscriptionManager::new(),
            load_state: RwLock::new(LoadState::Idle),
            config,
            gateway,
            clock,
        })
    }

    /// Create a dashboard talking HTTP to `config.base_url`.
    pub fn connect(config: DashboardConfig) -> Result<Self> {
        let gateway = HttpGateway::from_config(&config)
            .map_err(|e| DashboardError::Config(format!("cannot build HTTP client: {}", e)))?;
        Self::new(config, Arc::new(gateway))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.read().clone()
    }

    // --- Loading ---

    /// Fetch every record and replace the canonical set.
    ///
    /// On failure the canonical set is cleared so the view shows an empty
    /// error state rather than stale data. Returns the number of records.
    pub async fn load(&self) -> Result<usize> {
        *self.load_state.write() = LoadState::Loading;

        match self.gateway.list().await {
            Ok(records) => {
                let count = records.len();
                self.view.write().replace_records(records);
                *self.load_state.write() = LoadState::Ready;
                info!(gateway = self.gateway.name(), count, "records loaded");
                self.publish_view();
                Ok(count)
            }
            Err(e) => {
                warn!(gateway = self.gateway.name(), error = %e, "load failed");
                let error = DashboardError::Load(e);
                let message = error.user_message();

                self.view.write().clear();
                *self.load_state.write() = LoadState::Failed(message.clone());
                self.subscriptions.broadcast_load_failed(&message);
                Err(error)
            }
        }
    }

    // --- Query operations ---

    /// Filter titles by `term` (trimmed, case-insensitive). Back to page 1.
    pub fn set_search(&self, term: &str) {
        self.view.write().set_search(term);
        self.publish_view();
    }

    /// Sort by `field`, flipping direction on repeat. Back to page 1.
    pub fn toggle_sort(&self, field: SortField) {
        self.view.write().toggle_sort(field);
        self.publish_view();
    }

    /// Change the page size. Back to page 1.
    pub fn set_page_size(&self, page_size: usize) -> Result<()> {
        let page_size =
            NonZeroUsize::new(page_size).ok_or(DashboardError::InvalidPageSize(page_size))?;
        self.view.write().set_page_size(page_size);
        self.publish_view();
        Ok(())
    }

    /// Move to `page`; requests outside `[1, total_pages]` are ignored.
    pub fn go_to_page(&self, page: usize) -> Navigation {
        let outcome = self.view.write().go_to_page(page);
        if outcome == Navigation::Moved {
            self.publish_view();
        }
        outcome
    }

    /// Derive the active page.
    pub fn current_view(&self) -> ViewPage {
        self.view.read().current_view()
    }

    /// Navigation bar for the active page.
    pub fn page_window(&self) -> PageWindow {
        self.view.read().page_window(self.config.max_visible_pages)
    }

    /// Snapshot of search, sort and paging inputs.
    pub fn query(&self) -> QueryState {
        self.view.read().query().clone()
    }

    // --- Detail and editing ---

    /// Record behind an activated row.
    pub fn record(&self, id: RecordId) -> Option<Record> {
        self.view.read().get(id).cloned()
    }

    /// Edit form pre-filled from a record.
    pub fn draft_for(&self, id: RecordId) -> Option<Draft> {
        self.view.read().get(id).map(Draft::from_record)
    }

    pub fn validate(&self, draft: &Draft) -> ValidationReport {
        self.coordinator.validate(draft)
    }

    /// Whether a save is awaiting the store (submit control disabled).
    pub fn is_submitting(&self) -> bool {
        self.coordinator.is_submitting()
    }

    /// Create (no `editing`) or update a record, then re-derive the view
    /// with the last search term.
    pub async fn submit(&self, draft: &Draft, editing: Option<RecordId>) -> Result<SavedRecord> {
        let saved = self.coordinator.submit(draft, editing, &self.view).await?;
        self.subscriptions.broadcast_saved(saved.record.id, saved.created);
        self.publish_view();
        Ok(saved)
    }

    // --- Export ---

    /// Export every record matching the search, in view order, ignoring
    /// paging.
    pub fn export_csv(&self) -> Result<ExportFile> {
        let (contents, rows) = {
            let engine = self.view.read();
            let records = engine.filtered();
            let rows = records.len();
            (export_csv(records)?, rows)
        };
        let filename = export_filename(&self.config.export_prefix, self.clock.now());

        info!(%filename, rows, "exported csv");
        self.subscriptions.broadcast_exported(&filename, rows);

        Ok(ExportFile {
            filename,
            contents,
            rows,
        })
    }

    // --- Subscriptions ---

    /// Subscribe a rendering sink. A buffer size of 0 uses the configured
    /// default.
    pub fn subscribe(&self, mut config: SubscriptionConfig) -> SubscriptionHandle {
        if config.buffer_size == 0 {
            config.buffer_size = self.config.event_buffer_size;
        }
        self.subscriptions.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }

    fn publish_view(&self) {
        if self.subscriptions.subscription_count() == 0 {
            return;
        }
        let summary = {
            let engine = self.view.read();
            ViewSummary::from_view(&engine.current_view(), engine.query())
        };
        self.subscriptions.broadcast_view(summary);
    }
}
