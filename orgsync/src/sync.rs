//! The sync client: owns the mirror, drives the transport, dispatches views.
//!
//! Every mutation follows the same contract: nothing is applied to the mirror
//! until the server confirms, the dependent view bindings fire exactly once
//! afterwards, and a failure leaves the mirror at its last-known-good state
//! with an error [`Notice`] broadcast to subscribers. There is no optimistic
//! intermediate state, no retry, and no conflict detection — two overlapping
//! edits to the same record are last-write-wins.
//!
//! ## Quick start
//!
//! ```ignore
//! use orgsync::{EntityKind, SyncClient};
//!
//! let client = SyncClient::builder("http://localhost:3000")
//!     .bind_view("members", &[EntityKind::Member], |mirror| {
//!         render_members(mirror.all(EntityKind::Member));
//!     })
//!     .build();
//!
//! client.seed_if_empty().await?;
//! client.refresh_all().await?;
//! ```

use std::sync::{Arc, RwLock, RwLockReadGuard};

use futures::future;
use tokio::sync::broadcast;

use crate::client::{HttpTransport, Transport};
use crate::error::SyncError;
use crate::messages::Notice;
use crate::mirror::Mirror;
use crate::model::{Document, EntityKind};
use crate::registry;
use crate::seed;
use crate::views::ViewRegistry;

/// Builder for [`SyncClient`].
pub struct SyncClientBuilder {
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
    views: ViewRegistry,
    preload_defaults: bool,
}

impl SyncClientBuilder {
    pub fn new(base_url: &str) -> Self {
        SyncClientBuilder {
            base_url: base_url.to_string(),
            transport: None,
            views: ViewRegistry::new(),
            preload_defaults: false,
        }
    }

    /// Substitute the transport (tests use an in-memory fake).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Start the mirror from the built-in defaults instead of empty.
    pub fn preload_defaults(mut self) -> Self {
        self.preload_defaults = true;
        self
    }

    /// Register a view section; see [`ViewRegistry::bind`].
    pub fn bind_view(
        mut self,
        name: impl Into<String>,
        kinds: &[EntityKind],
        refresh: impl Fn(&Mirror) + Send + Sync + 'static,
    ) -> Self {
        self.views.bind(name, kinds, refresh);
        self
    }

    pub fn build(self) -> SyncClient {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new(&self.base_url)));
        let mirror = if self.preload_defaults {
            Mirror::preloaded()
        } else {
            Mirror::new()
        };
        let (notice_tx, _) = broadcast::channel(256);
        SyncClient {
            transport,
            mirror: RwLock::new(mirror),
            views: self.views,
            notice_tx,
        }
    }
}

pub struct SyncClient {
    transport: Arc<dyn Transport>,
    mirror: RwLock<Mirror>,
    views: ViewRegistry,
    notice_tx: broadcast::Sender<Notice>,
}

impl SyncClient {
    pub fn builder(base_url: &str) -> SyncClientBuilder {
        SyncClientBuilder::new(base_url)
    }

    /// Subscribe to user-facing notices.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notice_tx.subscribe()
    }

    /// Read access to the cache. Callbacks and callers must not re-enter a
    /// mutating operation while holding the guard.
    pub fn mirror(&self) -> RwLockReadGuard<'_, Mirror> {
        self.mirror.read().unwrap()
    }

    /// Fetch every collection concurrently and merge the results.
    ///
    /// The join is fail-fast: if any fetch fails, the whole refresh aborts,
    /// the mirror is untouched and a warning notice is broadcast. On success
    /// each kind's list is replaced **only if** the fetched sequence is
    /// non-empty — an empty result keeps the previously loaded records. That
    /// fallback masks a genuinely emptied collection; see DESIGN.md before
    /// changing it.
    pub async fn refresh_all(&self) -> Result<(), SyncError> {
        let fetches: Vec<_> = EntityKind::ALL
            .iter()
            .map(|kind| self.transport.list(*kind))
            .collect();

        match future::try_join_all(fetches).await {
            Ok(lists) => {
                {
                    let mut mirror = self.mirror.write().unwrap();
                    for (kind, fetched) in EntityKind::ALL.into_iter().zip(lists) {
                        if !fetched.is_empty() {
                            mirror.replace_all(kind, fetched);
                        }
                    }
                }
                let mirror = self.mirror.read().unwrap();
                self.views.fire_all(&mirror);
                Ok(())
            }
            Err(err) => {
                log::error!("refresh failed: {err}");
                self.notify(Notice::error(
                    "Failed to load data from the server. Using local data instead.",
                ));
                Err(err)
            }
        }
    }

    /// Create or update one record: a record carrying an identifier is
    /// updated, one without is created. The mirror is only touched after the
    /// server confirms, then the kind's view bindings fire.
    pub async fn save(&self, kind: EntityKind, record: Document) -> Result<Document, SyncError> {
        let existing_id = record.id().map(str::to_string);
        let result = match &existing_id {
            Some(id) => self.transport.update(kind, id, &record).await,
            None => self.transport.create(kind, &record).await,
        };

        match result {
            Ok(saved) => {
                {
                    let mut mirror = self.mirror.write().unwrap();
                    if existing_id.is_some() {
                        mirror.replace(kind, saved.clone());
                    } else {
                        mirror.insert(kind, saved.clone());
                    }
                }
                let mirror = self.mirror.read().unwrap();
                self.views.fire_for(kind, &mirror);
                Ok(saved)
            }
            Err(err) => {
                let noun = registry::find(kind).noun;
                log::error!("failed to save {noun}: {err}");
                self.notify(Notice::error(format!("Failed to save {noun}")));
                Err(err)
            }
        }
    }

    /// Delete one record by identifier, then drop it from the mirror and
    /// fire the kind's view bindings.
    pub async fn remove(&self, kind: EntityKind, id: &str) -> Result<(), SyncError> {
        match self.transport.delete(kind, id).await {
            Ok(()) => {
                {
                    let mut mirror = self.mirror.write().unwrap();
                    mirror.remove(kind, id);
                }
                let mirror = self.mirror.read().unwrap();
                self.views.fire_for(kind, &mirror);
                Ok(())
            }
            Err(err) => {
                let noun = registry::find(kind).noun;
                log::error!("failed to delete {noun} {id}: {err}");
                self.notify(Notice::error(format!("Failed to delete {noun}")));
                Err(err)
            }
        }
    }

    /// Populate a fresh deployment.
    ///
    /// Checks whether the hero-slide collection is empty remotely; if so,
    /// creates every built-in default record for all seven kinds serially
    /// (one request at a time) and returns `Ok(true)`. Startup-time only —
    /// this is not a reseed or reset.
    pub async fn seed_if_empty(&self) -> Result<bool, SyncError> {
        match self.try_seed().await {
            Ok(seeded) => {
                if seeded {
                    self.notify(Notice::success("Database initialized with default data"));
                }
                Ok(seeded)
            }
            Err(err) => {
                log::error!("seeding failed: {err}");
                self.notify(Notice::error("Failed to initialize database"));
                Err(err)
            }
        }
    }

    async fn try_seed(&self) -> Result<bool, SyncError> {
        let slides = self.transport.list(EntityKind::HeroSlide).await?;
        if !slides.is_empty() {
            return Ok(false);
        }
        log::info!("store is empty, seeding default records");
        for kind in EntityKind::ALL {
            for record in seed::defaults(kind) {
                self.transport.create(kind, &record).await?;
            }
        }
        Ok(true)
    }

    fn notify(&self, notice: Notice) {
        let _ = self.notice_tx.send(notice);
    }
}
