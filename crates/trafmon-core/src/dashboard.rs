// ── Dashboard controller ──
//
// Owns the backend client, the per-resource view store and the refresh
// timer. Every fetch runs as its own task; results land in the store only
// if they are the newest response for their resource. Actions hit the
// mutating endpoints and then re-fetch the resource they changed, even
// when the backend answered with an error status.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use strum::IntoEnumIterator;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use trafmon_api::transport::{TlsMode, TransportConfig};
use trafmon_api::{ActionReply, ApiClient};

use crate::config::{DashboardConfig, TlsVerification};
use crate::confirm::{ActionOutcome, Confirm, DELETE_USER_PROMPT};
use crate::error::CoreError;
use crate::model::{Resource, TrafficSample, TrafficSummary, TrendPoint};
use crate::store::{ListView, Slot, ViewStore};

// ── Dashboard ────────────────────────────────────────────────────

/// The dashboard controller shared by the CLI and the TUI.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. Does nothing until
/// [`start()`](Self::start) (background polling) or an explicit
/// [`load()`](Self::load) is called.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    client: ApiClient,
    store: ViewStore,
    cancel: CancellationToken,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Dashboard {
    /// Build the HTTP client for `config`. Does not contact the backend.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ApiClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Use a pre-built API client.
    pub fn with_client(config: DashboardConfig, client: ApiClient) -> Self {
        Self {
            inner: Arc::new(DashboardInner {
                config,
                client,
                store: ViewStore::new(),
                cancel: CancellationToken::new(),
                timer: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Latest applied views and their subscriptions.
    pub fn store(&self) -> &ViewStore {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Fetch every resource now, then keep refreshing them on the
    /// configured interval until [`stop()`](Self::stop).
    ///
    /// Calling `start` on a running or stopped dashboard does nothing.
    pub async fn start(&self) {
        let mut timer = self.inner.timer.lock().await;
        if timer.is_some() || self.inner.cancel.is_cancelled() {
            return;
        }

        self.refresh_all();

        let period = self.inner.config.refresh_interval;
        if period.is_zero() {
            debug!("refresh interval is zero, periodic refresh disabled");
        } else {
            let dash = self.clone();
            let cancel = self.inner.cancel.clone();
            *timer = Some(tokio::spawn(refresh_task(dash, period, cancel)));
        }
        info!(
            url = %self.inner.config.url,
            interval_secs = period.as_secs(),
            "dashboard started"
        );
    }

    /// Cancel the refresh timer. In-flight fetches are left to finish and
    /// may still update the store.
    pub async fn stop(&self) {
        self.cancel();
        if let Some(handle) = self.inner.timer.lock().await.take() {
            let _ = handle.await;
            debug!("dashboard stopped");
        }
    }

    /// Cancel the refresh timer without waiting for its task to exit.
    /// Usable from synchronous contexts such as `Drop`.
    pub fn cancel(&self) {
        self.inner.cancel.cancel();
    }

    /// `true` once [`stop()`](Self::stop) or [`cancel()`](Self::cancel)
    /// has been called.
    pub fn is_stopped(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Fetching ─────────────────────────────────────────────────

    /// Fire one independent fetch per resource.
    pub fn refresh_all(&self) {
        for resource in Resource::iter() {
            self.refresh(resource);
        }
    }

    /// Fire a fetch for one resource. Failures are logged and leave the
    /// current view in place.
    pub fn refresh(&self, resource: Resource) {
        let dash = self.clone();
        tokio::spawn(async move { dash.reload(resource).await });
    }

    /// Fetch one resource and apply it to the store.
    ///
    /// Returns `Ok(false)` when a newer response for the same resource had
    /// already been applied and this one was discarded.
    pub async fn load(&self, resource: Resource) -> Result<bool, CoreError> {
        let client = &self.inner.client;
        let store = &self.inner.store;

        match resource {
            Resource::Traffic => {
                let seq = store.traffic.issue();
                let samples: Vec<TrafficSample> = client
                    .list_traffic()
                    .await?
                    .into_iter()
                    .map(TrafficSample::from)
                    .collect();
                let applied = store.traffic.apply(seq, |view| view.replace(samples));
                Ok(note_stale(resource, seq, applied))
            }
            Resource::Interfaces => {
                load_list(resource, &store.interfaces, client.list_interfaces()).await
            }
            Resource::Alerts => load_list(resource, &store.alerts, client.list_alerts()).await,
            Resource::Packets => load_list(resource, &store.packets, client.list_packets()).await,
            Resource::Users => load_list(resource, &store.users, client.list_users()).await,
        }
    }

    /// Load a resource, logging rather than returning failures.
    async fn reload(&self, resource: Resource) {
        if let Err(e) = self.load(resource).await {
            warn!(%resource, error = %e, "fetch failed, keeping previous view");
        }
    }

    // ── Tab navigation ───────────────────────────────────────────

    /// Refresh the resource behind a newly selected tab.
    pub fn select(&self, tab: Resource) {
        debug!(%tab, "tab selected");
        self.refresh(tab);
    }

    /// Like [`select()`](Self::select), by tab name (case-insensitive).
    /// Unknown names refresh nothing and return `None`.
    pub fn select_tab(&self, name: &str) -> Option<Resource> {
        let Ok(tab) = Resource::from_str(name) else {
            debug!(name, "no resource behind tab");
            return None;
        };
        self.select(tab);
        Some(tab)
    }

    // ── Actions ──────────────────────────────────────────────────

    /// Flip monitoring of an interface, then re-fetch interfaces.
    pub async fn toggle_monitoring(&self, id: i64) -> Result<(), CoreError> {
        self.act(
            "toggle monitoring",
            "interface",
            id,
            self.inner.client.toggle_interface(id),
            Resource::Interfaces,
        )
        .await
    }

    /// Mark an alert resolved, then re-fetch alerts.
    pub async fn resolve_alert(&self, id: i64) -> Result<(), CoreError> {
        self.act(
            "resolve alert",
            "alert",
            id,
            self.inner.client.resolve_alert(id),
            Resource::Alerts,
        )
        .await
    }

    /// Delete a user once `confirm` agrees, then re-fetch users.
    ///
    /// A declined confirmation sends nothing.
    pub async fn delete_user(
        &self,
        id: i64,
        confirm: &impl Confirm,
    ) -> Result<ActionOutcome, CoreError> {
        if !confirm.confirm(DELETE_USER_PROMPT) {
            debug!(id, "user deletion declined");
            return Ok(ActionOutcome::Declined);
        }
        self.act(
            "delete user",
            "user",
            id,
            self.inner.client.delete_user(id),
            Resource::Users,
        )
        .await?;
        Ok(ActionOutcome::Applied)
    }

    /// Send an action and re-fetch `affected` once the backend answered
    /// with JSON, whatever the status. An error status is still returned to
    /// the caller after the re-fetch; transport failures and non-JSON
    /// replies skip it.
    async fn act<F>(
        &self,
        action: &str,
        target: &str,
        id: i64,
        request: F,
        affected: Resource,
    ) -> Result<(), CoreError>
    where
        F: Future<Output = Result<ActionReply, trafmon_api::Error>>,
    {
        debug!(action, id, "sending action");
        let reply = match request.await {
            Ok(reply) => reply,
            Err(e) => {
                let err = CoreError::from(e).with_target(target, id);
                warn!(action, id, error = %err, "action failed");
                return Err(err);
            }
        };

        self.reload(affected).await;

        if let Some(e) = reply.rejection() {
            let err = CoreError::from(e).with_target(target, id);
            warn!(action, id, status = reply.status, error = %err, "backend rejected action");
            return Err(err);
        }
        info!(action, id, "action applied");
        Ok(())
    }

    // ── On-demand extras ─────────────────────────────────────────

    /// Aggregate traffic counters. Not part of the refresh cycle.
    pub async fn summary(&self) -> Result<TrafficSummary, CoreError> {
        Ok(self.inner.client.get_traffic_stats().await?.into())
    }

    /// Byte volume per minute over the recent window.
    pub async fn trend(&self) -> Result<Vec<TrendPoint>, CoreError> {
        Ok(self
            .inner
            .client
            .get_traffic_trend()
            .await?
            .into_iter()
            .map(TrendPoint::from)
            .collect())
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically fire a fetch for every resource.
async fn refresh_task(dashboard: Dashboard, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => dashboard.refresh_all(),
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

async fn load_list<A, T, F>(
    resource: Resource,
    slot: &Slot<ListView<T>>,
    fetch: F,
) -> Result<bool, CoreError>
where
    T: From<A>,
    F: Future<Output = Result<Vec<A>, trafmon_api::Error>>,
{
    let seq = slot.issue();
    let items: Vec<T> = fetch.await?.into_iter().map(T::from).collect();
    let applied = slot.apply(seq, move |view| *view = Arc::new(items));
    Ok(note_stale(resource, seq, applied))
}

fn note_stale(resource: Resource, seq: u64, applied: bool) -> bool {
    if !applied {
        debug!(%resource, seq, "discarded out-of-order response");
    }
    applied
}

/// Build a [`TransportConfig`] from the dashboard configuration.
fn build_transport(config: &DashboardConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
