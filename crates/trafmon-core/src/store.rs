// ── Per-resource view store ──
//
// One `watch` channel per resource holds the latest applied view. Every
// fetch takes a sequence number when it is issued; its response is applied
// only if no newer fetch for the same resource has been applied already.
// The sequence check and the write happen under the channel's lock
// (`send_if_modified`), so a late response can never overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::chart::Charts;
use crate::model::{Alert, Interface, Packet, TrafficSample, User};
use crate::table::{self, TableId, TableView};

/// A view plus the bookkeeping of the fetch that produced it.
#[derive(Debug, Clone)]
pub struct Versioned<V> {
    /// Sequence of the applied fetch; 0 before the first one.
    pub seq: u64,
    /// When the applied response arrived.
    pub updated_at: Option<DateTime<Utc>>,
    pub view: V,
}

impl<V> Versioned<V> {
    /// `true` until the first successful fetch has been applied.
    pub fn is_pending(&self) -> bool {
        self.seq == 0
    }
}

/// Sequenced holder for one resource's view.
pub struct Slot<V> {
    issued: AtomicU64,
    tx: watch::Sender<Versioned<V>>,
}

impl<V> Slot<V> {
    pub fn new(initial: V) -> Self {
        let (tx, _) = watch::channel(Versioned {
            seq: 0,
            updated_at: None,
            view: initial,
        });
        Self {
            issued: AtomicU64::new(0),
            tx,
        }
    }

    /// Reserve the sequence number for a fetch about to be sent.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Apply `update` if `seq` is newer than the applied sequence.
    ///
    /// Returns `false` (and leaves the view untouched) for stale responses.
    pub fn apply(&self, seq: u64, update: impl FnOnce(&mut V)) -> bool {
        self.tx.send_if_modified(|current| {
            if seq <= current.seq {
                return false;
            }
            update(&mut current.view);
            current.seq = seq;
            current.updated_at = Some(Utc::now());
            true
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Versioned<V>> {
        self.tx.subscribe()
    }

    pub fn applied_seq(&self) -> u64 {
        self.tx.borrow().seq
    }
}

impl<V: Clone> Slot<V> {
    /// Clone of the current view.
    pub fn current(&self) -> V {
        self.tx.borrow().view.clone()
    }
}

// ── Views ───────────────────────────────────────────────────────────

/// Traffic view: the raw samples plus the two charts derived from them.
#[derive(Debug, Clone, Default)]
pub struct TrafficView {
    pub samples: Arc<Vec<TrafficSample>>,
    pub charts: Charts,
}

impl TrafficView {
    pub fn new() -> Self {
        Self {
            samples: Arc::new(Vec::new()),
            charts: Charts::new(),
        }
    }

    pub(crate) fn replace(&mut self, samples: Vec<TrafficSample>) {
        self.charts.update(&samples);
        self.samples = Arc::new(samples);
    }
}

pub type ListView<T> = Arc<Vec<T>>;

/// Latest applied view of all five resources.
pub struct ViewStore {
    pub(crate) traffic: Slot<TrafficView>,
    pub(crate) interfaces: Slot<ListView<Interface>>,
    pub(crate) alerts: Slot<ListView<Alert>>,
    pub(crate) packets: Slot<ListView<Packet>>,
    pub(crate) users: Slot<ListView<User>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self {
            traffic: Slot::new(TrafficView::new()),
            interfaces: Slot::new(Arc::new(Vec::new())),
            alerts: Slot::new(Arc::new(Vec::new())),
            packets: Slot::new(Arc::new(Vec::new())),
            users: Slot::new(Arc::new(Vec::new())),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn traffic(&self) -> TrafficView {
        self.traffic.current()
    }

    pub fn interfaces(&self) -> ListView<Interface> {
        self.interfaces.current()
    }

    pub fn alerts(&self) -> ListView<Alert> {
        self.alerts.current()
    }

    pub fn packets(&self) -> ListView<Packet> {
        self.packets.current()
    }

    pub fn users(&self) -> ListView<User> {
        self.users.current()
    }

    /// Table model of the current view of `id`.
    pub fn table(&self, id: TableId) -> TableView {
        match id {
            TableId::Interfaces => table::interfaces_table(&self.interfaces()),
            TableId::Alerts => table::alerts_table(&self.alerts()),
            TableId::Packets => table::packets_table(&self.packets()),
            TableId::Users => table::users_table(&self.users()),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_traffic(&self) -> watch::Receiver<Versioned<TrafficView>> {
        self.traffic.subscribe()
    }

    pub fn subscribe_interfaces(&self) -> watch::Receiver<Versioned<ListView<Interface>>> {
        self.interfaces.subscribe()
    }

    pub fn subscribe_alerts(&self) -> watch::Receiver<Versioned<ListView<Alert>>> {
        self.alerts.subscribe()
    }

    pub fn subscribe_packets(&self) -> watch::Receiver<Versioned<ListView<Packet>>> {
        self.packets.subscribe()
    }

    pub fn subscribe_users(&self) -> watch::Receiver<Versioned<ListView<User>>> {
        self.users.subscribe()
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}
