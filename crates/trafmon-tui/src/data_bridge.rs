//! Data bridge: forwards [`Dashboard`] view changes as TUI actions.
//!
//! Runs as a background task: subscribes to the five resource channels of
//! the view store, pushes the current snapshots, then turns every applied
//! fetch into an [`Action`] until cancelled.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use trafmon_core::{Dashboard, ListView, Resource, TableView, Versioned, table};

use crate::action::Action;

pub async fn spawn_data_bridge(
    dashboard: Dashboard,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let store = dashboard.store();
    let mut traffic = store.subscribe_traffic();
    let mut interfaces = store.subscribe_interfaces();
    let mut alerts = store.subscribe_alerts();
    let mut packets = store.subscribe_packets();
    let mut users = store.subscribe_users();

    // Initial snapshots so screens render whatever is already applied
    let snapshot = traffic.borrow_and_update().view.clone();
    let _ = action_tx.send(Action::TrafficUpdated(snapshot));
    forward(&mut interfaces, Resource::Interfaces, table::interfaces_table, &action_tx);
    forward(&mut alerts, Resource::Alerts, table::alerts_table, &action_tx);
    forward(&mut packets, Resource::Packets, table::packets_table, &action_tx);
    forward(&mut users, Resource::Users, table::users_table, &action_tx);

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = traffic.changed() => {
                let (view, at) = {
                    let current = traffic.borrow_and_update();
                    (current.view.clone(), current.updated_at)
                };
                let _ = action_tx.send(Action::TrafficUpdated(view));
                if let Some(at) = at {
                    let _ = action_tx.send(Action::Fetched(Resource::Traffic, at));
                }
            }
            Ok(()) = interfaces.changed() => {
                forward(&mut interfaces, Resource::Interfaces, table::interfaces_table, &action_tx);
            }
            Ok(()) = alerts.changed() => {
                forward(&mut alerts, Resource::Alerts, table::alerts_table, &action_tx);
            }
            Ok(()) = packets.changed() => {
                forward(&mut packets, Resource::Packets, table::packets_table, &action_tx);
            }
            Ok(()) = users.changed() => {
                forward(&mut users, Resource::Users, table::users_table, &action_tx);
            }

            else => break,
        }
    }

    debug!("data bridge stopped");
}

/// Build the table model of the latest list and send it.
fn forward<T>(
    rx: &mut watch::Receiver<Versioned<ListView<T>>>,
    resource: Resource,
    to_table: fn(&[T]) -> TableView,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    let (view, at) = {
        let current = rx.borrow_and_update();
        (to_table(&current.view), current.updated_at)
    };
    let _ = action_tx.send(Action::TableUpdated(view));
    if let Some(at) = at {
        let _ = action_tx.send(Action::Fetched(resource, at));
    }
}
