//! Realtime change feed
//!
//! The backend pushes row-level change events for the subscribed owner.
//! Delivery is at-least-once and ordered per filter, so the cache
//! reducer must treat a re-delivered event as a no-op. Subscriptions are
//! explicit handles with a start/stop lifecycle: one per owner, stopped
//! on owner change or teardown to avoid duplicate delivery.

use serde_json::Value;
use shared::models::Reservation;
use shared::reservation::status::ReservationStatus;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Kind of row change, as emitted by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One row-level change event with old/new snapshots
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// Handle for one owner's change-feed subscription
///
/// Stopping is idempotent; a stopped subscription delivers nothing
/// further. Dropping the handle stops it.
#[derive(Debug)]
pub struct RealtimeSubscription {
    owner: Uuid,
    receiver: mpsc::Receiver<ChangeEvent>,
    cancel: CancellationToken,
}

impl RealtimeSubscription {
    /// Create a subscription and the sender half the transport feeds
    pub fn channel(owner: Uuid, capacity: usize) -> (mpsc::Sender<ChangeEvent>, Self) {
        let (sender, receiver) = mpsc::channel(capacity);
        let subscription = Self {
            owner,
            receiver,
            cancel: CancellationToken::new(),
        };
        (sender, subscription)
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    /// Await the next event; `None` once stopped or the feed closed
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        tokio::select! {
            _ = self.cancel.cancelled() => None,
            event = self.receiver.recv() => event,
        }
    }

    /// Stop delivering events; safe to call more than once
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RealtimeSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// A status transition observed through the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub reservation_id: i64,
    pub from: ReservationStatus,
    pub to: ReservationStatus,
}

/// Idempotent merge reducer over reservation rows, keyed by id
///
/// An event is authoritative for that row's latest state: the incoming
/// snapshot overwrites the cached copy. Applying the same event twice is
/// a no-op beyond the first, and an `Insert` for a known id merges like
/// an `Update` (at-least-once delivery).
#[derive(Debug, Default)]
pub struct ReservationCache {
    rows: HashMap<i64, Reservation>,
}

impl ReservationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one event; reports the status transition, if any
    pub fn apply(&mut self, event: &ChangeEvent) -> Option<StatusChange> {
        match event.kind {
            ChangeKind::Delete => {
                let id = event
                    .old
                    .as_ref()
                    .and_then(|row| row.get("id"))
                    .and_then(Value::as_i64)?;
                self.rows.remove(&id);
                None
            }
            ChangeKind::Insert | ChangeKind::Update => {
                let row = event.new.clone()?;
                let incoming: Reservation = match serde_json::from_value(row) {
                    Ok(reservation) => reservation,
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring undecodable change event");
                        return None;
                    }
                };
                let id = incoming.id?;

                let previous = self.rows.get(&id);
                if previous == Some(&incoming) {
                    tracing::debug!(id, "duplicate change event, no-op");
                    return None;
                }

                let change = previous.and_then(|prev| {
                    let from = prev.status();
                    let to = incoming.status();
                    (from != to).then_some(StatusChange {
                        reservation_id: id,
                        from,
                        to,
                    })
                });

                self.rows.insert(id, incoming);
                change
            }
        }
    }

    pub fn get(&self, id: i64) -> Option<&Reservation> {
        self.rows.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the cache contents from a full fetch
    pub fn replace_all(&mut self, reservations: Vec<Reservation>) {
        self.rows = reservations
            .into_iter()
            .filter_map(|r| r.id.map(|id| (id, r)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::CatalogRef;
    use shared::reservation::menu::MenuSelection;

    fn reservation(id: i64, status: &str) -> Reservation {
        Reservation {
            id: Some(id),
            receipt_code: "REC-20250810-101500-AB12CD".to_string(),
            profile_id: 1,
            celebrant_name: "Mia".to_string(),
            package: CatalogRef::new(1, "Silver"),
            theme: CatalogRef::new(2, "Garden"),
            grazing_table: None,
            venue: "Pavilion".to_string(),
            event_date: "2025-10-04".to_string(),
            event_time: "16:00:00".to_string(),
            location: "Quezon City".to_string(),
            pax: 50,
            adults_qty: 30,
            kids_qty: 20,
            menu_selection: MenuSelection::new(),
            status: status.to_string(),
            created_at: None,
        }
    }

    fn update_event(row: &Reservation) -> ChangeEvent {
        ChangeEvent {
            table: "reservations".to_string(),
            kind: ChangeKind::Update,
            old: None,
            new: Some(serde_json::to_value(row).unwrap()),
        }
    }

    #[test]
    fn test_insert_then_status_update() {
        let mut cache = ReservationCache::new();
        let pending = reservation(7, "pending");

        let insert = ChangeEvent {
            table: "reservations".to_string(),
            kind: ChangeKind::Insert,
            old: None,
            new: Some(serde_json::to_value(&pending).unwrap()),
        };
        assert_eq!(cache.apply(&insert), None);
        assert_eq!(cache.len(), 1);

        let confirmed = reservation(7, "confirmed");
        let change = cache.apply(&update_event(&confirmed)).unwrap();
        assert_eq!(change.from, ReservationStatus::Pending);
        assert_eq!(change.to, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_duplicate_update_is_noop() {
        let mut cache = ReservationCache::new();
        let row = reservation(3, "confirmed");

        cache.apply(&update_event(&row));
        // Same event again: no state change, no reported transition.
        assert_eq!(cache.apply(&update_event(&row)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_of_known_id_merges_like_update() {
        let mut cache = ReservationCache::new();
        cache.apply(&update_event(&reservation(5, "pending")));

        let redelivered = ChangeEvent {
            table: "reservations".to_string(),
            kind: ChangeKind::Insert,
            old: None,
            new: Some(serde_json::to_value(&reservation(5, "ongoing")).unwrap()),
        };
        let change = cache.apply(&redelivered).unwrap();
        assert_eq!(change.to, ReservationStatus::Ongoing);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_delete_removes_row() {
        let mut cache = ReservationCache::new();
        let row = reservation(9, "pending");
        cache.apply(&update_event(&row));

        let delete = ChangeEvent {
            table: "reservations".to_string(),
            kind: ChangeKind::Delete,
            old: Some(serde_json::to_value(&row).unwrap()),
            new: None,
        };
        assert_eq!(cache.apply(&delete), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_undecodable_event_is_ignored() {
        let mut cache = ReservationCache::new();
        let garbage = ChangeEvent {
            table: "reservations".to_string(),
            kind: ChangeKind::Update,
            old: None,
            new: Some(json!({"id": "not-a-number"})),
        };
        assert_eq!(cache.apply(&garbage), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_subscription_delivers_then_stops() {
        let owner = Uuid::new_v4();
        let (sender, mut subscription) = RealtimeSubscription::channel(owner, 16);
        assert_eq!(subscription.owner(), owner);

        let row = reservation(1, "pending");
        sender.send(update_event(&row)).await.unwrap();
        let event = subscription.next().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Update);

        subscription.stop();
        subscription.stop(); // idempotent
        assert!(subscription.is_stopped());
        assert!(subscription.next().await.is_none());
    }

    #[tokio::test]
    async fn test_closed_sender_ends_subscription() {
        let (sender, mut subscription) = RealtimeSubscription::channel(Uuid::new_v4(), 4);
        drop(sender);
        assert!(subscription.next().await.is_none());
    }
}
