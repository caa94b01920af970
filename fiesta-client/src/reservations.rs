//! Reservation submission and lifecycle service
//!
//! Drives the whole client-side reservation flow: gate the form, mint
//! the receipt code, insert the pending row, request cancellations, and
//! fold realtime change events into the local cache, surfacing status
//! transitions as notifications.

use crate::error::ClientResult;
use crate::notify::{Notification, Notifier};
use crate::realtime::{ChangeEvent, RealtimeSubscription, ReservationCache};
use crate::session::AppContext;
use crate::store::{DataStore, Filter};
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::{CatalogRef, Reservation, ReservationCreate};
use shared::reservation::calendar::FULLY_BOOKED_THRESHOLD;
use shared::reservation::datetime;
use shared::reservation::guests;
use shared::reservation::menu::MenuSelection;
use shared::reservation::status::ReservationStatus;
use shared::util::receipt_id;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Raw reservation form state, exactly as the user typed it
///
/// Count fields stay text until the submission gate parses them;
/// date/time stay raw until the normalizer canonicalizes them.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub celebrant_name: String,
    pub package: Option<CatalogRef>,
    pub theme: Option<CatalogRef>,
    pub grazing_table: Option<CatalogRef>,
    pub venue: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub pax: String,
    pub adults: String,
    pub kids: String,
    pub menu: MenuSelection,
}

/// Releases the submission flag when the attempt ends, on any path
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Client-side reservation orchestrator
pub struct ReservationService<S: DataStore, N: Notifier> {
    store: Arc<S>,
    notifier: Arc<N>,
    context: AppContext,
    notification_channel: String,
    in_flight: AtomicBool,
    cache: RwLock<ReservationCache>,
}

impl<S: DataStore, N: Notifier> ReservationService<S, N> {
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        context: AppContext,
        notification_channel: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            context,
            notification_channel: notification_channel.into(),
            in_flight: AtomicBool::new(false),
            cache: RwLock::new(ReservationCache::new()),
        }
    }

    /// Submit the form as a new pending reservation.
    ///
    /// At most one submission runs at a time; a second call while one is
    /// in flight fails fast instead of creating a duplicate row. The
    /// flag is released whether the attempt succeeds or fails.
    pub async fn submit(&self, form: &ReservationForm) -> ClientResult<Reservation> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::new(ErrorCode::SubmissionInFlight).into());
        }
        let _guard = InFlightGuard(&self.in_flight);

        let profile = self.context.ensure_profile(self.store.as_ref()).await?;
        let profile_id = profile
            .id
            .ok_or_else(|| AppError::internal("profile row has no id"))?;

        let gate = guests::validate_submission(&form.pax, &form.adults, &form.kids);
        if !gate.can_proceed {
            let message = gate.message.unwrap_or_else(|| "Invalid guest counts".to_string());
            return Err(AppError::business_rule(ErrorCode::GuestCountInvalid, message).into());
        }
        if !form.menu.is_complete() {
            return Err(AppError::new(ErrorCode::MenuIncomplete).into());
        }
        let package = form
            .package
            .clone()
            .ok_or_else(|| AppError::business_rule(ErrorCode::RequiredField, "Please choose a package"))?;
        let theme = form
            .theme
            .clone()
            .ok_or_else(|| AppError::business_rule(ErrorCode::RequiredField, "Please choose a theme"))?;

        let (event_date, event_time) = datetime::normalize(&form.event_date, &form.event_time)?;
        self.check_date_open(&event_date).await?;

        let create = ReservationCreate {
            receipt_code: receipt_id(),
            profile_id,
            celebrant_name: form.celebrant_name.clone(),
            package,
            theme,
            grazing_table: form.grazing_table.clone(),
            venue: form.venue.clone(),
            event_date,
            event_time,
            location: form.location.clone(),
            // Counts just passed the gate, so the parses cannot fail.
            pax: guests::parse_count(&form.pax).unwrap_or(0),
            adults_qty: guests::parse_count(&form.adults).unwrap_or(0),
            kids_qty: guests::parse_count(&form.kids).unwrap_or(0),
            menu_selection: form.menu.clone(),
            status: ReservationStatus::Pending.as_str().to_string(),
        };

        tracing::info!(receipt = %create.receipt_code, date = %create.event_date, "submitting reservation");
        let row = self
            .store
            .insert("reservations", serde_json::to_value(&create)?)
            .await?;
        let reservation: Reservation = serde_json::from_value(row)?;

        // Bulk-persist the chosen menu items as one row per selection.
        let reservation_id = reservation
            .id
            .ok_or_else(|| AppError::internal("reservation row has no id"))?;
        for item_id in form.menu.selected_ids() {
            self.store
                .insert(
                    "menu_orders",
                    json!({ "reservation_id": reservation_id, "menu_item_id": item_id }),
                )
                .await?;
        }
        Ok(reservation)
    }

    /// Reject submission onto a date that already carries the booking
    /// threshold of active reservations. Canceled rows do not hold a slot.
    async fn check_date_open(&self, event_date: &str) -> ClientResult<()> {
        let rows = self
            .store
            .select("reservations", Filter::new().eq("event_date", event_date))
            .await?;
        let active = rows
            .iter()
            .filter_map(|row| row.get("status").and_then(|s| s.as_str()))
            .filter(|s| ReservationStatus::from_raw(s) != ReservationStatus::Canceled)
            .count() as u32;
        if active >= FULLY_BOOKED_THRESHOLD {
            return Err(AppError::new(ErrorCode::DateFullyBooked).into());
        }
        Ok(())
    }

    /// Request cancellation of a pending reservation.
    ///
    /// The server row is re-fetched first: if staff has already advanced
    /// the status, the request is rejected instead of applied
    /// last-write-wins.
    pub async fn cancel(&self, id: i64) -> ClientResult<Reservation> {
        let current = self.reservation(id).await?;
        current.status().validate_cancel()?;

        let rows = self
            .store
            .update(
                "reservations",
                Filter::new().eq("id", json!(id)),
                json!({ "status": ReservationStatus::Canceled.as_str() }),
            )
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;
        tracing::info!(id, "reservation canceled");
        Ok(serde_json::from_value(row)?)
    }

    /// The signed-in user's reservations, newest first
    pub async fn my_reservations(&self) -> ClientResult<Vec<Reservation>> {
        let profile = self.context.ensure_profile(self.store.as_ref()).await?;
        let profile_id = profile
            .id
            .ok_or_else(|| AppError::internal("profile row has no id"))?;

        let rows = self
            .store
            .select(
                "reservations",
                Filter::new()
                    .eq("profile_id", json!(profile_id))
                    .order_by("created_at", false),
            )
            .await?;
        let reservations: Vec<Reservation> = rows
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?;

        let mut cache = self.cache.write().await;
        cache.replace_all(reservations.clone());
        Ok(reservations)
    }

    pub async fn reservation(&self, id: i64) -> ClientResult<Reservation> {
        let rows = self
            .store
            .select("reservations", Filter::new().eq("id", json!(id)).limit(1))
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;
        Ok(serde_json::from_value(row)?)
    }

    /// Fold one realtime event into the cache; a status transition
    /// surfaces as a local notification. Re-delivered events are no-ops
    /// and notify nothing.
    pub async fn handle_change(&self, event: &ChangeEvent) -> ClientResult<()> {
        let change = self.cache.write().await.apply(event);
        if let Some(change) = change {
            self.notifier
                .notify(Notification::new(
                    "Reservation update",
                    format!("Your reservation is now {}", change.to.label()),
                    self.notification_channel.clone(),
                ))
                .await?;
        }
        Ok(())
    }

    /// Consume a subscription until it is stopped or the feed closes
    pub async fn watch(&self, mut subscription: RealtimeSubscription) -> ClientResult<()> {
        while let Some(event) = subscription.next().await {
            self.handle_change(&event).await?;
        }
        tracing::debug!(owner = %subscription.owner(), "change feed ended");
        Ok(())
    }

    /// Cached copy of a reservation, if the feed or a fetch has seen it
    pub async fn cached(&self, id: i64) -> Option<Reservation> {
        self.cache.read().await.get(id).cloned()
    }
}
