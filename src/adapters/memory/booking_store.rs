use crate::domain::{
    booking::{Booking, NewBooking},
    value_objects::{BookingId, BookingStatus, ItemId, UserId},
};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, ItemBookingWindow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::item_catalog::ItemCatalog;

struct Inner {
    bookings: BTreeMap<BookingId, Booking>,
    next_id: i64,
}

/// In-memory implementation of BookingStore
///
/// All reads and writes go through a single mutex, so the conditional
/// status update is a compare-and-set. Item ownership is resolved through
/// the shared in-memory catalog.
pub struct BookingStore {
    inner: Mutex<Inner>,
    catalog: Arc<ItemCatalog>,
}

impl BookingStore {
    pub fn new(catalog: Arc<ItemCatalog>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                bookings: BTreeMap::new(),
                next_id: 1,
            }),
            catalog,
        }
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Booking>>
    where
        F: Fn(&Booking) -> bool,
    {
        let inner = self.inner.lock().map_err(|e| e.to_string())?;
        Ok(inner
            .bookings
            .values()
            .filter(|b| predicate(b))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn save(&self, booking: NewBooking) -> Result<Booking> {
        let mut inner = self.inner.lock().map_err(|e| e.to_string())?;
        let id = BookingId::new(inner.next_id);
        inner.next_id += 1;

        let booking = booking.with_id(id);
        inner.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let inner = self.inner.lock().map_err(|e| e.to_string())?;
        Ok(inner.bookings.get(&booking_id).cloned())
    }

    async fn find_by_booker(&self, booker_id: UserId) -> Result<Vec<Booking>> {
        self.select(|b| b.booker_id == booker_id)
    }

    async fn find_by_item_owner(&self, owner_id: UserId) -> Result<Vec<Booking>> {
        let owned = self.catalog.items_owned_by(owner_id);
        self.select(|b| owned.contains(&b.item_id))
    }

    async fn decide_if_waiting(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let mut inner = self.inner.lock().map_err(|e| e.to_string())?;
        match inner.bookings.get_mut(&booking_id) {
            Some(booking) if booking.status == BookingStatus::Waiting => {
                booking.status = status;
                Ok(Some(booking.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn last_and_next_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<ItemBookingWindow> {
        let approved =
            self.select(|b| b.item_id == item_id && b.status == BookingStatus::Approved)?;

        let last = approved
            .iter()
            .filter(|b| b.period.start() < now)
            .max_by_key(|b| (b.period.start(), b.id))
            .cloned();
        let next = approved
            .iter()
            .filter(|b| b.period.start() > now)
            .min_by_key(|b| (b.period.start(), b.id))
            .cloned();

        Ok(ItemBookingWindow { last, next })
    }

    async fn has_finished_booking(
        &self,
        user_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let finished = self.select(|b| {
            b.booker_id == user_id
                && b.item_id == item_id
                && b.status == BookingStatus::Approved
                && b.period.end() < now
        })?;
        Ok(!finished.is_empty())
    }
}
