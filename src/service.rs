use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

use crate::models::{Availability, Booking, BookingConfirmation, BookingRequest, ClassRecord};
use crate::store::{BlobStore, StoreError};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("You have already booked this class!")]
    AlreadyBooked,
    #[error("This class is sold out.")]
    SoldOut,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Booking operations over per-class records in the blob store.
///
/// Records are created lazily by the first booking and deleted wholesale by
/// the admin operations; individual bookings are never removed.
pub struct BookingService {
    store: Arc<dyn BlobStore>,
    // Serializes the read-modify-write per class within this process. The
    // store has no conditional write, so separate processes can still race.
    class_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            class_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Seat availability for one class. Never fails: an absent record, a
    /// store error, or an undecodable value all report as zero seats.
    pub async fn availability(&self, class_id: &str) -> Availability {
        let (booked, max_spots) = match self.load_record(class_id).await {
            Ok(Some(record)) => (record.bookings.len() as u32, record.max_spots),
            Ok(None) => (0, 0),
            Err(err) => {
                warn!(class_id, error = %err, "availability read failed, reporting zero");
                (0, 0)
            }
        };
        Availability {
            class_id: class_id.to_string(),
            booked,
            max_spots,
            available: i64::from(max_spots) - i64::from(booked),
        }
    }

    /// Every stored record, keyed by class id. Degrades to an empty map if
    /// enumeration or any read fails.
    pub async fn list_all(&self) -> BTreeMap<String, ClassRecord> {
        match self.try_list_all().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "listing bookings failed, returning empty set");
                BTreeMap::new()
            }
        }
    }

    async fn try_list_all(&self) -> Result<BTreeMap<String, ClassRecord>, StoreError> {
        let mut records = BTreeMap::new();
        for key in self.store.list().await? {
            if let Some(record) = self.load_record(&key).await? {
                records.insert(key, record);
            }
        }
        Ok(records)
    }

    pub async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        let lock = self.class_lock(&request.class_id).await;
        let _guard = lock.lock().await;

        let mut record = match self.load_record(&request.class_id).await {
            Ok(Some(record)) => record,
            Ok(None) => new_record(request),
            Err(err) => {
                warn!(class_id = %request.class_id, error = %err, "existing record unreadable, starting fresh");
                new_record(request)
            }
        };

        // Duplicate check comes first: a repeat submission against a full
        // class still reads as "already booked", not "sold out".
        let email = request.email.to_lowercase();
        if record.bookings.iter().any(|b| b.email.to_lowercase() == email) {
            return Err(BookingError::AlreadyBooked);
        }
        if record.bookings.len() as u32 >= record.max_spots {
            return Err(BookingError::SoldOut);
        }

        record.bookings.push(Booking {
            name: request.name.clone(),
            email,
            phone: request.phone.clone(),
            booked_at: Utc::now(),
        });

        let value = serde_json::to_value(&record).map_err(StoreError::from)?;
        self.store.set(&request.class_id, value).await?;

        let booked = record.bookings.len() as u32;
        let remaining = i64::from(record.max_spots) - i64::from(booked);
        Ok(BookingConfirmation {
            message: format!("Booking confirmed! Spots left: {remaining}"),
            booked,
            max_spots: record.max_spots,
        })
    }

    /// Removes the record for one class. Deleting an absent class succeeds.
    pub async fn delete_class(&self, class_id: &str) -> Result<(), StoreError> {
        self.store.delete(class_id).await
    }

    /// Removes every record, one key at a time. A key that fails to delete
    /// is logged and skipped; returns how many records were removed.
    pub async fn reset_all(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for key in self.store.list().await? {
            match self.store.delete(&key).await {
                Ok(()) => removed += 1,
                Err(err) => {
                    warn!(key = %key, error = %err, "failed to delete record during reset, continuing");
                }
            }
        }
        Ok(removed)
    }

    async fn load_record(&self, class_id: &str) -> Result<Option<ClassRecord>, StoreError> {
        let Some(value) = self.store.get(class_id).await? else {
            return Ok(None);
        };
        let record = serde_json::from_value(value)?;
        Ok(Some(record))
    }

    async fn class_lock(&self, class_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.class_locks.lock().await;
        locks.entry(class_id.to_string()).or_default().clone()
    }
}

fn new_record(request: &BookingRequest) -> ClassRecord {
    ClassRecord {
        class_id: request.class_id.clone(),
        class_name: request.class_name.clone(),
        day: request.day.clone(),
        time: request.time.clone(),
        location: request.location.clone(),
        max_spots: request.capacity(),
        bookings: Vec::new(),
    }
}
