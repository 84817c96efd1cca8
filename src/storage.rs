// Whole-store persistence for hotels, customers and reservations
// The three collections are loaded once and rewritten together on every save.

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::models::{Customer, Hotel, Keyed, Reservation};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

// What happened to a single document at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Loaded(usize),
    Missing,
    Malformed(String),
    Unreadable(String),
}

impl DocumentStatus {
    // Missing documents are a normal first start, the other failures are not
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Malformed(_) | DocumentStatus::Unreadable(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub hotels: DocumentStatus,
    pub customers: DocumentStatus,
    pub reservations: DocumentStatus,
}

impl LoadReport {
    pub fn is_degraded(&self) -> bool {
        self.hotels.is_degraded() || self.customers.is_degraded() || self.reservations.is_degraded()
    }
}

#[derive(Debug, Default)]
struct StorageStats {
    persist_count: AtomicUsize,
    persist_failures: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StorageStatsReport {
    pub hotels: usize,
    pub customers: usize,
    pub reservations: usize,
    pub persist_count: usize,
    pub persist_failures: usize,
}

pub struct Storage {
    config: StorageConfig,
    hotels: DashMap<String, Hotel>,
    customers: DashMap<String, Customer>,
    reservations: DashMap<String, Reservation>,
    load_report: LoadReport,
    // Serializes snapshot + write so documents on disk never interleave two saves
    persist_lock: Mutex<()>,
    stats: StorageStats,
}

impl Storage {
    // Build a store from the documents named in `config`.
    //
    // Never fails: a missing, unreadable or malformed document starts as an
    // empty collection and the cause is kept in `Storage::load_report`.
    pub fn load(config: StorageConfig) -> Self {
        let (hotels, hotels_status) = load_document::<Hotel>(&config.hotels_path());
        let (customers, customers_status) = load_document::<Customer>(&config.customers_path());
        let (reservations, reservations_status) =
            load_document::<Reservation>(&config.reservations_path());

        tracing::info!(
            hotels = hotels.len(),
            customers = customers.len(),
            reservations = reservations.len(),
            data_dir = %config.data_dir.display(),
            "Storage loaded"
        );

        Self {
            config,
            hotels,
            customers,
            reservations,
            load_report: LoadReport {
                hotels: hotels_status,
                customers: customers_status,
                reservations: reservations_status,
            },
            persist_lock: Mutex::new(()),
            stats: StorageStats::default(),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn hotels(&self) -> &DashMap<String, Hotel> {
        &self.hotels
    }

    pub fn customers(&self) -> &DashMap<String, Customer> {
        &self.customers
    }

    pub fn reservations(&self) -> &DashMap<String, Reservation> {
        &self.reservations
    }

    // Save all: rewrite the three documents from the in-memory collections.
    //
    // Each document is replaced atomically, so a reader never sees a half
    // written file. Callers must not hold an entry guard on any collection
    // while calling this.
    pub fn persist(&self) -> Result<(), StorageError> {
        let _guard = self.persist_lock.lock();

        match self.write_all() {
            Ok(()) => {
                self.stats.persist_count.fetch_add(1, Ordering::SeqCst);
                tracing::debug!("Persisted all documents");
                Ok(())
            }
            Err(e) => {
                self.stats.persist_failures.fetch_add(1, Ordering::SeqCst);
                tracing::error!(error = %e, "Failed to persist documents, disk state is stale");
                Err(e)
            }
        }
    }

    pub fn stats(&self) -> StorageStatsReport {
        StorageStatsReport {
            hotels: self.hotels.len(),
            customers: self.customers.len(),
            reservations: self.reservations.len(),
            persist_count: self.stats.persist_count.load(Ordering::SeqCst),
            persist_failures: self.stats.persist_failures.load(Ordering::SeqCst),
        }
    }

    fn write_all(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.config.data_dir)
            .map_err(|e| io_error(&self.config.data_dir, e))?;

        self.write_document(&self.config.hotels_path(), &snapshot(&self.hotels))?;
        self.write_document(&self.config.customers_path(), &snapshot(&self.customers))?;
        self.write_document(
            &self.config.reservations_path(),
            &snapshot(&self.reservations),
        )?;
        Ok(())
    }

    fn write_document<T: Serialize>(
        &self,
        path: &Path,
        document: &BTreeMap<String, T>,
    ) -> Result<(), StorageError> {
        let content = if self.config.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| io_error(&temp_path, e))?;
            file.sync_all().map_err(|e| io_error(&temp_path, e))?;
        }

        fs::rename(&temp_path, path).map_err(|e| io_error(path, e))?;
        Ok(())
    }
}

fn load_document<T: DeserializeOwned + Keyed>(path: &Path) -> (DashMap<String, T>, DocumentStatus) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Document missing, starting empty");
            return (DashMap::new(), DocumentStatus::Missing);
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Document unreadable, starting empty");
            return (DashMap::new(), DocumentStatus::Unreadable(e.to_string()));
        }
    };

    match serde_json::from_str::<HashMap<String, T>>(&content) {
        Ok(entries) => {
            // Each entry must be stored under its own id
            if let Some((key, entity)) = entries
                .iter()
                .find(|(key, entity)| entity.key() != key.as_str())
            {
                let reason = format!("entry {} holds entity {}", key, entity.key());
                tracing::warn!(path = %path.display(), reason = %reason, "Document malformed, starting empty");
                return (DashMap::new(), DocumentStatus::Malformed(reason));
            }
            let count = entries.len();
            (entries.into_iter().collect(), DocumentStatus::Loaded(count))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Document malformed, starting empty");
            (DashMap::new(), DocumentStatus::Malformed(e.to_string()))
        }
    }
}

// Sorted copy so documents are written in a stable order
fn snapshot<T: Clone>(collection: &DashMap<String, T>) -> BTreeMap<String, T> {
    collection
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect()
}

fn io_error(path: &Path, error: io::Error) -> StorageError {
    StorageError::IoError {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
