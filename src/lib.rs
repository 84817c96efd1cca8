// Hotel reservation core: entities, whole-store persistence and booking services

pub mod config;
pub mod customer_service;
pub mod error;
pub mod hotel_service;
pub mod logging;
pub mod models;
pub mod reservation_service;
pub mod storage;

// Re-export key types for convenience
pub use config::StorageConfig;
pub use customer_service::CustomerService;
pub use error::{BookingError, ConfigError, ErrorKind, StorageError};
pub use hotel_service::HotelService;
pub use models::{Customer, Hotel, Keyed, Reservation};
pub use reservation_service::ReservationService;
pub use storage::{DocumentStatus, LoadReport, Storage, StorageStatsReport};
