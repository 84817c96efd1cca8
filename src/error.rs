// Error types for storage, configuration and booking operations
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config: {0}")]
    IoError(String),

    #[error("Cannot parse config: {0}")]
    ParseError(String),
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Hotel not found: {0}")]
    HotelNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Room {room_number} out of range for hotel {hotel_id} ({rooms} rooms)")]
    RoomOutOfRange {
        hotel_id: String,
        room_number: u32,
        rooms: u32,
    },

    #[error("Room {room_number} already reserved in hotel {hotel_id}")]
    RoomAlreadyReserved { hotel_id: String, room_number: u32 },

    #[error("Room {room_number} is not reserved in hotel {hotel_id}")]
    RoomNotReserved { hotel_id: String, room_number: u32 },

    #[error("Hotel {hotel_id} cannot shrink to {rooms} rooms, room {highest_reserved} is reserved")]
    RoomCountTooSmall {
        hotel_id: String,
        rooms: u32,
        highest_reserved: u32,
    },

    #[error("Persistence error: {0}")]
    PersistenceError(#[from] StorageError),
}

// Coarse classification of a booking failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Persistence,
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::HotelNotFound(_)
            | BookingError::CustomerNotFound(_)
            | BookingError::ReservationNotFound(_) => ErrorKind::NotFound,
            BookingError::RoomOutOfRange { .. }
            | BookingError::RoomAlreadyReserved { .. }
            | BookingError::RoomNotReserved { .. }
            | BookingError::RoomCountTooSmall { .. } => ErrorKind::Validation,
            BookingError::PersistenceError(_) => ErrorKind::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(BookingError::HotelNotFound("H1".to_string()), ErrorKind::NotFound; "unknown hotel")]
    #[test_case(BookingError::CustomerNotFound("C1".to_string()), ErrorKind::NotFound; "unknown customer")]
    #[test_case(BookingError::ReservationNotFound("R1".to_string()), ErrorKind::NotFound; "unknown reservation")]
    #[test_case(BookingError::RoomOutOfRange { hotel_id: "H1".to_string(), room_number: 11, rooms: 10 }, ErrorKind::Validation; "room out of range")]
    #[test_case(BookingError::RoomAlreadyReserved { hotel_id: "H1".to_string(), room_number: 2 }, ErrorKind::Validation; "double booking")]
    #[test_case(BookingError::RoomNotReserved { hotel_id: "H1".to_string(), room_number: 2 }, ErrorKind::Validation; "room not reserved")]
    #[test_case(BookingError::RoomCountTooSmall { hotel_id: "H1".to_string(), rooms: 1, highest_reserved: 2 }, ErrorKind::Validation; "shrinking hotel")]
    #[test_case(BookingError::from(StorageError::SerializationError("bad".to_string())), ErrorKind::Persistence; "persistence")]
    fn test_error_kind(error: BookingError, expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn test_error_messages() {
        let error = BookingError::RoomOutOfRange {
            hotel_id: "H1".to_string(),
            room_number: 11,
            rooms: 10,
        };
        assert_eq!(
            error.to_string(),
            "Room 11 out of range for hotel H1 (10 rooms)"
        );

        let error = BookingError::from(StorageError::IoError {
            path: "data/hotels.json".to_string(),
            message: "permission denied".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Persistence error: I/O error on data/hotels.json: permission denied"
        );
    }
}
