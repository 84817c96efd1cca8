// Entity model for the reservation system
// Every entity serializes to the same field set it is persisted with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Identifier an entity is stored under
pub trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub rooms: u32,
    #[serde(default)]
    pub reserved_rooms: BTreeSet<u32>,
}

impl Hotel {
    pub fn new(hotel_id: impl Into<String>, name: impl Into<String>, rooms: u32) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            name: name.into(),
            rooms,
            reserved_rooms: BTreeSet::new(),
        }
    }

    pub fn is_reserved(&self, room_number: u32) -> bool {
        self.reserved_rooms.contains(&room_number)
    }

    // Rooms still free, counting only reservations inside [1, rooms]
    pub fn available_rooms(&self) -> u32 {
        let booked = self
            .reserved_rooms
            .iter()
            .filter(|room| (1..=self.rooms).contains(*room))
            .count() as u32;
        self.rooms.saturating_sub(booked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    // Opaque, never validated
    pub email: String,
}

impl Customer {
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

// A booking of one room. Fields are fixed once created; rebooking means
// cancel and create again.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub customer_id: String,
    pub hotel_id: String,
    pub room_number: u32,
}

impl Reservation {
    pub fn new(
        reservation_id: impl Into<String>,
        customer_id: impl Into<String>,
        hotel_id: impl Into<String>,
        room_number: u32,
    ) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            customer_id: customer_id.into(),
            hotel_id: hotel_id.into(),
            room_number,
        }
    }
}

impl Keyed for Hotel {
    fn key(&self) -> &str {
        &self.hotel_id
    }
}

impl Keyed for Customer {
    fn key(&self) -> &str {
        &self.customer_id
    }
}

impl Keyed for Reservation {
    fn key(&self) -> &str {
        &self.reservation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_document_form() {
        let mut hotel = Hotel::new("H1", "Grand Plaza", 10);
        hotel.reserved_rooms.insert(4);
        hotel.reserved_rooms.insert(2);

        let value = serde_json::to_value(&hotel).unwrap();
        assert_eq!(value["hotel_id"], "H1");
        assert_eq!(value["name"], "Grand Plaza");
        assert_eq!(value["rooms"], 10);
        assert_eq!(value["reserved_rooms"], serde_json::json!([2, 4]));
    }

    #[test]
    fn test_hotel_without_reserved_rooms_field() {
        let json = r#"{"hotel_id": "H2", "name": "Seaside", "rooms": 3}"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();

        assert!(hotel.reserved_rooms.is_empty());
        assert_eq!(hotel.available_rooms(), 3);
    }

    #[test]
    fn test_duplicate_reserved_rooms_collapse() {
        let json = r#"{"hotel_id": "H3", "name": "Dup", "rooms": 5, "reserved_rooms": [1, 1, 3]}"#;
        let hotel: Hotel = serde_json::from_str(json).unwrap();

        assert_eq!(hotel.reserved_rooms.len(), 2);
        assert!(hotel.is_reserved(1));
        assert!(hotel.is_reserved(3));
        assert_eq!(hotel.available_rooms(), 3);
    }

    #[test]
    fn test_available_rooms_ignores_room_zero() {
        let mut hotel = Hotel::new("H4", "Gap", 2);
        hotel.reserved_rooms.insert(0);
        hotel.reserved_rooms.insert(1);

        assert_eq!(hotel.available_rooms(), 1);
    }

    #[test]
    fn test_customer_and_reservation_fields() {
        let customer = Customer::new("C1", "Ada", "ada@example.com");
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"customer_id": "C1", "name": "Ada", "email": "ada@example.com"})
        );

        let reservation = Reservation::new("R1", "C1", "H1", 2);
        let value = serde_json::to_value(&reservation).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "reservation_id": "R1",
                "customer_id": "C1",
                "hotel_id": "H1",
                "room_number": 2
            })
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"customer_id": "C1", "name": "No Email"}"#;
        assert!(serde_json::from_str::<Customer>(json).is_err());
    }
}
