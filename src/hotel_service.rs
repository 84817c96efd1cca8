// Hotel CRUD and room allocation
use crate::error::BookingError;
use crate::models::Hotel;
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct HotelService {
    storage: Arc<Storage>,
}

impl HotelService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    // Inserts or silently replaces the hotel with the same id
    pub fn create_hotel(&self, hotel: Hotel) -> Result<(), BookingError> {
        let hotel_id = hotel.hotel_id.clone();
        if self
            .storage
            .hotels()
            .insert(hotel_id.clone(), hotel)
            .is_some()
        {
            tracing::debug!(hotel_id = %hotel_id, "Replaced existing hotel");
        } else {
            tracing::debug!(hotel_id = %hotel_id, "Created hotel");
        }

        self.storage.persist()?;
        Ok(())
    }

    // Returns whether a hotel was removed. Unknown ids are not an error.
    pub fn delete_hotel(&self, hotel_id: &str) -> Result<bool, BookingError> {
        let removed = self.storage.hotels().remove(hotel_id).is_some();
        tracing::debug!(hotel_id, removed, "Delete hotel");

        self.storage.persist()?;
        Ok(removed)
    }

    pub fn get_hotel(&self, hotel_id: &str) -> Option<Hotel> {
        self.storage
            .hotels()
            .get(hotel_id)
            .map(|hotel| hotel.value().clone())
    }

    pub fn list_hotels(&self) -> Vec<Hotel> {
        let mut hotels: Vec<Hotel> = self
            .storage
            .hotels()
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        hotels.sort_by(|a, b| a.hotel_id.cmp(&b.hotel_id));
        hotels
    }

    // Rename a hotel and/or change its room count.
    //
    // The room count may not drop below the highest reserved room, so the
    // reserved set stays inside `[.., rooms]`.
    pub fn modify_hotel(
        &self,
        hotel_id: &str,
        name: Option<String>,
        rooms: Option<u32>,
    ) -> Result<Hotel, BookingError> {
        let updated = {
            let mut hotel = self
                .storage
                .hotels()
                .get_mut(hotel_id)
                .ok_or_else(|| BookingError::HotelNotFound(hotel_id.to_string()))?;

            if let Some(rooms) = rooms {
                if let Some(&highest_reserved) = hotel.reserved_rooms.iter().next_back() {
                    if highest_reserved > rooms {
                        tracing::warn!(hotel_id, rooms, highest_reserved, "Refusing to shrink hotel");
                        return Err(BookingError::RoomCountTooSmall {
                            hotel_id: hotel_id.to_string(),
                            rooms,
                            highest_reserved,
                        });
                    }
                }
                hotel.rooms = rooms;
            }
            if let Some(name) = name {
                hotel.name = name;
            }
            hotel.clone()
        };

        self.storage.persist()?;
        Ok(updated)
    }

    // Mark `room_number` as reserved.
    //
    // The check and the insert happen under the hotel's entry lock, so two
    // callers can never both book the same room. Only the upper bound is
    // checked: room 0 is accepted. If the save fails the room is released
    // again, so an error always leaves the reserved set as it was.
    pub fn reserve_room(&self, hotel_id: &str, room_number: u32) -> Result<(), BookingError> {
        {
            let mut hotel = self.storage.hotels().get_mut(hotel_id).ok_or_else(|| {
                tracing::warn!(hotel_id, room_number, "Reserve failed, unknown hotel");
                BookingError::HotelNotFound(hotel_id.to_string())
            })?;

            if hotel.is_reserved(room_number) {
                tracing::warn!(hotel_id, room_number, "Reserve failed, room already booked");
                return Err(BookingError::RoomAlreadyReserved {
                    hotel_id: hotel_id.to_string(),
                    room_number,
                });
            }
            if room_number > hotel.rooms {
                tracing::warn!(hotel_id, room_number, rooms = hotel.rooms, "Reserve failed, room out of range");
                return Err(BookingError::RoomOutOfRange {
                    hotel_id: hotel_id.to_string(),
                    room_number,
                    rooms: hotel.rooms,
                });
            }

            hotel.reserved_rooms.insert(room_number);
        }

        tracing::debug!(hotel_id, room_number, "Room reserved");
        if let Err(e) = self.storage.persist() {
            self.release_in_memory(hotel_id, room_number);
            return Err(e.into());
        }
        Ok(())
    }

    // Undo an allocation that was never saved
    pub(crate) fn release_in_memory(&self, hotel_id: &str, room_number: u32) {
        if let Some(mut hotel) = self.storage.hotels().get_mut(hotel_id) {
            hotel.reserved_rooms.remove(&room_number);
        }
        tracing::warn!(hotel_id, room_number, "Rolled back unsaved room allocation");
    }

    pub fn cancel_room(&self, hotel_id: &str, room_number: u32) -> Result<(), BookingError> {
        {
            let mut hotel = self
                .storage
                .hotels()
                .get_mut(hotel_id)
                .ok_or_else(|| BookingError::HotelNotFound(hotel_id.to_string()))?;

            if !hotel.reserved_rooms.remove(&room_number) {
                return Err(BookingError::RoomNotReserved {
                    hotel_id: hotel_id.to_string(),
                    room_number,
                });
            }
        }

        tracing::debug!(hotel_id, room_number, "Room released");
        self.storage.persist()?;
        Ok(())
    }
}
