// Reservation orchestration across customers and hotel rooms
//
// A reservation is written only after its room has been allocated, so a
// failed allocation leaves every collection untouched.

use crate::customer_service::CustomerService;
use crate::error::BookingError;
use crate::hotel_service::HotelService;
use crate::models::Reservation;
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReservationService {
    storage: Arc<Storage>,
    hotels: HotelService,
    customers: CustomerService,
}

impl ReservationService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            hotels: HotelService::new(Arc::clone(&storage)),
            customers: CustomerService::new(Arc::clone(&storage)),
            storage,
        }
    }

    pub fn hotel_service(&self) -> &HotelService {
        &self.hotels
    }

    pub fn customer_service(&self) -> &CustomerService {
        &self.customers
    }

    // Book `reservation.room_number` for an existing customer.
    //
    // Fails with `CustomerNotFound` before touching anything, or with the
    // room allocation error (unknown hotel, room taken, room out of range).
    // An existing reservation with the same id is replaced. When the save
    // fails both the room and the record are rolled back, so the reserved
    // set and the reservation collection stay in agreement.
    pub fn create_reservation(&self, reservation: Reservation) -> Result<(), BookingError> {
        if !self.customers.customer_exists(&reservation.customer_id) {
            tracing::warn!(
                reservation_id = %reservation.reservation_id,
                customer_id = %reservation.customer_id,
                "Reservation rejected, unknown customer"
            );
            return Err(BookingError::CustomerNotFound(reservation.customer_id));
        }

        self.hotels
            .reserve_room(&reservation.hotel_id, reservation.room_number)?;

        let reservation_id = reservation.reservation_id.clone();
        let hotel_id = reservation.hotel_id.clone();
        let room_number = reservation.room_number;
        let previous = self
            .storage
            .reservations()
            .insert(reservation_id.clone(), reservation);

        if let Err(e) = self.storage.persist() {
            match previous {
                Some(previous) => {
                    self.storage.reservations().insert(reservation_id, previous);
                }
                None => {
                    self.storage.reservations().remove(&reservation_id);
                }
            }
            self.hotels.release_in_memory(&hotel_id, room_number);
            return Err(e.into());
        }

        tracing::info!(
            reservation_id = %reservation_id,
            hotel_id = %hotel_id,
            room_number,
            "Reservation created"
        );
        Ok(())
    }

    // Remove a reservation and release its room.
    //
    // The release is best effort: if the hotel is gone or the room is no
    // longer marked reserved, the reservation is still removed.
    pub fn cancel_reservation(&self, reservation_id: &str) -> Result<Reservation, BookingError> {
        let reservation = self
            .storage
            .reservations()
            .get(reservation_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BookingError::ReservationNotFound(reservation_id.to_string()))?;

        if let Err(e) = self
            .hotels
            .cancel_room(&reservation.hotel_id, reservation.room_number)
        {
            tracing::warn!(reservation_id, error = %e, "Room release failed, removing reservation anyway");
        }

        self.storage.reservations().remove(reservation_id);
        tracing::info!(reservation_id, "Reservation cancelled");

        self.storage.persist()?;
        Ok(reservation)
    }

    pub fn get_reservation(&self, reservation_id: &str) -> Option<Reservation> {
        self.storage
            .reservations()
            .get(reservation_id)
            .map(|entry| entry.value().clone())
    }

    pub fn list_reservations(&self) -> Vec<Reservation> {
        self.filtered(|_| true)
    }

    pub fn reservations_for_customer(&self, customer_id: &str) -> Vec<Reservation> {
        self.filtered(|reservation| reservation.customer_id == customer_id)
    }

    pub fn reservations_for_hotel(&self, hotel_id: &str) -> Vec<Reservation> {
        self.filtered(|reservation| reservation.hotel_id == hotel_id)
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Reservation>
    where
        F: Fn(&Reservation) -> bool,
    {
        let mut reservations: Vec<Reservation> = self
            .storage
            .reservations()
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        reservations.sort_by(|a, b| a.reservation_id.cmp(&b.reservation_id));
        reservations
    }
}
