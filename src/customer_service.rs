// Customer CRUD
use crate::error::BookingError;
use crate::models::Customer;
use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerService {
    storage: Arc<Storage>,
}

impl CustomerService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn create_customer(&self, customer: Customer) -> Result<(), BookingError> {
        let customer_id = customer.customer_id.clone();
        let replaced = self
            .storage
            .customers()
            .insert(customer_id.clone(), customer)
            .is_some();
        tracing::debug!(customer_id = %customer_id, replaced, "Stored customer");

        self.storage.persist()?;
        Ok(())
    }

    pub fn delete_customer(&self, customer_id: &str) -> Result<bool, BookingError> {
        let removed = self.storage.customers().remove(customer_id).is_some();
        tracing::debug!(customer_id, removed, "Delete customer");

        self.storage.persist()?;
        Ok(removed)
    }

    pub fn get_customer(&self, customer_id: &str) -> Option<Customer> {
        self.storage
            .customers()
            .get(customer_id)
            .map(|customer| customer.value().clone())
    }

    pub fn customer_exists(&self, customer_id: &str) -> bool {
        self.storage.customers().contains_key(customer_id)
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .storage
            .customers()
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));
        customers
    }

    // Fields left as None keep their current value
    pub fn modify_customer(
        &self,
        customer_id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<Customer, BookingError> {
        let updated = {
            let mut customer = self
                .storage
                .customers()
                .get_mut(customer_id)
                .ok_or_else(|| BookingError::CustomerNotFound(customer_id.to_string()))?;

            if let Some(name) = name {
                customer.name = name;
            }
            if let Some(email) = email {
                customer.email = email;
            }
            customer.clone()
        };

        self.storage.persist()?;
        Ok(updated)
    }
}
