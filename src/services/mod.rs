//! Business logic services

pub mod query;
pub mod rental;

use crate::store::Stores;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub rental: rental::RentalService,
    pub query: query::QueryService,
}

impl Services {
    /// Create all services over the given store handles
    pub fn new(stores: Stores) -> Self {
        Self {
            rental: rental::RentalService::new(stores.clone()),
            query: query::QueryService::new(stores),
        }
    }
}
