//! Lifecycle of the availability fetch.
//!
//! The request itself is made by the caller. The loader tracks which request is
//! current so that a response arriving after `cancel()` (unmount) or after a newer
//! request was started is dropped instead of overwriting fresher state.

use std::fmt;

use tracing::{debug, warn};

use crate::model::Availability;

/// Token identifying one started fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct AvailabilityLoader {
    generation: u64,
    loading: bool,
    availability: Availability,
}

impl AvailabilityLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Abandon the outstanding fetch.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Deliver a fetch result. Returns `false` if the ticket is stale.
    ///
    /// A failed fetch is treated as "nothing configured". There is no retry.
    pub fn complete<E: fmt::Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Availability, E>,
    ) -> bool {
        if !self.loading || ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale availability response"
            );
            return false;
        }

        self.loading = false;
        self.availability = match result {
            Ok(availability) => availability,
            Err(e) => {
                warn!(error = %e, "availability fetch failed, treating as unconfigured");
                Availability::empty()
            }
        };
        true
    }
}
