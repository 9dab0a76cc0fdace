//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Compiled
//! for tests and when the `test-support` feature is enabled.

mod fest_store;
mod fest_store_repositories;

pub use fest_store::{InMemoryFestStore, InMemoryUnitOfWork};

use std::sync::Arc;

use crate::domain::AssociationService;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// HTTP state backed entirely by one in-memory store.
///
/// # Examples
/// ```
/// use fest_backend::test_support::{InMemoryFestStore, in_memory_http_state};
///
/// let store = InMemoryFestStore::new();
/// let state = in_memory_http_state(&store);
/// let _users = state.users.clone();
/// ```
pub fn in_memory_http_state(store: &InMemoryFestStore) -> HttpState {
    let shared = Arc::new(store.clone());
    HttpState::new(HttpStatePorts {
        users: shared.clone(),
        passes: shared.clone(),
        events: shared.clone(),
        teams: shared.clone(),
        support_tickets: shared.clone(),
        associations: shared.clone(),
        links: Arc::new(AssociationService::new(shared)),
    })
}
