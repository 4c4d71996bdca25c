//! Builders for the shared HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use crate::domain::InMemoryUserStore;
use crate::inbound::http::state::HttpState;

use super::ServerConfig;

/// Build the handler state around a fresh in-memory store.
///
/// The store and the handlers read "today" from the same clock, so date
/// validation and the age rule never disagree.
pub(crate) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryUserStore::new(config.age_policy(), Arc::clone(&clock)));
    web::Data::new(HttpState::new(store, clock))
}
