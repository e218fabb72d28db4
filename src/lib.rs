#![doc(test(attr(deny(warnings))))]

//! Household Budget Core offers the state store, validation, and aggregation
//! primitives that power household budgeting front ends.

pub mod domain;
pub mod engine;
pub mod errors;
pub mod frequency;
pub mod store;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Household Budget Core tracing initialized.");
    });
}
