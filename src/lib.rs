#![doc(test(attr(deny(warnings))))]

//! Form Core is the engine behind a drag-and-drop form builder and its
//! filler: schema editing, section-aware reordering, conditional visibility,
//! validation, wizard steps and submission assembly.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{FillSession, FormBuilder, SchemaSink, SubmissionSink};
pub use errors::FormError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Form Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
