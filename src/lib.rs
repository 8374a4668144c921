//! Generates cgo bindings from a declarative dump of a C API.
//!
//! The pass runs once: [`store`] loads and filters declarations, [`mapping`]
//! and [`overrides`] decide how each native type looks in Go, [`lower`]
//! turns declarations into [`plan`] items, and [`codegen`] writes them out.
pub mod codegen;
pub mod config;
pub mod error;
pub mod ir;
pub mod lower;
pub mod mapping;
pub mod naming;
pub mod overrides;
pub mod path_de;
pub mod plan;
pub mod store;
// fixture for integration tests and dev-test-runner, not public API
#[doc(hidden)]
pub mod test_support;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`. Does nothing when
/// `RUST_LOG` is unset, and only ever runs once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
