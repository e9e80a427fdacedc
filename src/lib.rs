//! Hostmaster: thin client of the remote network-diagnostics API

//! Submits HTTP, ping, TCP port, traceroute and DNS lookup checks, polls async jobs,
//! and normalizes loosely typed responses into typed shapes.

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    unused_extern_crates
)]
#![warn(dead_code, unused_imports, unused_variables)]

// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


pub use crate::api::*;
pub use crate::checks::check::*;
pub use crate::checks::credentials::*;
pub use crate::client::*;
pub use crate::config::*;
pub use crate::mappers::details::*;
pub use crate::mappers::normalizer::*;
pub use crate::products::details::*;
pub use crate::products::normalized::*;
pub use crate::products::result::*;
pub use crate::products::unexpected::*;
pub use crate::utilities::*;
pub use tracing::{debug, error, info, instrument, trace, warn};


//
// Public modules:
//

/// Configuration defaults:
pub mod configuration;

/// Dynamic config:
pub mod config;

/// Utilities and helpers:
pub mod utilities;

/// Check requests and credentials:
pub mod checks;

/// Check products:
pub mod products;

/// Response mappers:
pub mod mappers;

/// Curl transport:
pub mod client;

/// Checks API:
pub mod api;

//
// Private modules:
//

/// Tests:
mod tests;
