/// Unexpected results and errors
pub mod unexpected;

/// Transport result envelope
pub mod result;

/// Normalized response shapes
pub mod normalized;

/// Per-check detail shapes
pub mod details;
