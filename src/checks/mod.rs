/// Check types and requests
pub mod check;

/// Credentials and credential store
pub mod credentials;
