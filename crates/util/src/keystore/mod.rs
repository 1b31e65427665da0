//! Admin token storage.

mod credentials;

pub use credentials::*;
