//! Domain types for Apple Pay tokenization.
//!
//! Nothing in here performs I/O. The collaborators the client depends on (the
//! processor API client and the device payment) are described as traits in
//! [`ports`] so adapters and test doubles can be swapped freely.

pub mod configuration;
pub mod metadata;
pub mod payment;
pub mod ports;
