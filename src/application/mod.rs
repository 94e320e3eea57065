//! Application layer orchestrating Apple Pay tokenization.
//!
//! `ApplePayClient` is the entry point. It fetches the merchant configuration
//! through the bound API client, gates on the Apple Pay status and posts the
//! payment token built by [`request::build_request`].

pub mod client;
pub mod request;
