//! Discovery adapter: locate and parse a provider's well-known metadata document.
//!
//! The HTTP transport is supplied by the caller through [`HttpFetch`]; this crate
//! only decides which URLs to try and how to interpret the answers.

#![forbid(unsafe_code)]

mod fetch;
mod well_known;

pub use fetch::{HttpFetch, HttpResponse, TransportError};
pub use well_known::{
    OAUTH_SERVER_METADATA_PATH, OPENID_CONFIGURATION_PATH, WellKnownSource, normalize_target,
    well_known_urls,
};
