//! # Artistats Catalog
//!
//! Client for the Spotify Web API: trades client credentials for a bearer
//! token and runs one authenticated search, returning the raw response.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod models;

pub use client::{CatalogClient, CatalogConfig};
pub use models::{BearerToken, CatalogResult, SearchQuery, TokenResponse};
