//! HTTP access for asset downloads.

mod client;

pub use client::{HttpClient, HttpClientConfig};
