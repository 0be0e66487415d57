//! HTTP layer
//!
//! A thin client over reqwest plus the fixed-delay pacer used between page
//! requests. There is deliberately no retry or backoff here: the run-level
//! policy is single-attempt, and a failed request ends the run.

mod client;
mod pacing;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use pacing::Pacer;
