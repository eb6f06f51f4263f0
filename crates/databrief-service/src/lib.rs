//! DataBrief AI wire layer.
//!
//! `HttpAnalysisService` implements the core service trait over HTTP;
//! `config` resolves the base address out-of-band.

pub mod config;
pub mod http;

pub use config::{DEFAULT_BASE_URL, ServiceConfig};
pub use http::HttpAnalysisService;
