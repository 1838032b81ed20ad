//! HTTP server for the OrgSync collections.
//!
//! One resource path per entity kind under `/api/`, resolved through the
//! collection registry, plus a catch-all that serves the main application
//! page so client-side routing keeps working on deep links.

pub mod http;

pub use http::{AppState, build_router};
