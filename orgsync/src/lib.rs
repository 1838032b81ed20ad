//! # OrgSync
//!
//! Client cache and CRUD sync for a small organizational site backed by a
//! document store.
//!
//! The site serves seven independent collections (hero slides, activities,
//! members, donations, expenses, experiences, weekly fees) over a uniform
//! HTTP+JSON surface. OrgSync mirrors those collections into an in-memory
//! cache ([`Mirror`]), talks to the REST API through a swappable
//! [`Transport`], and re-renders exactly the view sections that depend on a
//! mutated kind via a declarative dispatch table ([`ViewRegistry`]). The
//! server side of the same protocol lives in the `orgsync_server` crate and
//! shares the [`DocumentStore`] and [`registry`] defined here.
//!
//! ## Quick start
//!
//! ```ignore
//! use orgsync::{Document, EntityKind, SyncClient};
//! use serde_json::json;
//!
//! let client = SyncClient::builder("http://localhost:3000")
//!     .bind_view("members", &[EntityKind::Member], |mirror| {
//!         render_members(mirror.all(EntityKind::Member));
//!     })
//!     .build();
//!
//! client.seed_if_empty().await?;
//! client.refresh_all().await?;
//!
//! let saved = client
//!     .save(EntityKind::Member, Document::new(json!({"name": "A. Smith"})))
//!     .await?;
//! ```
//!
//! ## Key types
//!
//! - [`SyncClient`] / [`SyncClientBuilder`] — owns the mirror, drives the
//!   transport, dispatches view refreshes and user notices
//! - [`Mirror`] — the client-side cache, one ordered list per kind
//! - [`Transport`] / [`HttpTransport`] — the uniform list/create/update/delete
//!   protocol over HTTP+JSON
//! - [`DocumentStore`] — the server-side collections, optionally snapshotted
//!   to a JSON file
//! - [`registry::CollectionSpec`] — declarative per-collection wiring

pub mod client;
pub mod error;
pub mod messages;
pub mod mirror;
pub mod model;
pub mod registry;
pub mod seed;
pub mod store;
pub mod sync;
pub mod views;

pub use client::{HttpTransport, Transport};
pub use error::SyncError;
pub use messages::{Notice, NoticeLevel};
pub use mirror::Mirror;
pub use model::{
    Activity, Document, Donation, EntityKind, EntityRecord, Expense, Experience, HeroSlide,
    Member, WeeklyFee,
};
pub use store::DocumentStore;
pub use sync::{SyncClient, SyncClientBuilder};
pub use views::ViewRegistry;
