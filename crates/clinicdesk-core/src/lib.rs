//! clinicdesk core - client data layer for the dental clinic front-end.
//!
//! This crate sits between the clinic's views and its REST backend:
//!
//! - `cache`: TTL read cache, cleared by namespace on writes
//! - `filter`: multi-field text search and exact predicates, date-aware
//! - `form` / `forms`: descriptor-driven validation and form state, plus the
//!   patient, dentist and dental plan schemas
//! - `service`: per-entity services combining the cache and the backend
//! - `api`: the `Backend` trait and its reqwest implementation
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod api;
pub mod cache;
pub mod config;
pub mod date;
pub mod filter;
pub mod form;
pub mod forms;
pub mod models;
pub mod service;
pub mod utils;
pub mod value;

pub use api::{ApiError, Backend, RestBackend};
pub use cache::CacheStore;
pub use config::Config;
pub use date::{normalize_date, CalendarDate};
pub use filter::{filter, FilterQuery, Filterable, SearchState};
pub use form::{FieldDescriptor, FormStateController, SubmitError, ValidatorRegistry};
pub use service::{DataServices, EntityService, Status};
pub use value::FieldValue;
