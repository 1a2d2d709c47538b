//! Descriptor-driven form state and validation.
//!
//! A form is a [`ValidatorRegistry`] of [`FieldDescriptor`]s plus a
//! [`Draft`] owned by a [`FormStateController`]. Descriptors carry the
//! field kind, requiredness (static or gated by a boolean companion field),
//! an optional normalizer and an ordered list of [`Rule`]s.

pub mod controller;
pub mod descriptor;
pub mod draft;
pub mod registry;
pub mod rules;

pub use controller::{FormStateController, SubmitError};
pub use descriptor::{FieldDescriptor, FieldKind, Normalizer, Rule};
pub use draft::Draft;
pub use registry::ValidatorRegistry;
