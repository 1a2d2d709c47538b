//! Form schemas for the clinic entities.

pub mod dental_plan;
pub mod dentist;
pub mod patient;

pub use dental_plan::{dental_plan_form, dental_plan_registry};
pub use dentist::{dentist_form, dentist_registry};
pub use patient::{patient_form, patient_registry};
