//! Wire models for the clinic backend.
//!
//! Field names follow Rust conventions; the JSON keys are the backend's
//! (`nome`, `dataNascimento`, ...). Dates stay as the strings the backend
//! sent and are compared through [`crate::date::normalize_date`].
//!
//! Each record implements [`Filterable`](crate::filter::Filterable) under
//! its JSON key names.

pub mod dental_plan;
pub mod dentist;
pub mod evolution;
pub mod patient;

pub use dental_plan::{total_price, DentalPlan, DentalPlanRequest, DentalPlanSummary};
pub use dentist::{Dentist, DentistRequest, DentistSummary};
pub use evolution::{EvolutionRecord, EvolutionRecordRequest};
pub use patient::{
    Anamnesis, Guardian, HealthQuestionnaire, Insurance, MaritalStatus, OralInspection, Patient, PatientStats,
    PatientSummary, Sex,
};
