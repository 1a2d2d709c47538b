use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::models::{
    DentalPlan, DentalPlanSummary, Dentist, DentistSummary, EvolutionRecord, Patient, PatientSummary,
};

/// One backend REST resource and its cache namespace.
///
/// Request bodies are not typed here: services accept anything
/// `Serialize`, so both request structs and form payloads can be sent.
pub trait Resource: Send + Sync + 'static {
    /// Cache namespace; every key this resource caches lives under it.
    const NAMESPACE: &'static str;
    const BASE_PATH: &'static str;
    /// Lightweight list endpoint, relative to `BASE_PATH`. Empty when the
    /// resource has none and its summary is the full list.
    const SUMMARY_PATH: &'static str;

    type Record: Serialize + DeserializeOwned + Send + Sync;
    type Summary: Serialize + DeserializeOwned + Send + Sync;

    fn ttl(config: &Config) -> Duration;
}

pub struct Patients;

impl Resource for Patients {
    const NAMESPACE: &'static str = "patients";
    const BASE_PATH: &'static str = "/api/pacientes";
    const SUMMARY_PATH: &'static str = "/resumo";

    type Record = Patient;
    type Summary = PatientSummary;

    fn ttl(config: &Config) -> Duration {
        config.patients_ttl()
    }
}

pub struct Dentists;

impl Resource for Dentists {
    const NAMESPACE: &'static str = "dentists";
    const BASE_PATH: &'static str = "/api/dentistas";
    const SUMMARY_PATH: &'static str = "/summary";

    type Record = Dentist;
    type Summary = DentistSummary;

    fn ttl(config: &Config) -> Duration {
        config.dentists_ttl()
    }
}

pub struct DentalPlans;

impl Resource for DentalPlans {
    const NAMESPACE: &'static str = "dental_plans";
    const BASE_PATH: &'static str = "/api/planos-dentais";
    const SUMMARY_PATH: &'static str = "/summary";

    type Record = DentalPlan;
    type Summary = DentalPlanSummary;

    fn ttl(config: &Config) -> Duration {
        config.dental_plans_ttl()
    }
}

/// Treatment evolution notes. The backend has no lightweight list, so the
/// summary is the full list.
pub struct Evolutions;

impl Resource for Evolutions {
    const NAMESPACE: &'static str = "evolutions";
    const BASE_PATH: &'static str = "/api/evolucoes-tratamento";
    const SUMMARY_PATH: &'static str = "";

    type Record = EvolutionRecord;
    type Summary = EvolutionRecord;

    fn ttl(config: &Config) -> Duration {
        config.evolutions_ttl()
    }
}
