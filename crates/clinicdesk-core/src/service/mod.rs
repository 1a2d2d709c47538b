//! Per-entity data services over the cache and the backend.
//!
//! Each entity type gets an [`EntityService`] parameterized by its
//! [`Resource`]. Reads (`list`, `summary`, `get_by_key` and the lookups
//! below) go through the entity's [`CacheStore`]; writes (`create`,
//! `update`, `delete`, `set_status`, `set_status_batch`) go straight to the
//! backend and clear the entity's cache namespace on success. Uniqueness
//! checks (`exists_*`) are never cached.
//!
//! All services of one [`DataServices`] share a backend and a storage, but
//! each has its own TTL.

pub mod entity;
pub mod resource;

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use crate::api::{ApiError, Backend, RestBackend};
use crate::cache::{CacheStorage, CacheStore, Clock, FileStorage, MemoryStorage, SystemClock};
use crate::config::Config;
use crate::models::{DentalPlan, Dentist, EvolutionRecord, Patient, PatientStats};

pub use entity::{EntityService, Status};
pub use resource::{DentalPlans, Dentists, Evolutions, Patients, Resource};

pub type PatientService = EntityService<Patients>;
pub type DentistService = EntityService<Dentists>;
pub type DentalPlanService = EntityService<DentalPlans>;
pub type EvolutionService = EntityService<Evolutions>;

impl EntityService<Patients> {
    /// Counts for the dashboard (`GET /api/pacientes/stats`).
    pub async fn stats(&self) -> Result<PatientStats, ApiError> {
        let path = format!("{}/stats", Patients::BASE_PATH);
        self.cached_get(&Self::key("stats"), &path).await
    }

    /// Lookup by medical record number (`prontuarioNumero`).
    pub async fn find_by_record_number(&self, record_number: &str) -> Result<Patient, ApiError> {
        self.cached_lookup("record", "prontuario", record_number).await
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Patient, ApiError> {
        self.cached_lookup("cpf", "cpf", cpf).await
    }

    pub async fn find_by_status(&self, active: bool) -> Result<Vec<Patient>, ApiError> {
        self.cached_lookup("status", "status", &active.to_string()).await
    }

    /// Whether another patient already uses `cpf`. Always asks the backend.
    pub async fn exists_cpf(&self, cpf: &str, exclude_id: Option<i64>) -> Result<bool, ApiError> {
        self.exists("cpf", cpf, exclude_id).await
    }

    pub async fn exists_rg(&self, rg: &str, exclude_id: Option<i64>) -> Result<bool, ApiError> {
        self.exists("rg", rg, exclude_id).await
    }

    /// `PATCH /api/pacientes/batch/activate|inactivate` with `{ "ids": [...] }`.
    pub async fn set_status_batch(&self, ids: &[i64], status: Status) -> Result<(), ApiError> {
        let route = match status {
            Status::Active => "batch/activate",
            Status::Inactive => "batch/inactivate",
        };
        self.patch_batch(route, &json!({ "ids": ids })).await
    }
}

impl EntityService<Dentists> {
    pub async fn by_specialty(&self, specialty: &str) -> Result<Vec<Dentist>, ApiError> {
        self.cached_lookup("specialty", "especialidade", specialty).await
    }

    pub async fn find_by_status(&self, active: bool) -> Result<Vec<Dentist>, ApiError> {
        self.cached_lookup("status", "status", &active.to_string()).await
    }

    /// Whether another dentist already holds `cro`. Always asks the backend.
    pub async fn exists_cro(&self, cro: &str, exclude_id: Option<i64>) -> Result<bool, ApiError> {
        self.exists("cro", cro, exclude_id).await
    }

    pub async fn exists_email(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, ApiError> {
        self.exists("email", email, exclude_id).await
    }

    /// `PATCH /api/dentistas/batch/status` with `{ "ids": [...], "ativo": bool }`.
    pub async fn set_status_batch(&self, ids: &[i64], status: Status) -> Result<(), ApiError> {
        let body = json!({ "ids": ids, "ativo": status == Status::Active });
        self.patch_batch("batch/status", &body).await
    }
}

impl EntityService<DentalPlans> {
    /// Plan items of one patient.
    pub async fn by_patient(&self, patient_id: i64) -> Result<Vec<DentalPlan>, ApiError> {
        self.cached_lookup("patient", "paciente", &patient_id.to_string()).await
    }
}

impl EntityService<Evolutions> {
    /// Evolution notes of one patient.
    pub async fn by_patient(&self, patient_id: i64) -> Result<Vec<EvolutionRecord>, ApiError> {
        self.cached_lookup("patient", "paciente", &patient_id.to_string()).await
    }
}

/// The entity services, wired to one backend and one storage.
pub struct DataServices {
    pub patients: PatientService,
    pub dentists: DentistService,
    pub dental_plans: DentalPlanService,
    pub evolutions: EvolutionService,
}

impl DataServices {
    pub fn new(config: &Config, backend: Arc<dyn Backend>, storage: Arc<dyn CacheStorage>, clock: Arc<dyn Clock>) -> Self {
        let store = |ttl| CacheStore::new(storage.clone(), clock.clone(), ttl).with_prefix(config.cache_prefix.as_str());
        Self {
            patients: EntityService::new(backend.clone(), store(Patients::ttl(config))),
            dentists: EntityService::new(backend.clone(), store(Dentists::ttl(config))),
            dental_plans: EntityService::new(backend.clone(), store(DentalPlans::ttl(config))),
            evolutions: EntityService::new(backend, store(Evolutions::ttl(config))),
        }
    }

    /// Services with a session-scoped in-memory cache.
    pub fn in_memory(config: &Config, backend: Arc<dyn Backend>) -> Self {
        Self::new(config, backend, Arc::new(MemoryStorage::new()), Arc::new(SystemClock))
    }

    /// Services talking to `config.api_base_url` with a file cache under the
    /// user cache directory.
    pub fn from_config(config: &Config, token: Option<String>) -> Result<Self> {
        let mut backend = RestBackend::from_config(config)?;
        if let Some(token) = token {
            backend.set_token(token);
        }
        let storage = FileStorage::new(config.cache_dir()?)?;
        Ok(Self::new(config, Arc::new(backend), Arc::new(storage), Arc::new(SystemClock)))
    }

    /// Drop every cached entry of every entity.
    pub fn invalidate_all(&self) {
        self.patients.invalidate();
        self.dentists.invalidate();
        self.dental_plans.invalidate();
        self.evolutions.invalidate();
    }
}

/// Percent-encode one URL path segment. Unreserved characters pass through.
pub(crate) fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("Ortodontia"), "Ortodontia");
        assert_eq!(encode_segment("Clínico Geral"), "Cl%C3%ADnico%20Geral");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_segment("2025-001"), "2025-001");
    }

    #[test]
    fn test_namespaced_keys() {
        assert_eq!(PatientService::key("list"), "patients:list");
        assert_eq!(DentistService::key("summary"), "dentists:summary");
        assert_eq!(DentalPlanService::key("item:4"), "dental_plans:item:4");
        assert_eq!(EvolutionService::key("list"), "evolutions:list");
    }
}
