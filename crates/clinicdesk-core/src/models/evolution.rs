use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::value::FieldValue;

/// Treatment evolution note: what was done on a visit and any complications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EvolutionRecord {
    pub id: i64,
    #[serde(rename = "dataProcedimento")]
    pub procedure_date: String,
    #[serde(rename = "evolucaoIntercorrenciasTratamento")]
    pub notes: String,
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "nomePaciente")]
    pub patient_name: Option<String>,
}

/// Body of `POST/PUT /api/evolucoes-tratamento`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EvolutionRecordRequest {
    #[serde(rename = "dataProcedimento")]
    pub procedure_date: String,
    #[serde(rename = "evolucaoIntercorrenciasTratamento")]
    pub notes: String,
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
}

impl From<&EvolutionRecord> for EvolutionRecordRequest {
    fn from(record: &EvolutionRecord) -> Self {
        Self {
            procedure_date: record.procedure_date.clone(),
            notes: record.notes.clone(),
            patient_id: record.patient_id,
        }
    }
}

impl Filterable for EvolutionRecord {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => FieldValue::from(self.id),
            "dataProcedimento" => FieldValue::text(self.procedure_date.as_str()),
            "evolucaoIntercorrenciasTratamento" => FieldValue::text(self.notes.as_str()),
            "pacienteId" => FieldValue::from(self.patient_id),
            "nomePaciente" => self.patient_name.clone().into(),
            _ => return None,
        };
        Some(value)
    }
}
