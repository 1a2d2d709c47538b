use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::value::FieldValue;

/// Treatment plan item for one tooth of one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DentalPlan {
    pub id: i64,
    #[serde(rename = "dente")]
    pub tooth: String,
    #[serde(rename = "procedimento")]
    pub procedure: String,
    #[serde(rename = "valor")]
    pub price: f64,
    /// `true` once the procedure is done.
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    #[serde(rename = "dataCriacao")]
    pub created_at: Option<String>,
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "nomePaciente")]
    pub patient_name: Option<String>,
}

/// Body of `POST/PUT /api/planos-dentais`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DentalPlanRequest {
    #[serde(rename = "dente")]
    pub tooth: String,
    #[serde(rename = "procedimento")]
    pub procedure: String,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&DentalPlan> for DentalPlanRequest {
    fn from(plan: &DentalPlan) -> Self {
        Self {
            tooth: plan.tooth.clone(),
            procedure: plan.procedure.clone(),
            price: plan.price,
            patient_id: plan.patient_id,
            notes: plan.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DentalPlanSummary {
    pub id: i64,
    #[serde(rename = "dente")]
    pub tooth: String,
    #[serde(rename = "procedimento")]
    pub procedure: String,
    #[serde(rename = "valor")]
    pub price: f64,
    #[serde(default)]
    pub status: bool,
    #[serde(rename = "nomePaciente")]
    pub patient_name: Option<String>,
}

/// Sum of `valor` over `plans`.
pub fn total_price<'a>(plans: impl IntoIterator<Item = &'a DentalPlan>) -> f64 {
    plans.into_iter().map(|plan| plan.price).sum()
}

impl Filterable for DentalPlan {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => FieldValue::from(self.id),
            "dente" => FieldValue::text(self.tooth.as_str()),
            "procedimento" => FieldValue::text(self.procedure.as_str()),
            "valor" => FieldValue::Number(self.price),
            "status" => FieldValue::Bool(self.status),
            "observacoes" => self.notes.clone().into(),
            "dataCriacao" => self.created_at.clone().into(),
            "pacienteId" => FieldValue::from(self.patient_id),
            "nomePaciente" => self.patient_name.clone().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Filterable for DentalPlanSummary {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => FieldValue::from(self.id),
            "dente" => FieldValue::text(self.tooth.as_str()),
            "procedimento" => FieldValue::text(self.procedure.as_str()),
            "valor" => FieldValue::Number(self.price),
            "status" => FieldValue::Bool(self.status),
            "nomePaciente" => self.patient_name.clone().into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::CalendarDate;
    use crate::filter::{filter, FilterQuery};
    use serde_json::json;

    fn plans() -> Vec<DentalPlan> {
        serde_json::from_value(json!([
            {"id": 1, "dente": "11", "procedimento": "Restauração", "valor": 150.5, "status": false,
             "observacoes": null, "dataCriacao": "2025-03-04T10:15:00", "pacienteId": 7, "nomePaciente": "Ana Silva"},
            {"id": 2, "dente": "36", "procedimento": "Canal", "valor": 800, "status": true,
             "observacoes": "urgente", "dataCriacao": "2025-03-05T08:00:00", "pacienteId": 7, "nomePaciente": "Ana Silva"},
            {"id": 3, "dente": "21", "procedimento": "Limpeza", "valor": 120, "status": false,
             "observacoes": null, "dataCriacao": "2025-03-04T16:45:00", "pacienteId": 9, "nomePaciente": "Bruno Lima"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(&plans()), 1070.5);
        assert_eq!(total_price(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_filter_by_creation_day_ignores_time() {
        let all = plans();
        let day = CalendarDate::from_ymd(2025, 3, 4).unwrap().date();
        let hits = filter(&all, &FilterQuery::new().predicate("dataCriacao", day));
        let ids: Vec<i64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filter_by_patient_and_status() {
        let all = plans();
        let query = FilterQuery::new().predicate("pacienteId", 7_i64).predicate("status", false);
        let hits = filter(&all, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].procedure, "Restauração");
    }

    #[test]
    fn test_request_payload_keys() {
        let body = serde_json::to_value(DentalPlanRequest::from(&plans()[1])).unwrap();
        assert_eq!(body["dente"], json!("36"));
        assert_eq!(body["pacienteId"], json!(7));
        assert_eq!(body["observacoes"], json!("urgente"));
    }
}
