use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Dentist {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub cro: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Dentist {
    /// Label for pickers, e.g. "Maria Souza - SP-12345".
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.name, self.cro)
    }

    pub fn status_text(&self) -> &'static str {
        if self.active {
            "Ativo"
        } else {
            "Inativo"
        }
    }
}

/// Body of `POST/PUT /api/dentistas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DentistRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub cro: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "ativo")]
    pub active: bool,
}

impl From<&Dentist> for DentistRequest {
    fn from(dentist: &Dentist) -> Self {
        Self {
            name: dentist.name.clone(),
            cro: dentist.cro.clone(),
            specialty: dentist.specialty.clone(),
            phone: dentist.phone.clone(),
            email: dentist.email.clone(),
            active: dentist.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DentistSummary {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub cro: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

impl Filterable for Dentist {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => FieldValue::from(self.id),
            "nome" => FieldValue::text(self.name.as_str()),
            "cro" => FieldValue::text(self.cro.as_str()),
            "especialidade" => FieldValue::text(self.specialty.as_str()),
            "telefone" => self.phone.clone().into(),
            "email" => self.email.clone().into(),
            "ativo" => FieldValue::Bool(self.active),
            "createdAt" => self.created_at.clone().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Filterable for DentistSummary {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => FieldValue::from(self.id),
            "nome" => FieldValue::text(self.name.as_str()),
            "cro" => FieldValue::text(self.cro.as_str()),
            "especialidade" => FieldValue::text(self.specialty.as_str()),
            "ativo" => FieldValue::Bool(self.active),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, FilterQuery};
    use serde_json::json;

    fn dentists() -> Vec<Dentist> {
        serde_json::from_value(json!([
            {"id": 1, "nome": "Maria Souza", "cro": "SP-12345", "especialidade": "Ortodontia",
             "telefone": null, "email": "maria@clinica.com", "ativo": true},
            {"id": 2, "nome": "João Pereira", "cro": "RJ-54321", "especialidade": "Endodontia",
             "telefone": "(21) 3333-4444", "email": null, "ativo": false}
        ]))
        .unwrap()
    }

    #[test]
    fn test_deserialize_defaults() {
        let dentist: Dentist = serde_json::from_value(json!({
            "id": 3, "nome": "Ana", "cro": "MG-11111", "especialidade": "Prótese",
            "telefone": null, "email": null
        }))
        .unwrap();
        assert!(dentist.active);
        assert_eq!(dentist.created_at, None);
        assert_eq!(dentist.display_label(), "Ana - MG-11111");
    }

    #[test]
    fn test_request_omits_missing_contact() {
        let request = DentistRequest::from(&dentists()[0]);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["nome"], json!("Maria Souza"));
        assert_eq!(body["ativo"], json!(true));
        assert!(body.get("telefone").is_none());
        assert_eq!(body["email"], json!("maria@clinica.com"));
    }

    #[test]
    fn test_filter_by_status_and_specialty() {
        let all = dentists();
        let inactive = filter(&all, &FilterQuery::new().predicate("ativo", false));
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, 2);

        let ortho = filter(&all, &FilterQuery::new().predicate("especialidade", "ortodontia"));
        assert_eq!(ortho.len(), 1);
        assert_eq!(ortho[0].status_text(), "Ativo");

        let by_cro = filter(&all, &FilterQuery::new().text("rj-").fields(["nome", "cro"]));
        assert_eq!(by_cro.len(), 1);
        assert_eq!(by_cro[0].name, "João Pereira");
    }
}
