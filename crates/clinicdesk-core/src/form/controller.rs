use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::value::FieldValue;

use super::draft::Draft;
use super::registry::ValidatorRegistry;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Form has {count} invalid field(s)")]
    Invalid { count: usize },

    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// Per-field value, error and touched state of one form.
///
/// Errors are computed for a field once it has been touched (blur or
/// `validate_all`), and only then surfaced by [`error`](Self::error).
/// [`is_form_valid`](Self::is_form_valid) does not depend on touched state.
#[derive(Debug, Clone)]
pub struct FormStateController {
    registry: ValidatorRegistry,
    draft: Draft,
}

impl FormStateController {
    pub fn new(registry: ValidatorRegistry) -> Self {
        let draft = registry.initial_draft();
        Self { registry, draft }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn value(&self, key: &str) -> &FieldValue {
        self.draft.value(key)
    }

    fn revalidate(&mut self, key: &'static str) {
        let error = self.registry.validate(key, &self.draft);
        self.draft.set_error(key, error);
    }

    /// Store a new value for `key`, normalized for its field.
    pub fn handle_change(&mut self, key: &str, raw: impl Into<FieldValue>) {
        let Some(field) = self.registry.get(key) else {
            warn!(field = key, "Change for unknown form field ignored");
            return;
        };
        let key = field.key();
        let value = field.coerce(raw.into());
        self.draft.set_value(key, value);

        if self.draft.is_touched(key) {
            self.revalidate(key);
        }

        let dependents: Vec<&'static str> = self
            .registry
            .dependents(key)
            .map(|field| field.key())
            .filter(|dependent| self.draft.is_touched(dependent))
            .collect();
        for dependent in dependents {
            self.revalidate(dependent);
        }
    }

    /// Mark `key` touched and validate it.
    pub fn handle_blur(&mut self, key: &str) {
        let Some(field) = self.registry.get(key) else {
            warn!(field = key, "Blur for unknown form field ignored");
            return;
        };
        let key = field.key();
        self.draft.touch(key);
        self.revalidate(key);
    }

    /// Touch and validate every field. Returns overall validity.
    pub fn validate_all(&mut self) -> bool {
        let keys: Vec<&'static str> = self.registry.keys().collect();
        for key in keys {
            self.draft.touch(key);
            self.revalidate(key);
        }

        let valid = !self.draft.has_errors();
        debug!(valid, errors = self.draft.errors().len(), "Validated form");
        valid
    }

    /// Live validity over every field, touched or not.
    ///
    /// Errors of untouched fields count here but stay hidden from
    /// [`error`](Self::error).
    pub fn is_form_valid(&self) -> bool {
        self.registry
            .fields()
            .iter()
            .all(|field| field.validate(self.draft.value(field.key()), &self.draft).is_none())
    }

    /// The error to display for `key`, if it has been touched.
    pub fn error(&self, key: &str) -> Option<&str> {
        if self.draft.is_touched(key) {
            self.draft.error(key)
        } else {
            None
        }
    }

    pub fn errors(&self) -> &std::collections::BTreeMap<&'static str, String> {
        self.draft.errors()
    }

    pub fn touched_fields(&self) -> Vec<&'static str> {
        self.draft.touched().collect()
    }

    pub fn clear_field_error(&mut self, key: &str) {
        if let Some(field) = self.registry.get(key) {
            self.draft.set_error(field.key(), None);
        }
    }

    /// Back to default values with nothing touched.
    pub fn reset(&mut self) {
        self.draft = self.registry.initial_draft();
    }

    /// Populate the draft from an existing entity.
    ///
    /// Keys without a field are kept aside and written back by
    /// [`get_form_data`](Self::get_form_data). Described fields the entity
    /// lacks are set to `Null`. Nothing is touched or validated.
    pub fn load(&mut self, entity: &Value) {
        let mut draft = Draft::default();
        for field in self.registry.fields() {
            draft.set_value(field.key(), FieldValue::Null);
        }

        match entity.as_object() {
            Some(object) => {
                for (key, raw) in object {
                    match self.registry.get(key) {
                        Some(field) => {
                            draft.set_value(field.key(), field.coerce_loaded(FieldValue::from_json(raw)))
                        }
                        None => draft.set_extra(key.clone(), raw.clone()),
                    }
                }
            }
            None => warn!("Ignoring non-object entity passed to form load"),
        }

        self.draft = draft;
    }

    /// Wire payload for the backend. Dates are sent as `YYYY-MM-DD`.
    pub fn get_form_data(&self) -> Value {
        let mut payload: Map<String, Value> = self.draft.extras().clone();
        for key in self.registry.keys() {
            payload.insert(key.to_string(), self.draft.value(key).to_json());
        }
        Value::Object(payload)
    }

    /// Validate, then hand the payload to `send`.
    ///
    /// `send` is not called while the form is invalid. On success the form is
    /// reset; on a transport failure the draft is kept so the user can retry.
    pub async fn submit<F, Fut, T>(&mut self, send: F) -> Result<T, SubmitError>
    where
        F: FnOnce(Value) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if !self.validate_all() {
            return Err(SubmitError::Invalid {
                count: self.draft.errors().len(),
            });
        }

        let result = send(self.get_form_data()).await?;
        self.reset();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{rules, FieldDescriptor};
    use chrono::NaiveDate;
    use serde_json::json;

    fn controller() -> FormStateController {
        FormStateController::new(ValidatorRegistry::new([
            FieldDescriptor::text("nome")
                .required("Nome é obrigatório")
                .rule(rules::min_len(3, "Nome deve ter pelo menos 3 caracteres"))
                .format(crate::utils::capitalize_name),
            FieldDescriptor::text("telefone")
                .format(crate::utils::format_phone)
                .rule(rules::digits_between(10, 11, "Telefone deve ter 10 ou 11 dígitos")),
            FieldDescriptor::date("dataNascimento"),
            FieldDescriptor::boolean("fumante"),
            FieldDescriptor::text("fumanteQuantidade").required_when("fumante", "Informe a quantidade"),
        ]))
    }

    #[test]
    fn test_change_normalizes() {
        let mut form = controller();
        form.handle_change("nome", "maria da silva");
        assert_eq!(form.value("nome"), &FieldValue::text("Maria da Silva"));
    }

    #[test]
    fn test_untouched_errors_are_hidden() {
        let mut form = controller();
        form.handle_change("telefone", "123");
        assert_eq!(form.error("telefone"), None);
        assert!(form.errors().is_empty());

        form.handle_blur("telefone");
        assert_eq!(form.error("telefone"), Some("Telefone deve ter 10 ou 11 dígitos"));

        form.handle_change("telefone", "11987654321");
        assert_eq!(form.error("telefone"), None);
    }

    #[test]
    fn test_required_gating() {
        let mut form = controller();
        assert!(!form.is_form_valid());
        form.handle_change("nome", "Ana");
        assert!(form.is_form_valid());
    }

    #[test]
    fn test_untouched_invalid_optional_field_blocks_validity() {
        let mut form = controller();
        form.handle_change("nome", "Ana");
        form.handle_change("telefone", "123");

        assert!(!form.is_form_valid());
        assert_eq!(form.error("telefone"), None);
        assert!(form.errors().is_empty());

        form.handle_change("telefone", "");
        assert!(form.is_form_valid());
    }

    #[test]
    fn test_conditional_requirement_flips_validity() {
        let mut form = controller();
        form.handle_change("nome", "Ana");
        assert!(form.is_form_valid());

        form.handle_change("fumante", true);
        assert!(!form.is_form_valid());

        form.handle_change("fumanteQuantidade", "10 por dia");
        assert!(form.is_form_valid());
    }

    #[test]
    fn test_flag_change_revalidates_touched_dependent() {
        let mut form = controller();
        form.handle_change("fumante", true);
        form.handle_blur("fumanteQuantidade");
        assert_eq!(form.error("fumanteQuantidade"), Some("Informe a quantidade"));

        form.handle_change("fumante", false);
        assert_eq!(form.error("fumanteQuantidade"), None);
    }

    #[test]
    fn test_validate_all_touches_everything() {
        let mut form = controller();
        assert!(!form.validate_all());
        assert_eq!(form.touched_fields().len(), 5);
        assert_eq!(form.error("nome"), Some("Nome é obrigatório"));

        form.clear_field_error("nome");
        assert_eq!(form.error("nome"), None);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut form = controller();
        form.handle_change("naoExiste", "x");
        form.handle_blur("naoExiste");
        assert_eq!(form.value("naoExiste"), &FieldValue::Null);
        assert!(form.touched_fields().is_empty());
    }

    #[test]
    fn test_form_data_serializes_dates() {
        let mut form = controller();
        form.handle_change("nome", "Ana");
        form.handle_change("dataNascimento", "21/07/1990");
        let data = form.get_form_data();
        assert_eq!(data["dataNascimento"], json!("1990-07-21"));
        assert_eq!(data["fumante"], json!(false));
        assert_eq!(
            form.value("dataNascimento"),
            &FieldValue::Date(NaiveDate::from_ymd_opt(1990, 7, 21).unwrap())
        );
    }

    #[test]
    fn test_load_keeps_unknown_keys() {
        let mut form = controller();
        form.load(&json!({
            "id": 7,
            "nome": "ana",
            "telefone": null,
            "dataNascimento": "1990-07-21T00:00:00",
            "fumante": false,
            "fumanteQuantidade": ""
        }));
        assert!(form.touched_fields().is_empty());
        assert_eq!(form.value("nome"), &FieldValue::text("ana"));

        let data = form.get_form_data();
        assert_eq!(data["id"], json!(7));
        assert_eq!(data["dataNascimento"], json!("1990-07-21"));
    }

    #[tokio::test]
    async fn test_submit_invalid_does_not_send() {
        let mut form = controller();
        let mut called = false;
        let result = form
            .submit(|_| {
                called = true;
                async { Ok::<_, ApiError>(()) }
            })
            .await;
        assert!(matches!(result, Err(SubmitError::Invalid { count: 1 })));
        assert!(!called);
    }

    #[tokio::test]
    async fn test_submit_keeps_draft_on_transport_error() {
        let mut form = controller();
        form.handle_change("nome", "Ana");
        let result: Result<(), _> = form
            .submit(|_| async { Err(ApiError::ServerError("indisponível".to_string())) })
            .await;
        assert!(matches!(result, Err(SubmitError::Transport(ApiError::ServerError(_)))));
        assert_eq!(form.value("nome"), &FieldValue::text("Ana"));
    }

    #[tokio::test]
    async fn test_submit_success_resets() {
        let mut form = controller();
        form.handle_change("nome", "Ana");
        let sent = form
            .submit(|payload| async move { Ok::<_, ApiError>(payload) })
            .await
            .unwrap();
        assert_eq!(sent["nome"], json!("Ana"));
        assert_eq!(form.value("nome"), &FieldValue::text(""));
        assert!(form.touched_fields().is_empty());
    }
}
