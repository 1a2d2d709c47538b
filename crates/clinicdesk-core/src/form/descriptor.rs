use std::fmt;
use std::sync::Arc;

use crate::date::normalize_date;
use crate::value::FieldValue;

use super::draft::Draft;
use super::rules;

/// A validation rule: `Some(message)` when `value` is unacceptable.
///
/// Rules are only consulted for non-blank values; requiredness is checked
/// separately by the descriptor.
pub type Rule = Arc<dyn Fn(&FieldValue, &Draft) -> Option<String> + Send + Sync>;

/// An idempotent text normalizer applied on every change.
pub type Normalizer = fn(&str) -> String;

const INVALID_DATE: &str = "Data inválida";
const INVALID_NUMBER: &str = "Número inválido";
const INVALID_BOOLEAN: &str = "Valor inválido";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Boolean,
    Date,
    Enum,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Requirement {
    Optional,
    Always(String),
    /// Required while the boolean field `flag` is true.
    When { flag: &'static str, message: String },
}

/// Static description of one form field.
#[derive(Clone)]
pub struct FieldDescriptor {
    key: &'static str,
    kind: FieldKind,
    requirement: Requirement,
    format: Option<Normalizer>,
    rules: Vec<Rule>,
    default: FieldValue,
}

impl FieldDescriptor {
    fn new(key: &'static str, kind: FieldKind, default: FieldValue) -> Self {
        Self {
            key,
            kind,
            requirement: Requirement::Optional,
            format: None,
            rules: Vec::new(),
            default,
        }
    }

    pub fn text(key: &'static str) -> Self {
        Self::new(key, FieldKind::Text, FieldValue::text(""))
    }

    pub fn boolean(key: &'static str) -> Self {
        Self::new(key, FieldKind::Boolean, FieldValue::Bool(false))
    }

    pub fn date(key: &'static str) -> Self {
        Self::new(key, FieldKind::Date, FieldValue::Null)
    }

    pub fn number(key: &'static str) -> Self {
        Self::new(key, FieldKind::Number, FieldValue::Null)
    }

    /// A field restricted to `options`; anything else fails with `message`.
    pub fn enumeration(key: &'static str, options: &'static [&'static str], message: &str) -> Self {
        Self::new(key, FieldKind::Enum, FieldValue::Null).rule(rules::one_of(options, message))
    }

    pub fn required(mut self, message: &str) -> Self {
        self.requirement = Requirement::Always(message.to_string());
        self
    }

    /// Required only while the boolean field `flag` holds `true`.
    pub fn required_when(mut self, flag: &'static str, message: &str) -> Self {
        self.requirement = Requirement::When {
            flag,
            message: message.to_string(),
        };
        self
    }

    pub fn format(mut self, normalizer: Normalizer) -> Self {
        self.format = Some(normalizer);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = value.into();
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn default_value(&self) -> &FieldValue {
        &self.default
    }

    /// The field whose value decides whether this one is required.
    pub fn depends_on(&self) -> Option<&'static str> {
        match self.requirement {
            Requirement::When { flag, .. } => Some(flag),
            _ => None,
        }
    }

    /// Whether this field must be filled given the current draft.
    pub fn is_required(&self, draft: &Draft) -> bool {
        match &self.requirement {
            Requirement::Optional => false,
            Requirement::Always(_) => true,
            Requirement::When { flag, .. } => draft.value(flag).as_bool() == Some(true),
        }
    }

    fn required_message(&self) -> Option<&str> {
        match &self.requirement {
            Requirement::Optional => None,
            Requirement::Always(message) | Requirement::When { message, .. } => Some(message),
        }
    }

    /// Convert raw input into this field's stored shape.
    ///
    /// Input that cannot be converted is kept as text so that `validate`
    /// can report it.
    pub fn coerce(&self, raw: FieldValue) -> FieldValue {
        match self.kind {
            FieldKind::Text => {
                let text = match raw {
                    FieldValue::Text(s) => s,
                    other => other.to_search_text().unwrap_or_default(),
                };
                FieldValue::Text(self.apply_format(&text))
            }
            FieldKind::Boolean => match raw {
                FieldValue::Null => FieldValue::Bool(false),
                FieldValue::Text(s) => match s.trim().to_lowercase().as_str() {
                    "true" | "on" | "1" => FieldValue::Bool(true),
                    "false" | "off" | "0" | "" => FieldValue::Bool(false),
                    _ => FieldValue::Text(s),
                },
                other => other,
            },
            FieldKind::Date => match raw {
                FieldValue::Text(s) if s.trim().is_empty() => FieldValue::Null,
                FieldValue::Text(s) => match normalize_date(&FieldValue::Text(s.clone())) {
                    Some(day) => FieldValue::Date(day.date()),
                    None => FieldValue::Text(s),
                },
                other => other,
            },
            FieldKind::Enum => match raw {
                FieldValue::Text(s) if s.trim().is_empty() => FieldValue::Null,
                FieldValue::Text(s) => FieldValue::Text(s.trim().to_string()),
                other => other,
            },
            FieldKind::Number => match raw {
                FieldValue::Text(s) if s.trim().is_empty() => FieldValue::Null,
                FieldValue::Text(s) => match s.trim().replace(',', ".").parse::<f64>() {
                    Ok(n) if n.is_finite() => FieldValue::Number(n),
                    _ => FieldValue::Text(s),
                },
                other => other,
            },
        }
    }

    /// Convert a value read from an existing entity. No normalizer runs, so
    /// untouched fields go back to the backend exactly as they came.
    pub fn coerce_loaded(&self, raw: FieldValue) -> FieldValue {
        match (self.kind, raw) {
            (FieldKind::Date, FieldValue::Text(s)) => match normalize_date(&FieldValue::Text(s.clone())) {
                Some(day) => FieldValue::Date(day.date()),
                None => FieldValue::Text(s),
            },
            (_, other) => other,
        }
    }

    fn apply_format(&self, text: &str) -> String {
        match self.format {
            Some(normalize) => normalize(text),
            None => text.to_string(),
        }
    }

    /// First problem with `value`, or `None` if it is acceptable.
    pub fn validate(&self, value: &FieldValue, draft: &Draft) -> Option<String> {
        if value.is_blank() {
            return if self.is_required(draft) {
                self.required_message().map(str::to_string)
            } else {
                None
            };
        }

        match (self.kind, value) {
            (FieldKind::Date, FieldValue::Text(_)) => return Some(INVALID_DATE.to_string()),
            (FieldKind::Number, FieldValue::Text(_)) => return Some(INVALID_NUMBER.to_string()),
            (FieldKind::Boolean, FieldValue::Text(_)) => return Some(INVALID_BOOLEAN.to_string()),
            _ => {}
        }

        self.rules.iter().find_map(|rule| rule(value, draft))
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("requirement", &self.requirement)
            .field("format", &self.format.is_some())
            .field("rules", &self.rules.len())
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_required_blank_text() {
        let field = FieldDescriptor::text("nome").required("Nome é obrigatório");
        let draft = Draft::default();
        assert_eq!(
            field.validate(&FieldValue::text("  "), &draft).as_deref(),
            Some("Nome é obrigatório")
        );
        assert_eq!(field.validate(&FieldValue::text("Ana"), &draft), None);
    }

    #[test]
    fn test_rules_run_in_order_and_skip_blank_optional() {
        let field = FieldDescriptor::text("nome")
            .rule(rules::min_len(3, "curto"))
            .rule(rules::max_len(5, "longo"));
        let draft = Draft::default();
        assert_eq!(field.validate(&FieldValue::text(""), &draft), None);
        assert_eq!(field.validate(&FieldValue::text("ab"), &draft).as_deref(), Some("curto"));
        assert_eq!(field.validate(&FieldValue::text("abcdef"), &draft).as_deref(), Some("longo"));
    }

    #[test]
    fn test_conditional_requirement_follows_flag() {
        let field = FieldDescriptor::text("fumanteQuantidade").required_when("fumante", "Informe a quantidade");
        let mut draft = Draft::default();
        assert!(!field.is_required(&draft));
        assert_eq!(field.depends_on(), Some("fumante"));

        draft.set_value("fumante", FieldValue::Bool(true));
        assert!(field.is_required(&draft));
        assert_eq!(
            field.validate(&FieldValue::text(""), &draft).as_deref(),
            Some("Informe a quantidade")
        );
    }

    #[test]
    fn test_date_coercion() {
        let field = FieldDescriptor::date("dataNascimento");
        let day = NaiveDate::from_ymd_opt(1990, 7, 21).unwrap();
        assert_eq!(field.coerce(FieldValue::text("21/07/1990")), FieldValue::Date(day));
        assert_eq!(field.coerce(FieldValue::text("1990-07-21T00:00:00Z")), FieldValue::Date(day));
        assert_eq!(field.coerce(FieldValue::text("")), FieldValue::Null);

        let garbage = field.coerce(FieldValue::text("21/13/1990"));
        assert_eq!(garbage, FieldValue::text("21/13/1990"));
        assert_eq!(field.validate(&garbage, &Draft::default()).as_deref(), Some("Data inválida"));
    }

    #[test]
    fn test_number_coercion_accepts_decimal_comma() {
        let field = FieldDescriptor::number("valor");
        assert_eq!(field.coerce(FieldValue::text("150,50")), FieldValue::Number(150.5));
        assert_eq!(field.coerce(FieldValue::text("")), FieldValue::Null);
        let bad = field.coerce(FieldValue::text("abc"));
        assert_eq!(field.validate(&bad, &Draft::default()).as_deref(), Some("Número inválido"));
    }

    #[test]
    fn test_boolean_coercion() {
        let field = FieldDescriptor::boolean("fumante");
        assert_eq!(field.coerce(FieldValue::text("on")), FieldValue::Bool(true));
        assert_eq!(field.coerce(FieldValue::Null), FieldValue::Bool(false));
        assert_eq!(field.coerce(FieldValue::Bool(true)), FieldValue::Bool(true));
    }

    #[test]
    fn test_text_normalizer_runs_on_coerce_but_not_on_load() {
        let field = FieldDescriptor::text("telefone").format(crate::utils::format_phone);
        assert_eq!(field.coerce(FieldValue::text("11987654321")), FieldValue::text("(11) 98765-4321"));
        assert_eq!(field.coerce_loaded(FieldValue::text("11987654321")), FieldValue::text("11987654321"));
    }

    #[test]
    fn test_enum_membership() {
        const SEXO: &[&str] = &["MASCULINO", "FEMININO", "OUTRO"];
        let field = FieldDescriptor::enumeration("sexo", SEXO, "Sexo inválido");
        let draft = Draft::default();
        assert_eq!(field.coerce(FieldValue::text(" ")), FieldValue::Null);
        assert_eq!(field.validate(&FieldValue::text("FEMININO"), &draft), None);
        assert_eq!(field.validate(&FieldValue::text("X"), &draft).as_deref(), Some("Sexo inválido"));
    }
}
