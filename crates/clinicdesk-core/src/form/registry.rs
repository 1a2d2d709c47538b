use std::collections::HashMap;

use tracing::warn;

use super::descriptor::FieldDescriptor;
use super::draft::Draft;

/// The fixed set of fields of one form.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    fields: Vec<FieldDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ValidatorRegistry {
    /// Build a registry. A repeated key keeps its first descriptor.
    pub fn new(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        let mut fields = Vec::new();
        let mut index = HashMap::new();
        for descriptor in descriptors {
            if index.contains_key(descriptor.key()) {
                warn!(field = descriptor.key(), "Duplicate field descriptor ignored");
                continue;
            }
            index.insert(descriptor.key(), fields.len());
            fields.push(descriptor);
        }
        Self { fields, index }
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields whose requiredness depends on `key`.
    pub fn dependents<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a FieldDescriptor> + 'a {
        self.fields
            .iter()
            .filter(move |field| field.depends_on() == Some(key))
    }

    /// A draft holding every field's default value.
    pub fn initial_draft(&self) -> Draft {
        let mut draft = Draft::default();
        for field in &self.fields {
            draft.set_value(field.key(), field.default_value().clone());
        }
        draft
    }

    /// Validate `key` against the draft's current value.
    pub fn validate(&self, key: &str, draft: &Draft) -> Option<String> {
        let field = self.get(key)?;
        field.validate(draft.value(key), draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    fn registry() -> ValidatorRegistry {
        ValidatorRegistry::new([
            FieldDescriptor::text("nome").required("Nome é obrigatório"),
            FieldDescriptor::boolean("fumante"),
            FieldDescriptor::text("fumanteQuantidade").required_when("fumante", "Informe"),
            FieldDescriptor::text("nome"),
        ])
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert!(registry.validate("nome", &registry.initial_draft()).is_some());
    }

    #[test]
    fn test_initial_draft_defaults() {
        let draft = registry().initial_draft();
        assert_eq!(draft.value("nome"), &FieldValue::text(""));
        assert_eq!(draft.value("fumante"), &FieldValue::Bool(false));
        assert_eq!(draft.value("unknown"), &FieldValue::Null);
    }

    #[test]
    fn test_dependents() {
        let registry = registry();
        let keys: Vec<_> = registry.dependents("fumante").map(FieldDescriptor::key).collect();
        assert_eq!(keys, vec!["fumanteQuantidade"]);
        assert_eq!(registry.dependents("nome").count(), 0);
    }
}
