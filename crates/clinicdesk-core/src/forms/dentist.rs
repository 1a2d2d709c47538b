use crate::form::{rules, FieldDescriptor, FormStateController, ValidatorRegistry};
use crate::utils::{capitalize_name, format_cro, format_email, format_phone, format_specialty};

pub fn dentist_registry() -> ValidatorRegistry {
    ValidatorRegistry::new([
        FieldDescriptor::text("nome")
            .required("Nome é obrigatório")
            .format(capitalize_name)
            .rule(rules::min_len(3, "Nome deve ter pelo menos 3 caracteres"))
            .rule(rules::max_len(100, "Nome muito longo")),
        FieldDescriptor::text("cro")
            .required("CRO é obrigatório")
            .format(format_cro)
            .rule(rules::cro_format("CRO deve ter 2 letras, hífen e 5 números")),
        FieldDescriptor::text("especialidade")
            .required("Especialidade é obrigatória")
            .format(format_specialty)
            .rule(rules::min_len(3, "Especialidade deve ter pelo menos 3 caracteres"))
            .rule(rules::max_len(50, "Especialidade muito longa")),
        FieldDescriptor::text("telefone")
            .format(format_phone)
            .rule(rules::digits_between(10, 11, "Telefone deve ter 10 ou 11 dígitos")),
        FieldDescriptor::text("email")
            .format(format_email)
            .rule(rules::email("Por favor, insira um email válido"))
            .rule(rules::max_len(100, "Email muito longo")),
        FieldDescriptor::boolean("ativo").with_default(true),
    ])
}

pub fn dentist_form() -> FormStateController {
    FormStateController::new(dentist_registry())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;
    use serde_json::json;

    #[test]
    fn test_untouched_bad_email_keeps_form_invalid() {
        let mut form = dentist_form();
        form.handle_change("nome", "Carla dos Santos");
        form.handle_change("cro", "SP-12345");
        form.handle_change("especialidade", "Ortodontia");
        form.handle_change("email", "x");

        assert!(!form.is_form_valid());
        assert_eq!(form.error("email"), None);

        form.handle_change("email", "carla@clinica.com");
        assert!(form.is_form_valid());
    }

    #[test]
    fn test_valid_dentist() {
        let mut form = dentist_form();
        assert!(!form.is_form_valid());

        form.handle_change("nome", "carla DOS santos");
        form.handle_change("cro", "sp12345");
        form.handle_change("especialidade", "ortodontia");
        form.handle_change("email", " Carla@Clinica.com ");
        assert!(form.is_form_valid());

        assert_eq!(
            form.get_form_data(),
            json!({
                "nome": "Carla dos Santos",
                "cro": "SP-12345",
                "especialidade": "Ortodontia",
                "telefone": "",
                "email": "carla@clinica.com",
                "ativo": true
            })
        );
    }

    #[test]
    fn test_incomplete_cro() {
        let mut form = dentist_form();
        form.handle_change("cro", "sp123");
        form.handle_blur("cro");
        assert_eq!(form.value("cro"), &FieldValue::text("SP-123"));
        assert_eq!(form.error("cro"), Some("CRO deve ter 2 letras, hífen e 5 números"));
    }
}
