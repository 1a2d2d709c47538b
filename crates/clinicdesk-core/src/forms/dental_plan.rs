use crate::form::{rules, FieldDescriptor, FormStateController, ValidatorRegistry};

/// One procedure line of a patient's treatment plan.
pub fn dental_plan_registry() -> ValidatorRegistry {
    ValidatorRegistry::new([
        FieldDescriptor::text("dente")
            .required("Dente é obrigatório")
            .rule(rules::max_len(10, "Dente deve ter no máximo 10 caracteres")),
        FieldDescriptor::text("procedimento")
            .required("Procedimento é obrigatório")
            .rule(rules::max_len(200, "Procedimento deve ter no máximo 200 caracteres")),
        FieldDescriptor::number("valor")
            .required("Valor é obrigatório")
            .rule(rules::positive("Valor deve ser maior que zero")),
        FieldDescriptor::number("pacienteId")
            .required("Paciente é obrigatório")
            .rule(rules::positive("Paciente inválido")),
        FieldDescriptor::text("observacoes").rule(rules::max_len(500, "Campo deve ter no máximo 500 caracteres")),
    ])
}

pub fn dental_plan_form() -> FormStateController {
    FormStateController::new(dental_plan_registry())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_line_payload() {
        let mut form = dental_plan_form();
        form.handle_change("dente", "11");
        form.handle_change("procedimento", "Restauração");
        form.handle_change("valor", "150,00");
        form.handle_change("pacienteId", 7_i64);
        assert!(form.validate_all());

        let data = form.get_form_data();
        assert_eq!(data["valor"], json!(150));
        assert_eq!(data["pacienteId"], json!(7));
    }

    #[test]
    fn test_value_must_be_positive() {
        let mut form = dental_plan_form();
        form.handle_change("valor", "0");
        form.handle_blur("valor");
        assert_eq!(form.error("valor"), Some("Valor deve ser maior que zero"));

        form.handle_change("valor", "abc");
        assert_eq!(form.error("valor"), Some("Número inválido"));
    }
}
