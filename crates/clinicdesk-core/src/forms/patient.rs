//! Patient intake form.
//!
//! Only `nome` is always required. Detail fields such as
//! `fumanteQuantidade` become required while their companion flag is set.

use chrono::NaiveDate;

use crate::form::{rules, FieldDescriptor, FormStateController, ValidatorRegistry};
use crate::utils::{capitalize_name, format_cpf, format_phone};

pub const SEXO_OPTIONS: &[&str] = &["MASCULINO", "FEMININO", "OUTRO"];

pub const ESTADO_CIVIL_OPTIONS: &[&str] = &["SOLTEIRO", "CASADO", "DIVORCIADO", "VIUVO", "UNIAO_ESTAVEL"];

/// Free-text field with a length cap.
fn limited(key: &'static str, max: usize, message: &str) -> FieldDescriptor {
    FieldDescriptor::text(key).rule(rules::max_len(max, message))
}

fn cpf(key: &'static str) -> FieldDescriptor {
    FieldDescriptor::text(key)
        .format(format_cpf)
        .rule(rules::digits_len(11, "CPF deve ter 11 dígitos"))
}

fn phone(key: &'static str) -> FieldDescriptor {
    FieldDescriptor::text(key)
        .format(format_phone)
        .rule(rules::digits_between(10, 11, "Telefone deve ter 10 ou 11 dígitos"))
}

/// Text detail required while `flag` is checked.
fn detail(key: &'static str, flag: &'static str, max: usize, required: &str) -> FieldDescriptor {
    limited(key, max, &format!("Campo deve ter no máximo {} caracteres", max)).required_when(flag, required)
}

fn identification(today: NaiveDate) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("nome")
            .required("Nome é obrigatório")
            .format(capitalize_name)
            .rule(rules::min_len(3, "Nome deve ter pelo menos 3 caracteres"))
            .rule(rules::max_len(100, "Nome deve ter no máximo 100 caracteres")),
        cpf("cpf").rule(rules::not_repeated_digits("CPF inválido")),
        limited("rg", 20, "RG deve ter no máximo 20 caracteres"),
        limited("orgaoExpedidor", 20, "Órgão expedidor deve ter no máximo 20 caracteres"),
        FieldDescriptor::date("dataNascimento")
            .rule(rules::date_not_after(today, "Data de nascimento não pode ser futura"))
            .rule(rules::age_between(
                today,
                1,
                150,
                "Paciente deve ter pelo menos 1 ano",
                "Data de nascimento inválida",
            )),
        limited("naturalidade", 50, "Campo deve ter no máximo 50 caracteres"),
        limited("nacionalidade", 50, "Campo deve ter no máximo 50 caracteres"),
        limited("profissao", 50, "Profissão deve ter no máximo 50 caracteres"),
        limited("enderecoResidencial", 200, "Endereço deve ter no máximo 200 caracteres"),
        limited("indicadoPor", 100, "Campo deve ter no máximo 100 caracteres"),
        FieldDescriptor::enumeration("sexo", SEXO_OPTIONS, "Sexo inválido"),
        phone("telefone"),
        FieldDescriptor::boolean("status").with_default(true),
    ]
}

fn guardian() -> Vec<FieldDescriptor> {
    vec![
        limited("nomeResponsavel", 100, "Nome deve ter no máximo 100 caracteres").format(capitalize_name),
        limited("rgResponsavel", 20, "RG deve ter no máximo 20 caracteres"),
        limited("orgaoExpedidorResponsavel", 20, "Órgão expedidor deve ter no máximo 20 caracteres"),
        cpf("cpfResponsavel"),
        FieldDescriptor::enumeration("estadoCivilResponsavel", ESTADO_CIVIL_OPTIONS, "Estado civil inválido"),
        limited("conjugeResponsavel", 100, "Nome deve ter no máximo 100 caracteres").format(capitalize_name),
        limited("rgConjuge", 20, "RG deve ter no máximo 20 caracteres"),
        limited("orgaoExpedidorConjuge", 20, "Órgão expedidor deve ter no máximo 20 caracteres"),
        cpf("cpfConjuge"),
    ]
}

fn anamnesis() -> Vec<FieldDescriptor> {
    let flags = [
        "febreReumatica",
        "hepatite",
        "diabetes",
        "hipertensaoArterialSistemica",
        "portadorHiv",
        "alteracaoCoagulacaoSanguinea",
        "reacoesAlergicas",
        "doencasSistemicas",
        "internacaoRecente",
        "utilizandoMedicacao",
        "fumante",
    ];
    let mut fields: Vec<FieldDescriptor> = flags.into_iter().map(FieldDescriptor::boolean).collect();

    fields.extend([
        detail("fumanteQuantidade", "fumante", 50, "Informe a quantidade"),
        limited("tempoFumo", 50, "Campo deve ter no máximo 50 caracteres"),
        FieldDescriptor::boolean("bebidasAlcoolicas"),
        FieldDescriptor::boolean("problemasCardiacos"),
        FieldDescriptor::boolean("problemasRenais"),
        FieldDescriptor::boolean("problemasGastricos"),
        FieldDescriptor::boolean("problemasRespiratorios"),
        FieldDescriptor::boolean("problemasAlergicos"),
        detail("problemasAlergicosQuais", "problemasAlergicos", 200, "Informe quais problemas alérgicos"),
        FieldDescriptor::boolean("problemasArticularesOuReumatismo"),
        limited("queixaPrincipal", 500, "Campo deve ter no máximo 500 caracteres"),
        limited("evolucaoDoencaAtual", 500, "Campo deve ter no máximo 500 caracteres"),
    ]);
    fields
}

fn insurance() -> Vec<FieldDescriptor> {
    vec![
        limited("convenio", 50, "Convênio deve ter no máximo 50 caracteres"),
        limited("numeroInscricao", 20, "Número de inscrição deve ter no máximo 20 caracteres"),
    ]
}

fn oral_inspection() -> Vec<FieldDescriptor> {
    let regions = [
        "lingua",
        "mucosa",
        "palato",
        "labios",
        "gengivas",
        "nariz",
        "face",
        "ganglios",
        "glandulasSalivares",
    ];
    let mut fields: Vec<FieldDescriptor> = regions
        .into_iter()
        .map(|key| limited(key, 100, "Campo deve ter no máximo 100 caracteres"))
        .collect();

    fields.extend([
        FieldDescriptor::boolean("alteracaoOclusao"),
        detail("alteracaoOclusaoTipo", "alteracaoOclusao", 100, "Informe o tipo de alteração"),
        FieldDescriptor::boolean("protese"),
        detail("proteseTipo", "protese", 100, "Informe o tipo de prótese"),
        limited("outrasObservacoes", 500, "Campo deve ter no máximo 500 caracteres"),
    ]);
    fields
}

fn health_questionnaire() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::boolean("sofreDoenca"),
        detail("sofreDoencaQuais", "sofreDoenca", 200, "Informe quais doenças"),
        FieldDescriptor::boolean("tratamentoMedicoAtual"),
        FieldDescriptor::boolean("gravidez"),
        FieldDescriptor::boolean("usoMedicacao"),
        detail("usoMedicacaoQuais", "usoMedicacao", 200, "Informe quais medicações"),
        phone("medicoAssistenteTelefone"),
        FieldDescriptor::boolean("teveAlergia"),
        detail("teveAlergiaQuais", "teveAlergia", 200, "Informe quais alergias"),
        FieldDescriptor::boolean("foiOperado"),
        detail("foiOperadoQuais", "foiOperado", 200, "Informe quais cirurgias"),
        FieldDescriptor::boolean("problemasCicatrizacao"),
        FieldDescriptor::boolean("problemasAnestesia"),
        FieldDescriptor::boolean("problemasHemorragia"),
        limited("habitos", 500, "Campo deve ter no máximo 500 caracteres"),
        limited("antecedentesFamiliares", 500, "Campo deve ter no máximo 500 caracteres"),
    ]
}

/// Patient fields, with birth-date checks relative to `today`.
pub fn patient_registry(today: NaiveDate) -> ValidatorRegistry {
    let mut fields = identification(today);
    fields.extend(guardian());
    fields.extend(anamnesis());
    fields.extend(insurance());
    fields.extend(oral_inspection());
    fields.extend(health_questionnaire());
    ValidatorRegistry::new(fields)
}

pub fn patient_form(today: NaiveDate) -> FormStateController {
    FormStateController::new(patient_registry(today))
}
