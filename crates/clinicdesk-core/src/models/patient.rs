use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::value::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Masculino,
    Feminino,
    Outro,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Masculino => "MASCULINO",
            Sex::Feminino => "FEMININO",
            Sex::Outro => "OUTRO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Solteiro,
    Casado,
    Divorciado,
    Viuvo,
    UniaoEstavel,
}

/// Person responsible for the treatment, for minors and dependants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Guardian {
    #[serde(rename = "nomeResponsavel")]
    pub name: Option<String>,
    #[serde(rename = "rgResponsavel")]
    pub rg: Option<String>,
    #[serde(rename = "orgaoExpedidorResponsavel")]
    pub rg_issuer: Option<String>,
    #[serde(rename = "cpfResponsavel")]
    pub cpf: Option<String>,
    #[serde(rename = "estadoCivilResponsavel")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(rename = "conjugeResponsavel")]
    pub spouse_name: Option<String>,
    #[serde(rename = "rgConjuge")]
    pub spouse_rg: Option<String>,
    #[serde(rename = "orgaoExpedidorConjuge")]
    pub spouse_rg_issuer: Option<String>,
    #[serde(rename = "cpfConjuge")]
    pub spouse_cpf: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Anamnesis {
    #[serde(rename = "febreReumatica")]
    pub rheumatic_fever: Option<bool>,
    #[serde(rename = "hepatite")]
    pub hepatitis: Option<bool>,
    #[serde(rename = "diabetes")]
    pub diabetes: Option<bool>,
    #[serde(rename = "hipertensaoArterialSistemica")]
    pub hypertension: Option<bool>,
    #[serde(rename = "portadorHiv")]
    pub hiv: Option<bool>,
    #[serde(rename = "alteracaoCoagulacaoSanguinea")]
    pub coagulation_disorder: Option<bool>,
    #[serde(rename = "reacoesAlergicas")]
    pub allergic_reactions: Option<bool>,
    #[serde(rename = "doencasSistemicas")]
    pub systemic_diseases: Option<bool>,
    #[serde(rename = "internacaoRecente")]
    pub recent_hospitalization: Option<bool>,
    #[serde(rename = "utilizandoMedicacao")]
    pub taking_medication: Option<bool>,
    #[serde(rename = "fumante")]
    pub smoker: Option<bool>,
    #[serde(rename = "fumanteQuantidade")]
    pub smoking_amount: Option<String>,
    #[serde(rename = "tempoFumo")]
    pub smoking_duration: Option<String>,
    #[serde(rename = "bebidasAlcoolicas")]
    pub alcohol: Option<bool>,
    #[serde(rename = "problemasCardiacos")]
    pub heart_problems: Option<bool>,
    #[serde(rename = "problemasRenais")]
    pub kidney_problems: Option<bool>,
    #[serde(rename = "problemasGastricos")]
    pub gastric_problems: Option<bool>,
    #[serde(rename = "problemasRespiratorios")]
    pub respiratory_problems: Option<bool>,
    #[serde(rename = "problemasAlergicos")]
    pub allergic_problems: Option<bool>,
    #[serde(rename = "problemasAlergicosQuais")]
    pub allergic_problems_detail: Option<String>,
    #[serde(rename = "problemasArticularesOuReumatismo")]
    pub joint_problems: Option<bool>,
    #[serde(rename = "queixaPrincipal")]
    pub chief_complaint: Option<String>,
    #[serde(rename = "evolucaoDoencaAtual")]
    pub current_illness_history: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Insurance {
    #[serde(rename = "convenio")]
    pub provider: Option<String>,
    #[serde(rename = "numeroInscricao")]
    pub member_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct OralInspection {
    #[serde(rename = "lingua")]
    pub tongue: Option<String>,
    #[serde(rename = "mucosa")]
    pub mucosa: Option<String>,
    #[serde(rename = "palato")]
    pub palate: Option<String>,
    #[serde(rename = "labios")]
    pub lips: Option<String>,
    #[serde(rename = "gengivas")]
    pub gums: Option<String>,
    #[serde(rename = "nariz")]
    pub nose: Option<String>,
    #[serde(rename = "face")]
    pub face: Option<String>,
    #[serde(rename = "ganglios")]
    pub lymph_nodes: Option<String>,
    #[serde(rename = "glandulasSalivares")]
    pub salivary_glands: Option<String>,
    #[serde(rename = "alteracaoOclusao")]
    pub occlusion_change: Option<bool>,
    #[serde(rename = "alteracaoOclusaoTipo")]
    pub occlusion_change_type: Option<String>,
    #[serde(rename = "protese")]
    pub prosthesis: Option<bool>,
    #[serde(rename = "proteseTipo")]
    pub prosthesis_type: Option<String>,
    #[serde(rename = "outrasObservacoes")]
    pub other_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct HealthQuestionnaire {
    #[serde(rename = "sofreDoenca")]
    pub has_disease: Option<bool>,
    #[serde(rename = "sofreDoencaQuais")]
    pub diseases: Option<String>,
    #[serde(rename = "tratamentoMedicoAtual")]
    pub under_treatment: Option<bool>,
    #[serde(rename = "gravidez")]
    pub pregnancy: Option<bool>,
    #[serde(rename = "usoMedicacao")]
    pub uses_medication: Option<bool>,
    #[serde(rename = "usoMedicacaoQuais")]
    pub medications: Option<String>,
    #[serde(rename = "medicoAssistenteTelefone")]
    pub physician_phone: Option<String>,
    #[serde(rename = "teveAlergia")]
    pub had_allergy: Option<bool>,
    #[serde(rename = "teveAlergiaQuais")]
    pub allergies: Option<String>,
    #[serde(rename = "foiOperado")]
    pub had_surgery: Option<bool>,
    #[serde(rename = "foiOperadoQuais")]
    pub surgeries: Option<String>,
    #[serde(rename = "problemasCicatrizacao")]
    pub healing_problems: Option<bool>,
    #[serde(rename = "problemasAnestesia")]
    pub anesthesia_problems: Option<bool>,
    #[serde(rename = "problemasHemorragia")]
    pub bleeding_problems: Option<bool>,
    #[serde(rename = "habitos")]
    pub habits: Option<String>,
    #[serde(rename = "antecedentesFamiliares")]
    pub family_history: Option<String>,
}

/// Full patient record as returned by `GET /api/pacientes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "prontuarioNumero")]
    pub record_number: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub rg: Option<String>,
    #[serde(rename = "orgaoExpedidor")]
    pub rg_issuer: Option<String>,
    pub cpf: Option<String>,
    /// ISO date or date-time, as sent by the backend.
    #[serde(rename = "dataNascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "naturalidade")]
    pub birthplace: Option<String>,
    #[serde(rename = "nacionalidade")]
    pub nationality: Option<String>,
    #[serde(rename = "profissao")]
    pub occupation: Option<String>,
    #[serde(rename = "enderecoResidencial")]
    pub address: Option<String>,
    #[serde(rename = "indicadoPor")]
    pub referred_by: Option<String>,
    #[serde(rename = "sexo")]
    pub sex: Option<Sex>,
    pub status: Option<bool>,

    #[serde(flatten)]
    pub guardian: Guardian,
    #[serde(flatten)]
    pub anamnesis: Anamnesis,
    #[serde(flatten)]
    pub insurance: Insurance,
    #[serde(flatten)]
    pub oral_inspection: OralInspection,
    #[serde(flatten)]
    pub health: HealthQuestionnaire,

    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl Patient {
    /// Patients without an explicit status are treated as active.
    pub fn is_active(&self) -> bool {
        self.status.unwrap_or(true)
    }
}

/// Row of the lightweight patient list (`GET /api/pacientes/resumo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PatientSummary {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "criadoEm")]
    pub created_at: Option<String>,
    #[serde(rename = "prontuarioNumero")]
    pub record_number: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PatientStats {
    pub total: u64,
    #[serde(rename = "ativos")]
    pub active: u64,
    #[serde(rename = "inativos")]
    pub inactive: u64,
    #[serde(rename = "novosEsteMes")]
    pub new_this_month: u64,
}

fn opt_text(value: &Option<String>) -> FieldValue {
    value.clone().into()
}

impl Filterable for Patient {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => FieldValue::from(self.id),
            "prontuarioNumero" => opt_text(&self.record_number),
            "nome" => FieldValue::text(self.name.as_str()),
            "telefone" => opt_text(&self.phone),
            "rg" => opt_text(&self.rg),
            "cpf" => opt_text(&self.cpf),
            "dataNascimento" => opt_text(&self.birth_date),
            "naturalidade" => opt_text(&self.birthplace),
            "profissao" => opt_text(&self.occupation),
            "sexo" => self.sex.map(|s| s.as_str()).into(),
            "status" => FieldValue::Bool(self.is_active()),
            "nomeResponsavel" => opt_text(&self.guardian.name),
            "convenio" => opt_text(&self.insurance.provider),
            "createdAt" => opt_text(&self.created_at),
            _ => return None,
        };
        Some(value)
    }
}

impl Filterable for PatientSummary {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "nome" => FieldValue::text(self.name.as_str()),
            "cpf" => opt_text(&self.cpf),
            "dataNascimento" => opt_text(&self.birth_date),
            "criadoEm" => opt_text(&self.created_at),
            "prontuarioNumero" => FieldValue::text(self.record_number.as_str()),
            _ => return None,
        };
        Some(value)
    }
}
