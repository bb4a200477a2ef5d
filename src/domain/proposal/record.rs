//! The proposal record and its copy-on-write edit operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suggested values for the project name field.
pub const PROJECT_TYPES: [&str; 4] = [
    "Animação de Logotipo",
    "Vídeo para Anúncio (Ads)",
    "Vídeo para Saas/Produto",
    "Vinheta/intro para Vídeo",
];

/// Name printed by the seed template as the responsible party.
pub const SEED_RESPONSIBLE: &str = "Will Motion";

/// Canonical content of one commercial proposal.
///
/// Every field is always present: absence is an empty string or an empty
/// list. Edits never mutate in place; each `with_*` method returns a new
/// record so a renderer holding the previous value is never affected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProposalRecord {
    pub client_name: String,
    pub project_name: String,
    pub responsible_name: String,
    /// Free-form, already locale formatted.
    #[serde(alias = "date")]
    pub issue_date: String,
    pub objective: String,
    pub scope: Vec<String>,
    pub deliverables: Vec<String>,
    pub not_included: Vec<String>,
    pub revisions: String,
    /// Numeric-looking, display only.
    #[serde(alias = "deadline")]
    pub deadline_days: String,
    /// Amount without currency symbol.
    pub total_value: String,
    pub payment_terms: String,
}

/// Single-valued text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextField {
    ClientName,
    ProjectName,
    ResponsibleName,
    IssueDate,
    Objective,
    Revisions,
    DeadlineDays,
    TotalValue,
    PaymentTerms,
}

impl TextField {
    pub const ALL: [TextField; 9] = [
        TextField::ClientName,
        TextField::ProjectName,
        TextField::ResponsibleName,
        TextField::IssueDate,
        TextField::Objective,
        TextField::Revisions,
        TextField::DeadlineDays,
        TextField::TotalValue,
        TextField::PaymentTerms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::ClientName => "client-name",
            TextField::ProjectName => "project-name",
            TextField::ResponsibleName => "responsible-name",
            TextField::IssueDate => "issue-date",
            TextField::Objective => "objective",
            TextField::Revisions => "revisions",
            TextField::DeadlineDays => "deadline-days",
            TextField::TotalValue => "total-value",
            TextField::PaymentTerms => "payment-terms",
        }
    }

    /// Section context handed to the refinement service, for the fields
    /// that carry prose worth refining.
    pub fn refinement_context(&self) -> Option<&'static str> {
        match self {
            TextField::Objective => Some("Objetivo de um projeto de motion design"),
            TextField::Revisions => Some("Política de revisões de um projeto de motion design"),
            TextField::PaymentTerms => Some("Condições de pagamento de uma proposta comercial"),
            _ => None,
        }
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TextField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| EditError::UnknownField(s.to_string()))
    }
}

/// Ordered list fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListField {
    Scope,
    Deliverables,
    NotIncluded,
}

impl ListField {
    pub const ALL: [ListField; 3] = [ListField::Scope, ListField::Deliverables, ListField::NotIncluded];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListField::Scope => "scope",
            ListField::Deliverables => "deliverables",
            ListField::NotIncluded => "not-included",
        }
    }
}

impl std::fmt::Display for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ListField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| EditError::UnknownField(s.to_string()))
    }
}

/// Errors raised by record edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{field} has no item at index {index} (length {len})")]
    IndexOutOfRange {
        field: ListField,
        index: usize,
        len: usize,
    },
}

impl ProposalRecord {
    /// The fixed starting template for a new proposal.
    pub fn seed(issue_date: impl Into<String>) -> Self {
        Self {
            client_name: String::new(),
            project_name: String::new(),
            responsible_name: SEED_RESPONSIBLE.to_string(),
            issue_date: issue_date.into(),
            objective: "O objetivo deste projeto é desenvolver uma animação que comunique de forma \
                        clara e profissional a identidade da marca, reforçando seus valores e \
                        gerando uma percepção positiva junto ao público-alvo."
                .to_string(),
            scope: strings(&[
                "Desenvolvimento de animação personalizada",
                "Duração aproximada definida em briefing",
                "Estilo visual alinhado às referências aprovadas",
                "Adaptação para os formatos necessários",
                "Até 2 rodadas de revisão incluídas",
            ]),
            deliverables: strings(&[
                "Arquivos finais em formatos adequados (MP4 / MOV)",
                "Versões otimizadas para as plataformas definidas",
                "Arquivos organizados e prontos para uso",
            ]),
            not_included: strings(&[
                "Alterações de escopo após aprovação",
                "Revisões adicionais",
                "Novos conceitos não previstos no briefing",
                "Trilha sonora, locução ou quaisquer outros elementos sonoros não estão inclusos \
                 neste projeto.",
            ]),
            revisions: "Estão incluídas até 2 rodadas de revisão. Revisões são consideradas \
                        ajustes sobre o conceito apresentado. Alterações de escopo serão orçadas \
                        separadamente."
                .to_string(),
            deadline_days: String::new(),
            total_value: String::new(),
            payment_terms: "50% na aprovação e 50% na entrega final. 5% de desconto em pagamento \
                            à vista."
                .to_string(),
        }
    }

    /// Returns the value of a text field.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::ClientName => &self.client_name,
            TextField::ProjectName => &self.project_name,
            TextField::ResponsibleName => &self.responsible_name,
            TextField::IssueDate => &self.issue_date,
            TextField::Objective => &self.objective,
            TextField::Revisions => &self.revisions,
            TextField::DeadlineDays => &self.deadline_days,
            TextField::TotalValue => &self.total_value,
            TextField::PaymentTerms => &self.payment_terms,
        }
    }

    /// Returns the items of a list field.
    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Scope => &self.scope,
            ListField::Deliverables => &self.deliverables,
            ListField::NotIncluded => &self.not_included,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::ClientName => &mut self.client_name,
            TextField::ProjectName => &mut self.project_name,
            TextField::ResponsibleName => &mut self.responsible_name,
            TextField::IssueDate => &mut self.issue_date,
            TextField::Objective => &mut self.objective,
            TextField::Revisions => &mut self.revisions,
            TextField::DeadlineDays => &mut self.deadline_days,
            TextField::TotalValue => &mut self.total_value,
            TextField::PaymentTerms => &mut self.payment_terms,
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Scope => &mut self.scope,
            ListField::Deliverables => &mut self.deliverables,
            ListField::NotIncluded => &mut self.not_included,
        }
    }

    /// Returns a copy with one text field replaced.
    pub fn with_text(&self, field: TextField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.text_mut(field) = value.into();
        next
    }

    /// Returns a copy with one list item replaced.
    pub fn with_list_item(
        &self,
        field: ListField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<Self, EditError> {
        let mut next = self.clone();
        let len = next.list(field).len();
        let slot = next
            .list_mut(field)
            .get_mut(index)
            .ok_or(EditError::IndexOutOfRange { field, index, len })?;
        *slot = value.into();
        Ok(next)
    }

    /// Returns a copy with an empty placeholder row appended to a list.
    pub fn with_item_appended(&self, field: ListField) -> Self {
        self.with_items_appended(field, [String::new()])
    }

    /// Returns a copy with the given items appended to a list, in order.
    pub fn with_items_appended<I>(&self, field: ListField, items: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut next = self.clone();
        next.list_mut(field).extend(items);
        next
    }

    /// Returns a copy with a list replaced wholesale.
    pub fn with_list(&self, field: ListField, items: Vec<String>) -> Self {
        let mut next = self.clone();
        *next.list_mut(field) = items;
        next
    }

    /// Returns a copy with one list item removed.
    pub fn without_item(&self, field: ListField, index: usize) -> Result<Self, EditError> {
        let len = self.list(field).len();
        if index >= len {
            return Err(EditError::IndexOutOfRange { field, index, len });
        }
        let mut next = self.clone();
        next.list_mut(field).remove(index);
        Ok(next)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
