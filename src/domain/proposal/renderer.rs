//! Composes a record and a resolved style into a rendered document.
//!
//! Rendering is a pure function of its two inputs. Dates arrive already
//! formatted inside the record, so nothing here reads the clock or locale.

use super::document::{
    DocumentHeader, InfoField, RenderedDocument, Section, SectionBody, SectionKind,
    SignatureBlock, TermLine,
};
use super::formatting::{
    classify_clause, format_deadline, format_total_value, split_into_clauses, with_placeholder,
    ClauseEmphasis, BLANK, TERMS_BLANK,
};
use super::record::ProposalRecord;
use super::style::StylePresentation;

pub const DOCUMENT_TITLE: &str = "PROPOSTA COMERCIAL";
pub const STUDIO_NAME: &str = "Will Motion";
pub const STUDIO_TAGLINE: &str = "Creative Studio";
pub const TOTAL_VALUE_LABEL: &str = "Valor Total";
pub const SIGNATURE_LABEL: &str = "Assinatura do Cliente";
pub const VALIDITY_NOTE: &str = "Validade da proposta: 7 dias corridos.";

pub const LABEL_CLIENT: &str = "Cliente";
pub const LABEL_PROJECT: &str = "Projeto";
pub const LABEL_DATE: &str = "Data";
pub const LABEL_RESPONSIBLE: &str = "Responsável";

/// Renders the proposal.
///
/// Every section is always present, in fixed order. Missing data shows up
/// as placeholder text, never as a missing section.
pub fn render(record: &ProposalRecord, presentation: &StylePresentation) -> RenderedDocument {
    let sections = SectionKind::ORDER
        .iter()
        .map(|kind| Section {
            kind: *kind,
            body: render_body(*kind, record),
        })
        .collect();

    RenderedDocument {
        presentation: *presentation,
        header: DocumentHeader {
            title: DOCUMENT_TITLE.to_string(),
            studio: STUDIO_NAME.to_string(),
            tagline: STUDIO_TAGLINE.to_string(),
        },
        info: render_info(record),
        sections,
        signature: SignatureBlock {
            label: SIGNATURE_LABEL.to_string(),
            signer: with_placeholder(&record.client_name, BLANK),
        },
        validity_note: VALIDITY_NOTE.to_string(),
    }
}

fn render_info(record: &ProposalRecord) -> Vec<InfoField> {
    let field = |label: &str, value: String| InfoField {
        label: label.to_string(),
        value,
    };

    vec![
        field(LABEL_CLIENT, with_placeholder(&record.client_name, BLANK)),
        field(LABEL_PROJECT, with_placeholder(&record.project_name, BLANK)),
        // The issue date is shown verbatim, blank or not.
        field(LABEL_DATE, record.issue_date.clone()),
        field(
            LABEL_RESPONSIBLE,
            with_placeholder(&record.responsible_name, BLANK),
        ),
    ]
}

fn render_body(kind: SectionKind, record: &ProposalRecord) -> SectionBody {
    match kind {
        SectionKind::Objective => SectionBody::Paragraph {
            text: record.objective.clone(),
        },
        SectionKind::Scope => SectionBody::Rows {
            items: record.scope.clone(),
        },
        SectionKind::Deliverables => SectionBody::Rows {
            items: record.deliverables.clone(),
        },
        SectionKind::Deadline => SectionBody::Deadline {
            text: format_deadline(&record.deadline_days),
        },
        SectionKind::Revisions => SectionBody::Paragraph {
            text: record.revisions.clone(),
        },
        SectionKind::Investment => SectionBody::Investment {
            total_label: TOTAL_VALUE_LABEL.to_string(),
            total: format_total_value(&record.total_value),
            terms: render_payment_terms(&record.payment_terms),
        },
        SectionKind::NotIncluded => SectionBody::Rows {
            items: record.not_included.clone(),
        },
    }
}

fn render_payment_terms(terms: &str) -> Vec<TermLine> {
    if terms.is_empty() {
        return vec![TermLine {
            text: TERMS_BLANK.to_string(),
            emphasis: ClauseEmphasis::Normal,
        }];
    }

    split_into_clauses(terms)
        .into_iter()
        .map(|clause| TermLine {
            emphasis: classify_clause(&clause),
            text: clause,
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::record::{ListField, TextField};
    use crate::domain::proposal::style::{resolve_style, StyleVariant};

    fn modern() -> StylePresentation {
        resolve_style(StyleVariant::Modern)
    }

    fn seed() -> ProposalRecord {
        ProposalRecord::seed("19/10/2026")
    }

    // ───────────────────────────────────────────────────────────────
    // Structure
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn sections_render_in_fixed_order() {
        let doc = render(&seed(), &modern());
        let numbers: Vec<u8> = doc.sections.iter().map(Section::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        let kinds: Vec<SectionKind> = doc.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ORDER.to_vec());
    }

    #[test]
    fn empty_record_still_renders_every_section() {
        let doc = render(&ProposalRecord::default(), &modern());
        assert_eq!(doc.sections.len(), 7);
        for kind in [SectionKind::Scope, SectionKind::Deliverables, SectionKind::NotIncluded] {
            assert!(doc.section(kind).unwrap().rows().is_empty());
        }
        assert_eq!(doc.signature.signer, BLANK);
    }

    #[test]
    fn render_is_idempotent() {
        let record = seed().with_text(TextField::ClientName, "Acme");
        for variant in StyleVariant::ALL {
            let style = resolve_style(variant);
            assert_eq!(render(&record, &style), render(&record, &style));
        }
    }

    #[test]
    fn style_only_changes_presentation() {
        let record = seed();
        let modern = render(&record, &resolve_style(StyleVariant::Modern));
        let bold = render(&record, &resolve_style(StyleVariant::Bold));
        assert_ne!(modern.presentation, bold.presentation);
        assert_eq!(modern.sections, bold.sections);
        assert_eq!(modern.info, bold.info);
    }

    // ───────────────────────────────────────────────────────────────
    // Info grid and placeholders
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn empty_names_get_placeholders() {
        let doc = render(&ProposalRecord::default(), &modern());
        assert_eq!(doc.info_value(LABEL_CLIENT), Some(BLANK));
        assert_eq!(doc.info_value(LABEL_PROJECT), Some(BLANK));
        assert_eq!(doc.info_value(LABEL_RESPONSIBLE), Some(BLANK));
        assert_eq!(doc.info_value(LABEL_DATE), Some(""));
    }

    #[test]
    fn filled_names_render_verbatim() {
        let record = seed()
            .with_text(TextField::ClientName, "Acme")
            .with_text(TextField::ProjectName, "Animação de Logotipo");
        let doc = render(&record, &modern());
        assert_eq!(doc.info_value(LABEL_CLIENT), Some("Acme"));
        assert_eq!(doc.info_value(LABEL_PROJECT), Some("Animação de Logotipo"));
        assert_eq!(doc.info_value(LABEL_DATE), Some("19/10/2026"));
        assert_eq!(doc.signature.signer, "Acme");
    }

    #[test]
    fn empty_prose_renders_empty_not_placeholder() {
        let doc = render(&ProposalRecord::default(), &modern());
        let objective = doc.section(SectionKind::Objective).unwrap();
        assert_eq!(
            objective.body,
            SectionBody::Paragraph {
                text: String::new()
            }
        );
    }

    #[test]
    fn deadline_section_uses_formatted_days() {
        let doc = render(&seed().with_text(TextField::DeadlineDays, "10"), &modern());
        assert_eq!(
            doc.section(SectionKind::Deadline).unwrap().body,
            SectionBody::Deadline {
                text: "10 dias úteis".to_string()
            }
        );
    }

    // ───────────────────────────────────────────────────────────────
    // Lists
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn scope_rows_preserve_order() {
        let record = ProposalRecord::default().with_items_appended(
            ListField::Scope,
            ["x", "y", "z"].map(String::from),
        );
        let doc = render(&record, &modern());
        assert_eq!(doc.section(SectionKind::Scope).unwrap().rows(), ["x", "y", "z"]);
    }

    #[test]
    fn empty_list_rows_are_kept() {
        let record = ProposalRecord::default().with_item_appended(ListField::Deliverables);
        let doc = render(&record, &modern());
        assert_eq!(doc.section(SectionKind::Deliverables).unwrap().rows(), [""]);
    }

    // ───────────────────────────────────────────────────────────────
    // Investment
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn payment_terms_split_and_classified() {
        let record = seed().with_text(
            TextField::PaymentTerms,
            "Pagamento em dois atos. 5% de desconto à vista.",
        );
        let doc = render(&record, &modern());
        let SectionBody::Investment { terms, .. } = &doc.section(SectionKind::Investment).unwrap().body
        else {
            panic!("investment section has wrong body");
        };
        assert_eq!(
            terms,
            &vec![
                TermLine {
                    text: "Pagamento em dois atos.".to_string(),
                    emphasis: ClauseEmphasis::Normal
                },
                TermLine {
                    text: "5% de desconto à vista.".to_string(),
                    emphasis: ClauseEmphasis::Emphasized
                },
            ]
        );
    }

    #[test]
    fn empty_payment_terms_render_single_blank_line() {
        let doc = render(&ProposalRecord::default(), &modern());
        let SectionBody::Investment { total, terms, .. } =
            &doc.section(SectionKind::Investment).unwrap().body
        else {
            panic!("investment section has wrong body");
        };
        assert_eq!(total, "R$ _____,__");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].text, TERMS_BLANK);
    }

    #[test]
    fn total_value_gets_currency_prefix() {
        let doc = render(&seed().with_text(TextField::TotalValue, "3.200,00"), &modern());
        let SectionBody::Investment { total, .. } = &doc.section(SectionKind::Investment).unwrap().body
        else {
            panic!("investment section has wrong body");
        };
        assert_eq!(total, "R$ 3.200,00");
    }
}
