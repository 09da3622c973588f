//! Field validation for alert records.
//!
//! One rule table keyed by [`ValidationMode`] drives both the report and
//! the edit flow. The two flows evolved separately in the field app and
//! their constraints differ (trimmed vs. raw lengths, regex vs.
//! length-only CEP check); the table keeps that divergence in one place
//! instead of two copies.

mod rules;

use std::collections::BTreeMap;

use alerta_protocol::{AlertField, AlertRecord};

pub use rules::{Constraint, FieldRule, rules};

/// Which rule set applies: the report form or the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Edit,
}

/// Per-field validation messages, keyed by field.
///
/// Empty set ⇔ the record is submit-eligible. Ordered (BTreeMap) so
/// rendering and tests see fields in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    entries: BTreeMap<AlertField, String>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, field: AlertField, message: String) {
        self.entries.insert(field, message);
    }

    /// Message for a field, if it currently fails.
    pub fn message(&self, field: AlertField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: AlertField) -> bool {
        self.entries.contains_key(&field)
    }

    /// Eagerly clears one field's entry (called on every keystroke for
    /// that field; the set is only recomputed wholesale on submit).
    pub fn clear(&mut self, field: AlertField) {
        self.entries.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (AlertField, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validates every field of `record` under the given mode.
///
/// Pure and deterministic. Every failing rule contributes exactly one
/// message keyed by its field; independent failures all surface at once,
/// nothing short-circuits.
pub fn validate(record: &AlertRecord, mode: ValidationMode) -> ValidationErrorSet {
    let mut errors = ValidationErrorSet::new();
    for rule in rules(mode) {
        let value = record.field(rule.field);
        if !rule.holds(value) {
            errors.insert(rule.field, rule.message.to_string());
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerta_protocol::Address;
    use pretty_assertions::assert_eq;

    fn valid_record() -> AlertRecord {
        AlertRecord {
            id: None,
            nome: "Incêndio".to_string(),
            descricao: "Fogo na mata próxima à escola".to_string(),
            endereco: Address {
                logradouro: "Rua A".to_string(),
                bairro: "Centro".to_string(),
                cidade: "Cidade X".to_string(),
                estado: "Estado Y".to_string(),
                cep: "12345-678".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_record_passes_create() {
        let errors = validate(&valid_record(), ValidationMode::Create);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_valid_record_passes_edit() {
        let errors = validate(&valid_record(), ValidationMode::Edit);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_nome_bounds_create() {
        let mut record = valid_record();
        for (value, ok) in [
            ("", false),
            ("abcd", false),
            ("abcde", true),
            ("a".repeat(24).as_str(), true),
            ("a".repeat(25).as_str(), false),
        ] {
            record.nome = value.to_string();
            let errors = validate(&record, ValidationMode::Create);
            assert_eq!(!errors.contains(AlertField::Nome), ok, "nome = {value:?}");
        }
    }

    #[test]
    fn test_nome_is_trimmed_in_create_mode() {
        let mut record = valid_record();
        record.nome = "  ab  ".to_string();
        let errors = validate(&record, ValidationMode::Create);
        assert_eq!(
            errors.message(AlertField::Nome),
            Some("O nome deve ter entre 5 e 24 caracteres.")
        );
    }

    #[test]
    fn test_descricao_bounds_create() {
        let mut record = valid_record();
        record.descricao = "curta".to_string();
        let errors = validate(&record, ValidationMode::Create);
        assert_eq!(
            errors.message(AlertField::Descricao),
            Some("A descrição deve ter entre 10 e 150 caracteres.")
        );

        record.descricao = "x".repeat(151);
        assert!(validate(&record, ValidationMode::Create).contains(AlertField::Descricao));

        record.descricao = "x".repeat(150);
        assert!(!validate(&record, ValidationMode::Create).contains(AlertField::Descricao));
    }

    #[test]
    fn test_address_fields_required_in_create_mode() {
        let mut record = valid_record();
        record.endereco.logradouro = "   ".to_string();
        record.endereco.bairro = String::new();
        let errors = validate(&record, ValidationMode::Create);
        assert_eq!(
            errors.message(AlertField::Logradouro),
            Some("O logradouro é obrigatório.")
        );
        assert_eq!(
            errors.message(AlertField::Bairro),
            Some("O bairro é obrigatório.")
        );
        assert!(!errors.contains(AlertField::Cidade));
    }

    #[test]
    fn test_cep_pattern_create() {
        let mut record = valid_record();
        for (cep, ok) in [
            ("12345-678", true),
            ("12345678", false),
            ("1234-5678", false),
            ("12345-67", false),
            ("12345-6789", false),
            ("abcde-fgh", false),
            ("", false),
        ] {
            record.endereco.cep = cep.to_string();
            let errors = validate(&record, ValidationMode::Create);
            assert_eq!(!errors.contains(AlertField::Cep), ok, "cep = {cep:?}");
        }
    }

    #[test]
    fn test_multiple_failures_surface_simultaneously() {
        let mut record = valid_record();
        record.nome = "ab".to_string();
        record.endereco.cep = "123".to_string();
        let errors = validate(&record, ValidationMode::Create);
        assert!(errors.contains(AlertField::Nome));
        assert!(errors.contains(AlertField::Cep));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_edit_mode_checks_cep_length_only() {
        let mut record = valid_record();
        // Not a valid pattern, but exactly 9 characters: edit accepts it.
        record.endereco.cep = "123456789".to_string();
        assert!(!validate(&record, ValidationMode::Edit).contains(AlertField::Cep));
        assert!(validate(&record, ValidationMode::Create).contains(AlertField::Cep));

        record.endereco.cep = "12345-67".to_string();
        let errors = validate(&record, ValidationMode::Edit);
        assert_eq!(
            errors.message(AlertField::Cep),
            Some("O CEP deve ter exatamente 9 caracteres (ex: 12345-678).")
        );
    }

    #[test]
    fn test_edit_mode_address_minimums() {
        let mut record = valid_record();
        record.endereco.logradouro = "Rua".to_string(); // 3 < 4
        record.endereco.bairro = "Ce".to_string(); // 2 < 3
        record.endereco.cidade = "Rio".to_string(); // 3 < 4
        record.endereco.estado = "Acre".to_string(); // 4 < 6
        let errors = validate(&record, ValidationMode::Edit);
        assert_eq!(
            errors.message(AlertField::Logradouro),
            Some("O logradouro deve ter no mínimo 4 caracteres.")
        );
        assert_eq!(
            errors.message(AlertField::Bairro),
            Some("O bairro deve ter no mínimo 3 caracteres.")
        );
        assert_eq!(
            errors.message(AlertField::Cidade),
            Some("A cidade deve ter no mínimo 4 caracteres.")
        );
        assert_eq!(
            errors.message(AlertField::Estado),
            Some("O estado deve ter entre 6 e 32 caracteres.")
        );
    }

    #[test]
    fn test_edit_mode_estado_upper_bound() {
        let mut record = valid_record();
        record.endereco.estado = "e".repeat(32);
        assert!(!validate(&record, ValidationMode::Edit).contains(AlertField::Estado));
        record.endereco.estado = "e".repeat(33);
        assert!(validate(&record, ValidationMode::Edit).contains(AlertField::Estado));
    }

    #[test]
    fn test_edit_mode_lengths_are_raw_not_trimmed() {
        // The edit flow measures the string as typed; padding counts.
        let mut record = valid_record();
        record.endereco.cidade = " Rio ".to_string(); // 5 raw chars, 3 trimmed
        assert!(!validate(&record, ValidationMode::Edit).contains(AlertField::Cidade));
    }

    #[test]
    fn test_error_set_eager_clear() {
        let mut record = valid_record();
        record.nome = "ab".to_string();
        let mut errors = validate(&record, ValidationMode::Create);
        assert!(errors.contains(AlertField::Nome));
        errors.clear(AlertField::Nome);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_is_deterministic() {
        let mut record = valid_record();
        record.nome = "ab".to_string();
        record.endereco.estado = " ".to_string();
        let first = validate(&record, ValidationMode::Create);
        let second = validate(&record, ValidationMode::Create);
        assert_eq!(first, second);
    }
}
