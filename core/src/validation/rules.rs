//! The mode-keyed rule tables.
//!
//! Lengths are measured in characters, not bytes, so accented Portuguese
//! input counts the way the user sees it.

use std::sync::LazyLock;

use alerta_protocol::AlertField;
use regex_lite::Regex;

#[allow(clippy::expect_used)]
static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("CEP pattern is valid"));

/// A single constraint on a single field.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    /// Trimmed character length within `[min, max]`.
    TrimmedLen { min: usize, max: usize },
    /// Raw (as-typed) character length within `[min, max]`; `max = None`
    /// means unbounded above.
    RawLen { min: usize, max: Option<usize> },
    /// Non-empty after trimming.
    RequiredTrimmed,
    /// Full match of `\d{5}-\d{3}`.
    CepPattern,
    /// Exact raw character length.
    ExactLen(usize),
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: AlertField,
    pub constraint: Constraint,
    /// User-facing message when the constraint fails.
    pub message: &'static str,
}

impl FieldRule {
    const fn new(field: AlertField, constraint: Constraint, message: &'static str) -> Self {
        Self {
            field,
            constraint,
            message,
        }
    }

    /// Whether `value` satisfies this rule.
    pub fn holds(&self, value: &str) -> bool {
        match self.constraint {
            Constraint::TrimmedLen { min, max } => {
                let len = value.trim().chars().count();
                (min..=max).contains(&len)
            }
            Constraint::RawLen { min, max } => {
                let len = value.chars().count();
                len >= min && max.is_none_or(|max| len <= max)
            }
            Constraint::RequiredTrimmed => !value.trim().is_empty(),
            Constraint::CepPattern => CEP_PATTERN.is_match(value),
            Constraint::ExactLen(expected) => value.chars().count() == expected,
        }
    }
}

/// Report-flow rules: trimmed length bounds, strict CEP pattern, address
/// fields merely required.
static CREATE_RULES: [FieldRule; 7] = [
    FieldRule::new(
        AlertField::Nome,
        Constraint::TrimmedLen { min: 5, max: 24 },
        "O nome deve ter entre 5 e 24 caracteres.",
    ),
    FieldRule::new(
        AlertField::Descricao,
        Constraint::TrimmedLen { min: 10, max: 150 },
        "A descrição deve ter entre 10 e 150 caracteres.",
    ),
    FieldRule::new(
        AlertField::Logradouro,
        Constraint::RequiredTrimmed,
        "O logradouro é obrigatório.",
    ),
    FieldRule::new(
        AlertField::Bairro,
        Constraint::RequiredTrimmed,
        "O bairro é obrigatório.",
    ),
    FieldRule::new(
        AlertField::Cidade,
        Constraint::RequiredTrimmed,
        "A cidade é obrigatória.",
    ),
    FieldRule::new(
        AlertField::Estado,
        Constraint::RequiredTrimmed,
        "O estado é obrigatório.",
    ),
    FieldRule::new(
        AlertField::Cep,
        Constraint::CepPattern,
        "CEP inválido. Use o formato 00000-000.",
    ),
];

/// Edit-flow rules: raw lengths, per-field minimums on the address, and a
/// length-only CEP check.
static EDIT_RULES: [FieldRule; 7] = [
    FieldRule::new(
        AlertField::Nome,
        Constraint::RawLen {
            min: 5,
            max: Some(24),
        },
        "O nome deve ter entre 5 e 24 caracteres.",
    ),
    FieldRule::new(
        AlertField::Descricao,
        Constraint::RawLen {
            min: 10,
            max: Some(150),
        },
        "A descrição deve ter entre 10 e 150 caracteres.",
    ),
    FieldRule::new(
        AlertField::Cep,
        Constraint::ExactLen(alerta_protocol::CEP_LEN),
        "O CEP deve ter exatamente 9 caracteres (ex: 12345-678).",
    ),
    FieldRule::new(
        AlertField::Logradouro,
        Constraint::RawLen { min: 4, max: None },
        "O logradouro deve ter no mínimo 4 caracteres.",
    ),
    FieldRule::new(
        AlertField::Bairro,
        Constraint::RawLen { min: 3, max: None },
        "O bairro deve ter no mínimo 3 caracteres.",
    ),
    FieldRule::new(
        AlertField::Cidade,
        Constraint::RawLen { min: 4, max: None },
        "A cidade deve ter no mínimo 4 caracteres.",
    ),
    FieldRule::new(
        AlertField::Estado,
        Constraint::RawLen {
            min: 6,
            max: Some(32),
        },
        "O estado deve ter entre 6 e 32 caracteres.",
    ),
];

/// The rule table for a mode.
pub fn rules(mode: super::ValidationMode) -> &'static [FieldRule] {
    match mode {
        super::ValidationMode::Create => &CREATE_RULES,
        super::ValidationMode::Edit => &EDIT_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationMode;

    #[test]
    fn test_every_field_has_a_rule_in_both_modes() {
        for mode in [ValidationMode::Create, ValidationMode::Edit] {
            let table = rules(mode);
            for field in AlertField::ALL {
                assert!(
                    table.iter().any(|r| r.field == field),
                    "{field} missing from {mode:?} table"
                );
            }
        }
    }

    #[test]
    fn test_cep_pattern_anchored() {
        assert!(CEP_PATTERN.is_match("12345-678"));
        assert!(!CEP_PATTERN.is_match("x12345-678"));
        assert!(!CEP_PATTERN.is_match("12345-678x"));
    }
}
