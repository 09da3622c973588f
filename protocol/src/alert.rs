//! Alert record and address entities.
//!
//! Field names match the remote collection's JSON schema (`/denuncias`),
//! which uses Brazilian postal terminology.

use serde::{Deserialize, Serialize};

/// Postal address attached to an alert record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line (rua/avenida).
    pub logradouro: String,
    /// Neighborhood.
    pub bairro: String,
    /// City.
    pub cidade: String,
    /// State, written out (not the two-letter UF code).
    pub estado: String,
    /// Postal code in `00000-000` form once submitted.
    pub cep: String,
}

/// A user-submitted incident report tied to an address.
///
/// `id` is absent on a draft, assigned by the server on first successful
/// creation, and immutable thereafter. Drafts serialize without an `id`
/// key at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reporter name.
    pub nome: String,
    /// Free-text incident description.
    pub descricao: String,
    /// Where the incident happened.
    pub endereco: Address,
}

impl AlertRecord {
    /// Whether the record has been confirmed by the server.
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Read a field by its enum key.
    pub fn field(&self, field: AlertField) -> &str {
        match field {
            AlertField::Nome => &self.nome,
            AlertField::Descricao => &self.descricao,
            AlertField::Logradouro => &self.endereco.logradouro,
            AlertField::Bairro => &self.endereco.bairro,
            AlertField::Cidade => &self.endereco.cidade,
            AlertField::Estado => &self.endereco.estado,
            AlertField::Cep => &self.endereco.cep,
        }
    }

    /// Write a field by its enum key.
    pub fn set_field(&mut self, field: AlertField, value: String) {
        match field {
            AlertField::Nome => self.nome = value,
            AlertField::Descricao => self.descricao = value,
            AlertField::Logradouro => self.endereco.logradouro = value,
            AlertField::Bairro => self.endereco.bairro = value,
            AlertField::Cidade => self.endereco.cidade = value,
            AlertField::Estado => self.endereco.estado = value,
            AlertField::Cep => self.endereco.cep = value,
        }
    }
}

/// Fixed set of validatable fields on an alert record.
///
/// Replaces the stringly-typed field keys the validator, error set and
/// per-field mutators would otherwise each spell out independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlertField {
    Nome,
    Descricao,
    Logradouro,
    Bairro,
    Cidade,
    Estado,
    Cep,
}

impl AlertField {
    /// All fields, in form order.
    pub const ALL: [AlertField; 7] = [
        AlertField::Nome,
        AlertField::Descricao,
        AlertField::Logradouro,
        AlertField::Bairro,
        AlertField::Cidade,
        AlertField::Estado,
        AlertField::Cep,
    ];

    /// Wire/UI name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertField::Nome => "nome",
            AlertField::Descricao => "descricao",
            AlertField::Logradouro => "logradouro",
            AlertField::Bairro => "bairro",
            AlertField::Cidade => "cidade",
            AlertField::Estado => "estado",
            AlertField::Cep => "cep",
        }
    }
}

impl std::fmt::Display for AlertField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
