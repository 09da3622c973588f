//! Shared wire types for the alerta client.
//!
//! Pure data: the alert record, its address sub-entity, the fixed field
//! enum used by the validator and error set, and the postal-code mask
//! transforms. No I/O and no async in this crate.

pub mod alert;
pub mod cep;

pub use alert::{Address, AlertField, AlertRecord};
pub use cep::{CEP_LEN, mask_cep, mask_cep_edit};
