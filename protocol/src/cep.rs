//! Postal-code (CEP) input masks.
//!
//! Two independent transforms, matching the two entry flows: the report
//! form re-derives the mask from digits on every keystroke, while the
//! edit form only clamps what the user already typed. Both are
//! idempotent, so they can be re-applied on every mutation.

/// Length of a fully masked CEP, hyphen included (`12345-678`).
pub const CEP_LEN: usize = 9;

/// Masks raw CEP input for the report flow.
///
/// Strips everything that is not a digit, truncates to 8 digits, and
/// inserts the hyphen after the 5th digit once more than 5 are present.
pub fn mask_cep(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();
    if digits.len() > 5 {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

/// Masks CEP input for the edit flow.
///
/// Keeps the text as typed (an existing hyphen is preserved wherever it
/// is) and clamps the total length to [`CEP_LEN`] characters. No digit
/// re-grouping happens here; the edit validator only checks length.
pub fn mask_cep_edit(raw: &str) -> String {
    raw.chars().take(CEP_LEN).collect()
}
