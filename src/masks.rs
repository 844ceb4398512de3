//! Card and account number masking.
//!
//! Inputs are validated strictly: a card number must be exactly 16 ASCII
//! digits and an account number at least 4. Anything else is rejected with
//! [`PipelineError::InvalidFormat`] rather than masked on a best-effort basis.

use crate::error::{PipelineError, Result};

/// Number of digits in a card number.
pub const CARD_NUMBER_LEN: usize = 16;

/// Minimum number of digits in an account number.
pub const MIN_ACCOUNT_LEN: usize = 4;

const ACCOUNT_TOKENS: [&str; 2] = ["счет", "account"];

fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Masks a card number as `XXXX XX** **** XXXX`.
///
/// # Examples
///
/// ```
/// use bank_operations::masks::mask_card;
///
/// assert_eq!(mask_card("7000792289606361").unwrap(), "7000 79** **** 6361");
/// assert!(mask_card("700079228960636").is_err());
/// ```
pub fn mask_card(number: &str) -> Result<String> {
    if number.len() != CARD_NUMBER_LEN || !is_ascii_digits(number) {
        return Err(PipelineError::InvalidFormat {
            kind: "card",
            reason: format!("expected {} digits, got '{}'", CARD_NUMBER_LEN, number),
        });
    }

    Ok(format!(
        "{} {}** **** {}",
        &number[..4],
        &number[4..6],
        &number[12..]
    ))
}

/// Masks an account number as `**XXXX` (last four digits).
pub fn mask_account(number: &str) -> Result<String> {
    if number.len() < MIN_ACCOUNT_LEN || !is_ascii_digits(number) {
        return Err(PipelineError::InvalidFormat {
            kind: "account",
            reason: format!(
                "expected at least {} digits, got '{}'",
                MIN_ACCOUNT_LEN, number
            ),
        });
    }

    Ok(format!("**{}", &number[number.len() - 4..]))
}

/// Masks the trailing number of a labelled identifier such as
/// `Visa Platinum 7000792289606361` or `Счет 73654108430135874305`.
///
/// Identifiers mentioning "счет" or "account" (any case) are masked as
/// accounts, everything else as cards. Label words are kept and joined with
/// single spaces.
pub fn mask_identifier(raw: Option<&str>) -> Result<String> {
    let raw = raw.ok_or_else(|| PipelineError::MalformedInput("identifier is absent".into()))?;

    let mut parts: Vec<&str> = raw.split_whitespace().collect();
    let number = parts.pop().ok_or_else(|| {
        PipelineError::MalformedInput(format!("no number found in '{}'", raw))
    })?;

    let lowered = raw.to_lowercase();
    let masked = if ACCOUNT_TOKENS.iter().any(|t| lowered.contains(t)) {
        mask_account(number)?
    } else {
        mask_card(number)?
    };

    if parts.is_empty() {
        Ok(masked)
    } else {
        Ok(format!("{} {}", parts.join(" "), masked))
    }
}
