//! Identifier allocation for new registrations.
//!
//! Nothing is persisted besides the records themselves: both the
//! registration number and the user ID counter are recomputed from the
//! highest values already on file, so hand-edited data files keep working.

use crate::domain::models::registration::{Registration, UserId};

pub const DEFAULT_USER_ID_PREFIX: &str = "DT";

const USER_ID_WIDTH: usize = 5;
const RADIX: u64 = 36;

#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: String,
}

impl IdAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// One past the highest registration number on file, starting at 1.
    pub fn next_registration_number(&self, existing: &[Registration]) -> u64 {
        existing
            .iter()
            .map(Registration::registration_number)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// One past the highest decoded user ID suffix, re-encoded with the prefix.
    pub fn next_user_id(&self, existing: &[Registration]) -> UserId {
        let max = existing
            .iter()
            .filter_map(|r| decode_suffix(r.user_id().as_str()))
            .max()
            .unwrap_or(0);
        UserId::new(format!("{}-{}", self.prefix, encode_base36(max + 1)))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID_PREFIX)
    }
}

/// Numeric value of the segment after the first `-`.
///
/// Reads leading base-36 digits and stops at the first character that is not
/// one, so `DT-0000Z` and `DT-0000Z?` both decode to 35.
fn decode_suffix(user_id: &str) -> Option<u64> {
    let segment = user_id.split('-').nth(1)?;
    let mut value: Option<u64> = None;
    for c in segment.chars() {
        let Some(digit) = c.to_digit(RADIX as u32) else {
            break;
        };
        value = Some(
            value
                .unwrap_or(0)
                .checked_mul(RADIX)?
                .checked_add(u64::from(digit))?,
        );
    }
    value
}

fn encode_base36(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        let digit = (value % RADIX) as u32;
        // from_digit never fails for digit < 36
        digits.push(
            std::char::from_digit(digit, RADIX as u32)
                .unwrap_or('0')
                .to_ascii_uppercase(),
        );
        value /= RADIX;
        if value == 0 {
            break;
        }
    }
    let encoded: String = digits.iter().rev().collect();
    format!("{encoded:0>width$}", width = USER_ID_WIDTH)
}
