//! Referral codes and the points split for a successful referral.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Points paid to the referrer when their code is applied.
pub const REFERRER_POINTS: i32 = 100;

/// Points paid to the referee for applying a code.
pub const REFEREE_POINTS: i32 = 50;

/// Prefix on every generated referral code.
pub const CODE_PREFIX: &str = "PARK";

/// Length of the random suffix on referral codes.
const CODE_SUFFIX_LEN: usize = 8;

/// A random uppercase alphanumeric suffix of `len` characters.
pub fn random_code_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}

/// Generate a fresh referral code (`PARK` + 8 random characters).
/// Uniqueness is enforced by the database; on the vanishingly rare
/// collision the insert fails and the caller regenerates.
pub fn generate_code() -> String {
    format!("{CODE_PREFIX}{}", random_code_suffix(CODE_SUFFIX_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_prefix_and_length() {
        let code = generate_code();
        assert!(code.starts_with(CODE_PREFIX));
        assert_eq!(code.len(), CODE_PREFIX.len() + CODE_SUFFIX_LEN);
    }

    #[test]
    fn generated_codes_are_uppercase_alphanumeric() {
        let code = generate_code();
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn consecutive_codes_differ() {
        assert_ne!(generate_code(), generate_code());
    }
}
