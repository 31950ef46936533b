//! One-time code generation and comparison

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

/// Upper bound (exclusive) for a 4-digit code
const CODE_SPACE: u32 = 10_000;

/// Generate a uniformly distributed, zero-padded 4-digit code
pub fn generate_code() -> String {
    format!("{:04}", OsRng.gen_range(0..CODE_SPACE))
}

/// Compare a submitted code with the stored one in constant time
pub fn codes_match(submitted: &str, stored: &str) -> bool {
    constant_time_eq(submitted.as_bytes(), stored.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ak_shared::validation::is_valid_code;

    #[test]
    fn test_generated_codes_are_four_digits() {
        for _ in 0..1_000 {
            let code = generate_code();
            assert!(is_valid_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn test_digit_distribution_is_uniform() {
        const DRAWS: usize = 20_000;
        let mut counts = [[0usize; 10]; 4];

        for _ in 0..DRAWS {
            for (position, digit) in generate_code().bytes().enumerate() {
                counts[position][(digit - b'0') as usize] += 1;
            }
        }

        // 9 degrees of freedom, critical value at p = 0.001
        let expected = DRAWS as f64 / 10.0;
        for position in counts.iter() {
            let chi_square: f64 = position
                .iter()
                .map(|&observed| {
                    let diff = observed as f64 - expected;
                    diff * diff / expected
                })
                .sum();
            assert!(chi_square < 27.88, "chi-square {chi_square} too high");
        }
    }

    #[test]
    fn test_codes_match() {
        assert!(codes_match("1234", "1234"));
        assert!(!codes_match("1234", "1235"));
        assert!(!codes_match("123", "1234"));
        assert!(!codes_match("", "1234"));
    }
}
