//! Random password generation from a letters/digits/punctuation pool.

use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::VaultError;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const PUNCTUATION: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// The characters a password may be drawn from.
pub fn charset(include_symbols: bool) -> Vec<u8> {
    let mut pool = Vec::with_capacity(LETTERS.len() + DIGITS.len() + PUNCTUATION.len());
    pool.extend_from_slice(LETTERS);
    pool.extend_from_slice(DIGITS);
    if include_symbols {
        pool.extend_from_slice(PUNCTUATION);
    }
    pool
}

#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    default_length: usize,
    max_length: usize,
}

impl PasswordGenerator {
    pub fn new(cfg: &GeneratorConfig) -> Self {
        Self {
            default_length: cfg.default_length,
            max_length: cfg.max_length,
        }
    }

    /// Generate with the thread-local CSPRNG. `None` means the default length.
    pub fn generate(
        &self,
        length: Option<i64>,
        include_symbols: bool,
    ) -> Result<String, VaultError> {
        self.generate_with(&mut rand::rng(), length, include_symbols)
    }

    /// Each character is drawn independently and uniformly from the pool.
    pub fn generate_with<R: Rng>(
        &self,
        rng: &mut R,
        length: Option<i64>,
        include_symbols: bool,
    ) -> Result<String, VaultError> {
        let length = self.resolve_length(length)?;
        let pool = charset(include_symbols);
        let password: String = (0..length)
            .map(|_| pool[rng.random_range(0..pool.len())] as char)
            .collect();
        Ok(password)
    }

    /// The configured default goes through the same bounds as explicit lengths.
    fn resolve_length(&self, length: Option<i64>) -> Result<usize, VaultError> {
        let length = length
            .unwrap_or_else(|| i64::try_from(self.default_length).unwrap_or(i64::MAX));
        if length <= 0 {
            return Err(VaultError::InvalidArgument(format!(
                "password length must be positive, got {length}"
            )));
        }
        let length = usize::try_from(length).unwrap_or(usize::MAX);
        if length > self.max_length {
            return Err(VaultError::InvalidArgument(format!(
                "password length must not exceed {}",
                self.max_length
            )));
        }
        Ok(length)
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn pool_sizes() {
        assert_eq!(charset(false).len(), 62);
        assert_eq!(charset(true).len(), 94);
        assert!(charset(true).iter().all(|c| c.is_ascii_graphic()));
    }

    #[test]
    fn exact_length_and_pool_membership() {
        let generator = PasswordGenerator::default();
        for include_symbols in [false, true] {
            let pool = charset(include_symbols);
            for length in [1, 2, 12, 16, 64, 1024] {
                let pw = generator.generate(Some(length), include_symbols).unwrap();
                assert_eq!(pw.chars().count(), length as usize);
                assert!(pw.bytes().all(|b| pool.contains(&b)), "{pw}");
            }
        }
    }

    #[test]
    fn without_symbols_only_alphanumerics() {
        let generator = PasswordGenerator::default();
        let pw = generator.generate(Some(500), false).unwrap();
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn default_length_is_twelve() {
        let generator = PasswordGenerator::default();
        assert_eq!(generator.generate(None, true).unwrap().len(), 12);
    }

    #[test]
    fn non_positive_length_is_rejected() {
        let generator = PasswordGenerator::default();
        for length in [0, -1, i64::MIN] {
            let err = generator.generate(Some(length), false).unwrap_err();
            assert!(matches!(err, VaultError::InvalidArgument(_)));
        }
    }

    #[test]
    fn over_max_length_is_rejected() {
        let generator = PasswordGenerator::new(&GeneratorConfig {
            default_length: 12,
            max_length: 32,
        });
        assert!(generator.generate(Some(32), true).is_ok());
        assert!(matches!(
            generator.generate(Some(33), true),
            Err(VaultError::InvalidArgument(_))
        ));
        assert!(matches!(
            generator.generate(Some(i64::MAX), true),
            Err(VaultError::InvalidArgument(_))
        ));
    }

    #[test]
    fn misconfigured_default_length_is_rejected() {
        let empty = PasswordGenerator::new(&GeneratorConfig {
            default_length: 0,
            max_length: 1024,
        });
        assert!(matches!(
            empty.generate(None, true),
            Err(VaultError::InvalidArgument(_))
        ));

        let oversized = PasswordGenerator::new(&GeneratorConfig {
            default_length: 5000,
            max_length: 1024,
        });
        assert!(matches!(
            oversized.generate(None, true),
            Err(VaultError::InvalidArgument(_))
        ));
        assert_eq!(oversized.generate(Some(8), false).unwrap().len(), 8);
    }

    #[test]
    fn character_frequencies_are_uniform() {
        let generator = PasswordGenerator::new(&GeneratorConfig {
            default_length: 12,
            max_length: 1024,
        });
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let pool = charset(true);

        let mut counts: HashMap<char, u64> = HashMap::new();
        let mut total = 0u64;
        for _ in 0..100 {
            let pw = generator.generate_with(&mut rng, Some(1000), true).unwrap();
            for c in pw.chars() {
                *counts.entry(c).or_default() += 1;
                total += 1;
            }
        }
        assert_eq!(total, 100_000);
        assert_eq!(counts.len(), pool.len(), "every pool character appears");

        let expected = total as f64 / pool.len() as f64;
        let chi_square: f64 = pool
            .iter()
            .map(|&b| {
                let observed = *counts.get(&(b as char)).unwrap_or(&0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();

        // 93 degrees of freedom; the 0.999 quantile is about 140.9.
        assert!(chi_square < 140.9, "chi-square {chi_square} too large");
    }
}
