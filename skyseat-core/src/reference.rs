use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::booking::BookingReference;
use crate::repository::BookingRepository;
use crate::{SeatingError, SeatingResult};

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const REFERENCE_LENGTH: usize = 8;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Draws random booking references and retries until the store has no record of one.
pub struct ReferenceGenerator {
    rng: Box<dyn RngCore + Send>,
    max_attempts: u32,
}

impl ReferenceGenerator {
    pub fn new(max_attempts: u32) -> Self {
        Self::with_rng(StdRng::from_entropy(), max_attempts)
    }

    /// Reproducible sequence, for tests and demos.
    pub fn seeded(seed: u64, max_attempts: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), max_attempts)
    }

    pub fn with_rng(rng: impl RngCore + Send + 'static, max_attempts: u32) -> Self {
        Self {
            rng: Box::new(rng),
            max_attempts,
        }
    }

    /// A single candidate, not checked against anything.
    pub fn candidate(&mut self) -> BookingReference {
        let value: String = (0..REFERENCE_LENGTH)
            .map(|_| CHARSET[self.rng.gen_range(0..CHARSET.len())] as char)
            .collect();
        BookingReference::from(value)
    }

    pub async fn generate_unique(
        &mut self,
        repository: &dyn BookingRepository,
    ) -> SeatingResult<BookingReference> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.candidate();
            let taken = repository
                .reference_exists(candidate.as_str())
                .await
                .map_err(SeatingError::Persistence)?;

            if !taken {
                return Ok(candidate);
            }
            debug!("Reference {} already taken (attempt {})", candidate, attempt);
        }

        Err(SeatingError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingRecord, PassengerDetails};
    use crate::memory_repo::InMemoryBookingRepository;
    use crate::seat::SeatId;

    fn is_well_formed(reference: &BookingReference) -> bool {
        reference.as_str().len() == REFERENCE_LENGTH
            && reference
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }

    #[test]
    fn test_candidates_are_uppercase_alphanumeric() {
        let mut generator = ReferenceGenerator::seeded(7, DEFAULT_MAX_ATTEMPTS);
        for _ in 0..200 {
            assert!(is_well_formed(&generator.candidate()));
        }
    }

    #[tokio::test]
    async fn test_collision_is_retried() {
        let repo = InMemoryBookingRepository::new();

        // Same seed, so the first draw below collides with this one
        let taken = ReferenceGenerator::seeded(42, 1).candidate();
        let passenger = PassengerDetails::new("P1", "Ada", "Lovelace").unwrap();
        repo.seed(vec![BookingRecord::new(taken.clone(), passenger, SeatId::new(1, 'A'))])
            .await;

        let mut generator = ReferenceGenerator::seeded(42, 5);
        let reference = generator.generate_unique(&repo).await.unwrap();
        assert_ne!(reference, taken);
        assert!(is_well_formed(&reference));
    }

    #[tokio::test]
    async fn test_zero_attempts_is_exhausted() {
        let repo = InMemoryBookingRepository::new();
        let mut generator = ReferenceGenerator::seeded(1, 0);

        let err = generator.generate_unique(&repo).await.unwrap_err();
        assert!(matches!(err, SeatingError::GenerationExhausted { attempts: 0 }));
    }
}
