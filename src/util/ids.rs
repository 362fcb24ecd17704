//! Short entity id generation
//!
//! Bullets, power-ups and explosions are keyed by short random strings.
//! Ids only have to be unique within one process, so 8 alphanumeric chars
//! (~47 bits) is plenty.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated entity ids
pub const SHORT_ID_LEN: usize = 8;

/// Generate a short random id from the caller's RNG
pub fn short_id<R: Rng>(rng: &mut R) -> String {
    (0..SHORT_ID_LEN)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ids_are_short_and_alphanumeric() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let id = short_id(&mut rng);
        assert_eq!(id.len(), SHORT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_ids_differ() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = short_id(&mut rng);
        let b = short_id(&mut rng);
        assert_ne!(a, b);
    }
}
