//! Power-up entities and effect tables

use rand::Rng;

use crate::game::constants::{ARENA_HEIGHT, ARENA_WIDTH, POWER_UP_SIZE};
use crate::ws::protocol::{EffectKind, PowerUpKind};

impl PowerUpKind {
    /// All spawnable kinds, for uniform random selection
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::Health,
        PowerUpKind::Damage,
    ];

    /// The timed buff this kind grants, or None for instant effects
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            PowerUpKind::Speed => Some(EffectKind::Speed),
            PowerUpKind::Shield => Some(EffectKind::Shield),
            PowerUpKind::RapidFire => Some(EffectKind::RapidFire),
            PowerUpKind::Damage => Some(EffectKind::Damage),
            PowerUpKind::Health => None,
        }
    }

    /// Human-readable effect description sent with `powerUpCollected`
    pub fn describe(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Double movement speed for 10 seconds",
            PowerUpKind::Shield => "Bullets bounce off for 8 seconds",
            PowerUpKind::RapidFire => "Faster shooting for 7 seconds",
            PowerUpKind::Health => "Restores 50 health",
            PowerUpKind::Damage => "Double bullet damage for 12 seconds",
        }
    }
}

impl EffectKind {
    /// Buff duration in milliseconds
    pub fn duration_ms(self) -> u64 {
        match self {
            EffectKind::Speed => 10_000,
            EffectKind::Shield => 8_000,
            EffectKind::RapidFire => 7_000,
            EffectKind::Damage => 12_000,
        }
    }
}

/// Environmental pickup waiting on the arena floor
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: String,
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    /// Spawn timestamp (unix ms); uncollected power-ups expire 30s later
    pub spawned_at: u64,
}

impl PowerUp {
    /// Spawn a power-up of a uniformly chosen kind at a random in-bounds position
    pub fn spawn_random<R: Rng>(id: String, rng: &mut R, now: u64) -> Self {
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        Self {
            id,
            kind,
            x: rng.gen_range(0.0..=(ARENA_WIDTH - POWER_UP_SIZE)),
            y: rng.gen_range(0.0..=(ARENA_HEIGHT - POWER_UP_SIZE)),
            spawned_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn timed_kinds_map_to_effects() {
        assert_eq!(PowerUpKind::Speed.effect(), Some(EffectKind::Speed));
        assert_eq!(PowerUpKind::RapidFire.effect(), Some(EffectKind::RapidFire));
        assert_eq!(PowerUpKind::Health.effect(), None);
    }

    #[test]
    fn durations() {
        assert_eq!(EffectKind::Speed.duration_ms(), 10_000);
        assert_eq!(EffectKind::Shield.duration_ms(), 8_000);
        assert_eq!(EffectKind::RapidFire.duration_ms(), 7_000);
        assert_eq!(EffectKind::Damage.duration_ms(), 12_000);
    }

    #[test]
    fn random_spawn_is_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for i in 0..100 {
            let pu = PowerUp::spawn_random(format!("pu{}", i), &mut rng, 0);
            assert!(pu.x >= 0.0 && pu.x <= ARENA_WIDTH - POWER_UP_SIZE);
            assert!(pu.y >= 0.0 && pu.y <= ARENA_HEIGHT - POWER_UP_SIZE);
        }
    }
}
