//! Snapshot building for network transmission

use crate::game::world::ArenaWorld;
use crate::ws::protocol::{
    BulletSnapshot, ExplosionSnapshot, PlayerSnapshot, PowerUpSnapshot, WorldSnapshot,
};

/// Serialize the full live state of the arena. Broadcast unconditionally
/// every tick; also sent to individual sessions on connect and promotion.
pub fn build(world: &ArenaWorld) -> WorldSnapshot {
    let players = world
        .players
        .values()
        .map(|p| PlayerSnapshot {
            id: p.id,
            x: p.x,
            y: p.y,
            heading: p.heading,
            health: p.health,
            score: p.score,
            kills: p.kills,
            deaths: p.deaths,
            team: p.team,
            color: p.color.clone(),
            active_effects: p.active_effects.clone(),
        })
        .collect();

    let bullets = world
        .bullets
        .values()
        .map(|b| BulletSnapshot {
            id: b.id.clone(),
            owner_id: b.owner,
            x: b.x,
            y: b.y,
            color: b.color.clone(),
        })
        .collect();

    let power_ups = world
        .power_ups
        .values()
        .map(|pu| PowerUpSnapshot {
            id: pu.id.clone(),
            kind: pu.kind,
            x: pu.x,
            y: pu.y,
        })
        .collect();

    let explosions = world
        .explosions
        .values()
        .map(|e| ExplosionSnapshot {
            id: e.id.clone(),
            x: e.x,
            y: e.y,
            size: e.size,
        })
        .collect();

    WorldSnapshot {
        players,
        bullets,
        power_ups,
        explosions,
        leaderboard: world.leaderboard.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    #[test]
    fn snapshot_covers_all_stores() {
        let mut world = ArenaWorld::with_rng(ChaCha8Rng::seed_from_u64(3));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        world.handle_connect(a);
        world.handle_connect(b);
        world.handle_shoot(a, 0.0, 1_000);

        let snap = build(&world);
        assert_eq!(snap.players.len(), 2);
        assert_eq!(snap.bullets.len(), 1);
        assert_eq!(snap.bullets[0].owner_id, a);
        assert!(snap.power_ups.is_empty());
        assert!(snap.explosions.is_empty());
        assert_eq!(snap.leaderboard.len(), 2);
    }
}
