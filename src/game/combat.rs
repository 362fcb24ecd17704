//! Combat system - bullets, cooldowns, damage

use uuid::Uuid;

use crate::game::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, BOOSTED_BULLET_COLOR, BOOSTED_BULLET_DAMAGE, BULLET_COLOR,
    BULLET_DAMAGE, BULLET_SIZE, BULLET_SPEED, RAPID_FIRE_COOLDOWN_MS, SHOT_COOLDOWN_MS,
    TANK_SIZE,
};

/// Active bullet in the arena
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: String,
    pub owner: Uuid,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub damage: i32,
    pub color: String,
}

impl Bullet {
    /// Spawn a bullet at the firing tank's center, travelling along `angle`.
    /// `boosted` applies the damage buff's damage and display color.
    pub fn fire(id: String, owner: Uuid, tank_x: f32, tank_y: f32, angle: f32, boosted: bool) -> Self {
        let (damage, color) = if boosted {
            (BOOSTED_BULLET_DAMAGE, BOOSTED_BULLET_COLOR)
        } else {
            (BULLET_DAMAGE, BULLET_COLOR)
        };
        Self {
            id,
            owner,
            x: tank_x + TANK_SIZE / 2.0 - BULLET_SIZE / 2.0,
            y: tank_y + TANK_SIZE / 2.0 - BULLET_SIZE / 2.0,
            dx: angle.cos() * BULLET_SPEED,
            dy: angle.sin() * BULLET_SPEED,
            damage,
            color: color.to_string(),
        }
    }

    /// Integrate position by one tick
    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    /// Whether the bullet has left the arena
    pub fn out_of_bounds(&self) -> bool {
        self.x < 0.0 || self.x > ARENA_WIDTH || self.y < 0.0 || self.y > ARENA_HEIGHT
    }
}

/// Combat helpers shared by the input handler and the tick loop
pub struct CombatSystem;

impl CombatSystem {
    /// Shot cooldown in effect for a player, by rapid-fire state
    pub fn cooldown_ms(rapid_fire: bool) -> u64 {
        if rapid_fire {
            RAPID_FIRE_COOLDOWN_MS
        } else {
            SHOT_COOLDOWN_MS
        }
    }

    /// Check whether a shot at `now` clears the cooldown window
    pub fn can_fire(last_shot_at: u64, now: u64, rapid_fire: bool) -> bool {
        now.saturating_sub(last_shot_at) >= Self::cooldown_ms(rapid_fire)
    }

    /// Apply damage to health, returns (new_health, is_dead)
    pub fn apply_damage(current_health: i32, damage: i32) -> (i32, bool) {
        let new_health = current_health - damage;
        (new_health, new_health <= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_spawns_at_tank_center() {
        let b = Bullet::fire("b1".into(), Uuid::new_v4(), 100.0, 100.0, 0.0, false);
        assert_eq!(b.x, 100.0 + TANK_SIZE / 2.0 - BULLET_SIZE / 2.0);
        assert_eq!(b.damage, BULLET_DAMAGE);
        assert_eq!(b.dx, BULLET_SPEED);
        assert!(b.dy.abs() < 1e-5);
    }

    #[test]
    fn boosted_bullet_damage_and_color() {
        let b = Bullet::fire("b1".into(), Uuid::new_v4(), 0.0, 0.0, 0.0, true);
        assert_eq!(b.damage, BOOSTED_BULLET_DAMAGE);
        assert_eq!(b.color, BOOSTED_BULLET_COLOR);
    }

    #[test]
    fn advance_and_bounds() {
        let mut b = Bullet::fire("b1".into(), Uuid::new_v4(), 0.0, 0.0, std::f32::consts::PI, false);
        assert!(!b.out_of_bounds());
        // Heading straight left, the bullet exits within a few ticks
        for _ in 0..3 {
            b.advance();
        }
        assert!(b.out_of_bounds());
    }

    #[test]
    fn cooldown_gating() {
        assert!(!CombatSystem::can_fire(1_000, 1_200, false));
        assert!(CombatSystem::can_fire(1_000, 1_300, false));
        assert!(CombatSystem::can_fire(1_000, 1_100, true));
        assert!(!CombatSystem::can_fire(1_000, 1_050, true));
        // First shot of a connection always clears
        assert!(CombatSystem::can_fire(0, 1_000, false));
    }

    #[test]
    fn damage_application() {
        assert_eq!(CombatSystem::apply_damage(100, 25), (75, false));
        assert_eq!(CombatSystem::apply_damage(20, 25), (-5, true));
        assert_eq!(CombatSystem::apply_damage(25, 25), (0, true));
    }
}
