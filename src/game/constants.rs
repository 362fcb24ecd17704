//! Gameplay constants, fixed at process start

/// Arena width in world units
pub const ARENA_WIDTH: f32 = 1600.0;
/// Arena height in world units
pub const ARENA_HEIGHT: f32 = 900.0;

/// Tank bounding box side length
pub const TANK_SIZE: f32 = 40.0;
/// Distance a tank moves per full-intent move message
pub const TANK_BASE_SPEED: f32 = 5.0;
/// Movement multiplier while the speed buff is active
pub const SPEED_BOOST_MULTIPLIER: f32 = 2.0;

/// Maximum occupied seats; further connections spectate
pub const MAX_PLAYERS: usize = 8;
/// Maximum (and respawn) player health
pub const MAX_HEALTH: i32 = 100;

/// Bullet bounding box side length
pub const BULLET_SIZE: f32 = 8.0;
/// Distance a bullet travels per tick
pub const BULLET_SPEED: f32 = 10.0;
/// Base bullet damage
pub const BULLET_DAMAGE: i32 = 25;
/// Bullet damage while the damage buff is active
pub const BOOSTED_BULLET_DAMAGE: i32 = 50;
/// Normal shot cooldown
pub const SHOT_COOLDOWN_MS: u64 = 300;
/// Shot cooldown while rapid fire is active
pub const RAPID_FIRE_COOLDOWN_MS: u64 = 100;

/// Power-up pickup box side length
pub const POWER_UP_SIZE: f32 = 30.0;
/// Maximum concurrently alive power-ups
pub const MAX_POWER_UPS: usize = 5;
/// Per-tick probability of spawning a power-up (when under cap)
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.02;
/// Uncollected power-ups expire after this long
pub const POWER_UP_LIFETIME_MS: u64 = 30_000;
/// Health power-up instant heal amount
pub const HEAL_AMOUNT: i32 = 50;

/// Cosmetic explosion lifetime
pub const EXPLOSION_LIFETIME_MS: u64 = 500;
/// Explosion render size for a normal hit / shield absorb
pub const EXPLOSION_SIZE_SMALL: f32 = 30.0;
/// Explosion render size for a kill
pub const EXPLOSION_SIZE_LARGE: f32 = 60.0;

/// Score awarded to the attacker per kill
pub const KILL_SCORE: u32 = 2;
/// Leaderboard entries kept
pub const LEADERBOARD_SIZE: usize = 10;

/// Display colors assigned to tanks, indexed deterministically by session id
pub const TANK_COLORS: [&str; 8] = [
    "#4fc3f7", "#ef5350", "#66bb6a", "#ffb74d", "#ba68c8", "#fff176", "#f06292", "#4db6ac",
];

/// Display color for normal bullets
pub const BULLET_COLOR: &str = "#ffeb3b";
/// Display color for damage-boosted bullets
pub const BOOSTED_BULLET_COLOR: &str = "#ff5722";
