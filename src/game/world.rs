//! Arena state and the authoritative simulation
//!
//! `ArenaWorld` owns every entity store. All mutation happens through the
//! handlers below, invoked one at a time by the arena task, so the
//! simulation is a plain function of (state, now) with no interior locking.

use std::collections::{HashMap, VecDeque};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::game::combat::{Bullet, CombatSystem};
use crate::game::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, BULLET_SIZE, EXPLOSION_LIFETIME_MS, EXPLOSION_SIZE_LARGE,
    EXPLOSION_SIZE_SMALL, HEAL_AMOUNT, KILL_SCORE, MAX_HEALTH, MAX_PLAYERS, MAX_POWER_UPS,
    POWER_UP_LIFETIME_MS, POWER_UP_SIZE, POWER_UP_SPAWN_CHANCE, SPEED_BOOST_MULTIPLIER,
    TANK_BASE_SPEED, TANK_COLORS, TANK_SIZE,
};
use crate::game::geometry::aabb_overlap;
use crate::game::powerups::PowerUp;
use crate::game::{display_name, leaderboard, snapshot, Outbound};
use crate::util::ids::short_id;
use crate::ws::protocol::{EffectKind, ServerMsg, Team};

/// Authoritative per-seat player state
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub id: Uuid,
    pub x: f32,
    pub y: f32,
    /// Client-reported aim angle in radians (trusted, display only)
    pub heading: f32,
    pub health: i32,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
    /// Active buffs as absolute expiry timestamps (unix ms)
    pub active_effects: HashMap<EffectKind, u64>,
    /// Timestamp of the most recent accepted shot
    pub last_shot_at: u64,
    pub team: Team,
    pub color: String,
}

impl PlayerState {
    pub fn new(id: Uuid, x: f32, y: f32, team: Team) -> Self {
        // Color is derived from the id so it survives respawns
        let color = TANK_COLORS[id.as_bytes()[0] as usize % TANK_COLORS.len()];
        Self {
            id,
            x,
            y,
            heading: 0.0,
            health: MAX_HEALTH,
            score: 0,
            kills: 0,
            deaths: 0,
            active_effects: HashMap::new(),
            last_shot_at: 0,
            team,
            color: color.to_string(),
        }
    }

    /// An effect is active iff its stored expiry is strictly in the future
    pub fn effect_active(&self, kind: EffectKind, now: u64) -> bool {
        self.active_effects.get(&kind).is_some_and(|&exp| exp > now)
    }

    #[cfg(test)]
    pub(crate) fn stub() -> Self {
        Self::new(Uuid::new_v4(), 0.0, 0.0, Team::Red)
    }
}

/// Cosmetic explosion tracked server-side for client rendering
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub created_at: u64,
}

/// The arena: entity stores plus the RNG driving spawns and ids
pub struct ArenaWorld {
    pub(crate) players: HashMap<Uuid, PlayerState>,
    pub(crate) bullets: HashMap<String, Bullet>,
    pub(crate) power_ups: HashMap<String, PowerUp>,
    pub(crate) explosions: HashMap<String, Explosion>,
    /// FIFO promotion queue; never overlaps the player store
    pub(crate) spectators: VecDeque<Uuid>,
    /// Derived top-10 view, recomputed on kills and membership changes
    pub(crate) leaderboard: Vec<crate::ws::protocol::LeaderboardEntry>,
    pub(crate) rng: ChaCha8Rng,
}

impl ArenaWorld {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            players: HashMap::new(),
            bullets: HashMap::new(),
            power_ups: HashMap::new(),
            explosions: HashMap::new(),
            spectators: VecDeque::new(),
            leaderboard: Vec::new(),
            rng,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn spectator_count(&self) -> usize {
        self.spectators.len()
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    /// Seat a new session, or queue it as a spectator when at capacity
    pub fn handle_connect(&mut self, session_id: Uuid) -> Vec<Outbound> {
        if self.players.contains_key(&session_id) || self.spectators.contains(&session_id) {
            warn!(session_id = %session_id, "Duplicate connect signal ignored");
            return Vec::new();
        }

        let mut out = Vec::new();

        if self.players.len() >= MAX_PLAYERS {
            self.spectators.push_back(session_id);
            let position = self.spectators.len();
            info!(session_id = %session_id, position, "Arena full, session spectating");

            out.push(Outbound::one(
                session_id,
                ServerMsg::GameFull {
                    message: format!(
                        "Game is full! You are spectator #{} in the queue.",
                        position
                    ),
                    is_spectator: true,
                },
            ));
            out.push(Outbound::one(
                session_id,
                ServerMsg::GameState {
                    snapshot: snapshot::build(self),
                    is_spectator: true,
                },
            ));
            return out;
        }

        self.create_player(session_id);
        self.leaderboard = leaderboard::rank(&self.players);
        info!(session_id = %session_id, player_count = self.players.len(), "Player joined");

        out.push(Outbound::one(
            session_id,
            ServerMsg::GameState {
                snapshot: snapshot::build(self),
                is_spectator: false,
            },
        ));
        out.push(Outbound::all(ServerMsg::PlayerJoined {
            player_count: self.players.len(),
        }));
        out
    }

    /// Tear down a departed session. Idempotent: repeated or out-of-order
    /// disconnect signals for the same id are no-ops.
    pub fn handle_disconnect(&mut self, session_id: Uuid) -> Vec<Outbound> {
        let was_player = self.players.remove(&session_id).is_some();
        let was_spectator = match self.spectators.iter().position(|s| *s == session_id) {
            Some(pos) => {
                self.spectators.remove(pos);
                true
            }
            None => false,
        };

        if !was_player && !was_spectator {
            debug!(session_id = %session_id, "Disconnect for unknown session ignored");
            return Vec::new();
        }

        // Cascade: a bullet's owner must always reference a live player
        self.bullets.retain(|_, b| b.owner != session_id);

        let mut out = Vec::new();

        if was_player {
            let promoted = self.spectators.pop_front();
            if let Some(next) = promoted {
                self.create_player(next);
                info!(session_id = %next, "Spectator promoted to player");
            }
            self.leaderboard = leaderboard::rank(&self.players);

            if let Some(next) = promoted {
                out.push(Outbound::one(
                    next,
                    ServerMsg::PromotedToPlayer {
                        message: "A slot opened up - you're in!".to_string(),
                        is_spectator: false,
                    },
                ));
                out.push(Outbound::one(
                    next,
                    ServerMsg::GameState {
                        snapshot: snapshot::build(self),
                        is_spectator: false,
                    },
                ));
                out.push(Outbound::all(ServerMsg::PlayerJoined {
                    player_count: self.players.len(),
                }));
            }
        }

        info!(
            session_id = %session_id,
            player_count = self.players.len(),
            spectator_count = self.spectators.len(),
            "Session disconnected"
        );

        out.push(Outbound::all(ServerMsg::PlayerCountUpdate {
            player_count: self.players.len(),
            spectator_count: self.spectators.len(),
        }));
        out
    }

    /// Apply a movement intent. Spectators and unknown senders are dropped
    /// silently; at most one power-up pickup happens per message.
    pub fn handle_move(
        &mut self,
        session_id: Uuid,
        dx: f32,
        dy: f32,
        angle: f32,
        now: u64,
    ) -> Vec<Outbound> {
        let Some(player) = self.players.get_mut(&session_id) else {
            debug!(session_id = %session_id, "Move from session without a seat dropped");
            return Vec::new();
        };

        let dx = sanitize_intent(dx);
        let dy = sanitize_intent(dy);
        let speed = if player.effect_active(EffectKind::Speed, now) {
            TANK_BASE_SPEED * SPEED_BOOST_MULTIPLIER
        } else {
            TANK_BASE_SPEED
        };

        player.x = (player.x + dx * speed).clamp(0.0, ARENA_WIDTH - TANK_SIZE);
        player.y = (player.y + dy * speed).clamp(0.0, ARENA_HEIGHT - TANK_SIZE);
        if angle.is_finite() {
            player.heading = angle;
        }

        // First overlapping power-up wins; store order is arbitrary
        let pickup = self
            .power_ups
            .iter()
            .find(|(_, pu)| {
                aabb_overlap(
                    player.x,
                    player.y,
                    TANK_SIZE,
                    TANK_SIZE,
                    pu.x,
                    pu.y,
                    POWER_UP_SIZE,
                    POWER_UP_SIZE,
                )
            })
            .map(|(pu_id, _)| pu_id.clone());

        let mut out = Vec::new();
        if let Some(pu_id) = pickup {
            if let Some(pu) = self.power_ups.remove(&pu_id) {
                match pu.kind.effect() {
                    // Re-collecting refreshes the expiry rather than stacking
                    Some(effect) => {
                        player
                            .active_effects
                            .insert(effect, now + effect.duration_ms());
                    }
                    None => {
                        player.health = (player.health + HEAL_AMOUNT).min(MAX_HEALTH);
                    }
                }
                debug!(session_id = %session_id, kind = ?pu.kind, "Power-up collected");
                out.push(Outbound::one(
                    session_id,
                    ServerMsg::PowerUpCollected {
                        kind: pu.kind,
                        effect: pu.kind.describe().to_string(),
                    },
                ));
            }
        }
        out
    }

    /// Apply a shoot request, gated by the active cooldown
    pub fn handle_shoot(&mut self, session_id: Uuid, angle: f32, now: u64) -> Vec<Outbound> {
        let Some(player) = self.players.get_mut(&session_id) else {
            debug!(session_id = %session_id, "Shot from session without a seat dropped");
            return Vec::new();
        };
        if !angle.is_finite() {
            return Vec::new();
        }

        let rapid_fire = player.effect_active(EffectKind::RapidFire, now);
        if !CombatSystem::can_fire(player.last_shot_at, now, rapid_fire) {
            return Vec::new();
        }
        player.last_shot_at = now;

        let boosted = player.effect_active(EffectKind::Damage, now);
        let (tank_x, tank_y) = (player.x, player.y);
        let bullet = Bullet::fire(
            short_id(&mut self.rng),
            session_id,
            tank_x,
            tank_y,
            angle,
            boosted,
        );
        self.bullets.insert(bullet.id.clone(), bullet);
        Vec::new()
    }

    /// Advance the simulation by one tick. Order matters: spawn, expiry
    /// sweep, bullet resolution, then an unconditional snapshot broadcast,
    /// so health never reads <= 0 in what clients see.
    pub fn tick(&mut self, now: u64) -> Vec<Outbound> {
        let mut out = Vec::new();

        self.maybe_spawn_power_up(now);
        self.sweep_expired(now);
        self.resolve_bullets(now, &mut out);

        out.push(Outbound::all(ServerMsg::GameUpdate {
            snapshot: snapshot::build(self),
        }));
        out
    }

    fn maybe_spawn_power_up(&mut self, now: u64) {
        if self.power_ups.len() < MAX_POWER_UPS && self.rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
            let id = short_id(&mut self.rng);
            let pu = PowerUp::spawn_random(id.clone(), &mut self.rng, now);
            debug!(id = %id, kind = ?pu.kind, "Power-up spawned");
            self.power_ups.insert(id, pu);
        }
    }

    fn sweep_expired(&mut self, now: u64) {
        self.power_ups
            .retain(|_, pu| now.saturating_sub(pu.spawned_at) < POWER_UP_LIFETIME_MS);
        self.explosions
            .retain(|_, e| now.saturating_sub(e.created_at) < EXPLOSION_LIFETIME_MS);
    }

    /// Advance every bullet and resolve at most one hit per bullet.
    /// Candidate order over players is store-iteration order (arbitrary);
    /// the first live non-owner overlap wins.
    fn resolve_bullets(&mut self, now: u64, out: &mut Vec<Outbound>) {
        let bullet_ids: Vec<String> = self.bullets.keys().cloned().collect();

        for bullet_id in bullet_ids {
            let Some(bullet) = self.bullets.get_mut(&bullet_id) else {
                continue;
            };
            bullet.advance();
            if bullet.out_of_bounds() {
                self.bullets.remove(&bullet_id);
                continue;
            }
            let (bx, by, owner, damage) = (bullet.x, bullet.y, bullet.owner, bullet.damage);

            let victim_id = self
                .players
                .iter()
                .find(|(pid, p)| {
                    **pid != owner
                        && aabb_overlap(
                            bx,
                            by,
                            BULLET_SIZE,
                            BULLET_SIZE,
                            p.x,
                            p.y,
                            TANK_SIZE,
                            TANK_SIZE,
                        )
                })
                .map(|(pid, _)| *pid);

            let Some(victim_id) = victim_id else { continue };
            self.bullets.remove(&bullet_id);

            let shielded = self
                .players
                .get(&victim_id)
                .is_some_and(|p| p.effect_active(EffectKind::Shield, now));
            if shielded {
                // Unlimited absorptions while the shield lasts
                self.add_explosion(bx, by, EXPLOSION_SIZE_SMALL, now);
                continue;
            }

            let mut killed = false;
            if let Some(victim) = self.players.get_mut(&victim_id) {
                let (health, dead) = CombatSystem::apply_damage(victim.health, damage);
                victim.health = health;
                killed = dead;
            }

            out.push(Outbound::all(ServerMsg::PlayerHit {
                player_id: victim_id,
                shooter_id: owner,
                damage,
                x: bx,
                y: by,
            }));
            self.add_explosion(
                bx,
                by,
                if killed {
                    EXPLOSION_SIZE_LARGE
                } else {
                    EXPLOSION_SIZE_SMALL
                },
                now,
            );

            if killed {
                self.handle_kill(owner, victim_id, out);
            }
        }
    }

    /// Death is a hard reset, never a destroy: the victim respawns healed
    /// at a fresh position with all effects cleared.
    fn handle_kill(&mut self, attacker_id: Uuid, victim_id: Uuid, out: &mut Vec<Outbound>) {
        let mut victim_color = String::from("#ffffff");
        if let Some(victim) = self.players.get_mut(&victim_id) {
            victim.deaths += 1;
            victim.health = MAX_HEALTH;
            victim.x = self.rng.gen_range(0.0..=(ARENA_WIDTH - TANK_SIZE));
            victim.y = self.rng.gen_range(0.0..=(ARENA_HEIGHT - TANK_SIZE));
            victim.active_effects.clear();
            victim_color = victim.color.clone();
        }

        // Bullet ownership is cascade-deleted on disconnect, so the
        // attacker is normally still seated; guard anyway.
        let mut killer_color = String::from("#ffffff");
        if let Some(attacker) = self.players.get_mut(&attacker_id) {
            attacker.score += KILL_SCORE;
            attacker.kills += 1;
            killer_color = attacker.color.clone();
        }

        info!(killer = %attacker_id, victim = %victim_id, "Kill");
        out.push(Outbound::all(ServerMsg::PlayerKilled {
            killer: display_name(&attacker_id),
            victim: display_name(&victim_id),
            killer_color,
            victim_color,
        }));

        self.leaderboard = leaderboard::rank(&self.players);
    }

    fn add_explosion(&mut self, x: f32, y: f32, size: f32, now: u64) {
        let id = short_id(&mut self.rng);
        self.explosions.insert(
            id.clone(),
            Explosion {
                id,
                x,
                y,
                size,
                created_at: now,
            },
        );
    }

    fn create_player(&mut self, session_id: Uuid) {
        let red = self
            .players
            .values()
            .filter(|p| p.team == Team::Red)
            .count();
        let blue = self.players.len() - red;
        let team = if red <= blue { Team::Red } else { Team::Blue };

        let x = self.rng.gen_range(0.0..=(ARENA_WIDTH - TANK_SIZE));
        let y = self.rng.gen_range(0.0..=(ARENA_HEIGHT - TANK_SIZE));
        self.players
            .insert(session_id, PlayerState::new(session_id, x, y, team));
    }
}

impl Default for ArenaWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Intent components outside [-1, 1] (or non-finite) are clamped so a
/// malformed message cannot teleport a tank.
fn sanitize_intent(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
