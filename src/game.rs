//! The round loop.
//!
//! `GameState` owns every entity and advances them in a fixed order each
//! tick. All randomness comes through the `rng` argument so callers control
//! determinism (tests pass a seeded `StdRng`).

use rand::Rng;

use crate::bubble::Bubble;
use crate::collision::{check_attack_hit, check_player_collision, resolve_super_contact};
use crate::combatant::Combatant;
use crate::entities::{BubbleKind, InputSnapshot, MatchStatus, Outcome, PlayerSlot, SkillKind};
use crate::events::GameEvent;
use crate::level::{keyboard_platforms, SPAWN_POINTS};
use crate::platform::{Platform, PlatformChange};
use crate::projectile::Projectile;
use crate::settings::Settings;

#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: Settings,
    /// Indexed by `PlayerSlot::index()`.
    pub combatants: [Combatant; 2],
    pub platforms: Vec<Platform>,
    pub bubbles: Vec<Bubble>,
    pub projectiles: Vec<Projectile>,
    /// Frames since the last bubble spawn.
    pub bubble_timer: u32,
    pub frame: u64,
    pub status: MatchStatus,
}

impl GameState {
    /// A fresh match on the keyboard stage.
    ///
    /// `settings` are taken as-is; run `Settings::validate` first when they
    /// come from outside.
    pub fn new(settings: Settings) -> Self {
        let platforms = keyboard_platforms(&settings);
        Self::with_platforms(settings, platforms)
    }

    /// A fresh match on a custom set of platforms, combatants at the usual spawns.
    pub fn with_platforms(settings: Settings, platforms: Vec<Platform>) -> Self {
        let spawn = |slot: PlayerSlot| {
            let (x, y, facing) = SPAWN_POINTS[slot.index()];
            Combatant::new(slot, x, y, facing, &settings)
        };
        Self {
            combatants: [spawn(PlayerSlot::One), spawn(PlayerSlot::Two)],
            settings,
            platforms,
            bubbles: Vec::new(),
            projectiles: Vec::new(),
            bubble_timer: 0,
            frame: 0,
            status: MatchStatus::Playing,
        }
    }

    pub fn combatant(&self, slot: PlayerSlot) -> &Combatant {
        &self.combatants[slot.index()]
    }

    pub fn combatant_mut(&mut self, slot: PlayerSlot) -> &mut Combatant {
        &mut self.combatants[slot.index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, MatchStatus::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            MatchStatus::Playing => None,
            MatchStatus::Over(outcome) => Some(outcome),
        }
    }

    // ── Per-frame tick ───────────────────────────────────────────────────────

    /// Advance the match by one frame. Does nothing once the match is over.
    ///
    /// Order: skills → platforms → combatants → body contact → melee →
    /// projectiles → bubbles → win check.
    pub fn tick(&mut self, inputs: &[InputSnapshot; 2], rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        self.frame += 1;

        self.activate_skills(inputs, &mut events);
        self.update_platforms(rng, &mut events);
        self.update_combatants(inputs, &mut events);
        self.resolve_contact(&mut events);
        self.resolve_melee(&mut events);
        self.update_projectiles(&mut events);
        self.update_bubbles(rng, &mut events);
        self.check_game_over(&mut events);

        for event in &events {
            log::debug!("frame {}: {:?}", self.frame, event);
        }
        events
    }

    /// Edge-triggered skill use. Frozen combatants cannot act.
    fn activate_skills(&mut self, inputs: &[InputSnapshot; 2], events: &mut Vec<GameEvent>) {
        for (combatant, input) in self.combatants.iter_mut().zip(inputs) {
            if !input.attack_pressed || combatant.is_frozen() {
                continue;
            }
            let Some(skill) = combatant.use_skill() else {
                continue;
            };
            events.push(GameEvent::SkillUsed {
                player: combatant.slot,
                skill,
            });
            if skill == SkillKind::Print {
                let projectile = Projectile::spawn_for(combatant, &self.settings);
                self.projectiles.push(projectile);
            }
        }
    }

    fn update_platforms(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        let bodies = [self.combatants[0].body(), self.combatants[1].body()];
        for (index, platform) in self.platforms.iter_mut().enumerate() {
            match platform.update(&bodies, rng) {
                Some(PlatformChange::Broke) => events.push(GameEvent::PlatformBroke { index }),
                Some(PlatformChange::Restored) => {
                    events.push(GameEvent::PlatformRestored { index })
                }
                None => {}
            }
        }
    }

    fn update_combatants(&mut self, inputs: &[InputSnapshot; 2], events: &mut Vec<GameEvent>) {
        for (combatant, input) in self.combatants.iter_mut().zip(inputs) {
            let was_alive = combatant.is_alive();
            combatant.update(input, &self.platforms);
            if was_alive && !combatant.is_alive() {
                events.push(GameEvent::FellOut {
                    player: combatant.slot,
                });
            }
        }
    }

    /// Super-form contact damage, then the cheap push-apart.
    fn resolve_contact(&mut self, events: &mut Vec<GameEvent>) {
        let damage = self.settings.combat.super_contact_damage;
        let [p1, p2] = &mut self.combatants;

        if resolve_super_contact(p1, p2, damage) {
            events.push(GameEvent::SuperImpact {
                giant: p1.slot,
                victim: p2.slot,
            });
        }
        if resolve_super_contact(p2, p1, damage) {
            events.push(GameEvent::SuperImpact {
                giant: p2.slot,
                victim: p1.slot,
            });
        }
        check_player_collision(p1, p2);
    }

    fn resolve_melee(&mut self, events: &mut Vec<GameEvent>) {
        let pow_damage = self.settings.combat.pow_damage;
        let [p1, p2] = &mut self.combatants;
        resolve_swing(p1, p2, pow_damage, events);
        resolve_swing(p2, p1, pow_damage, events);
    }

    fn update_projectiles(&mut self, events: &mut Vec<GameEvent>) {
        let arena_width = self.settings.arena.width;
        for projectile in &mut self.projectiles {
            projectile.update(arena_width);
            if !projectile.active {
                continue;
            }
            for target in self.combatants.iter_mut() {
                if projectile.check_collision(target) {
                    target.take_damage(projectile.damage, projectile.direction);
                    projectile.active = false;
                    events.push(GameEvent::ProjectileHit {
                        target: target.slot,
                        damage: projectile.damage,
                    });
                    break;
                }
            }
        }
        self.projectiles.retain(|p| p.active);
    }

    fn update_bubbles(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        self.bubble_timer += 1;
        if self.bubble_timer >= self.settings.bubbles.spawn_interval {
            let bubble = Bubble::spawn(self.settings.arena.width, rng);
            events.push(GameEvent::BubbleSpawned {
                kind: bubble.kind,
                x: bubble.x,
            });
            self.bubbles.push(bubble);
            self.bubble_timer = 0;
        }

        let arena_height = self.settings.arena.height;
        let pickup_damage = self.settings.combat.pickup_damage;
        for bubble in &mut self.bubbles {
            bubble.update(arena_height);
            if !bubble.active {
                continue;
            }
            // Player one is checked first and wins simultaneous contact.
            if let Some(combatant) = self
                .combatants
                .iter_mut()
                .find(|c| bubble.check_collision(c))
            {
                apply_bubble(bubble.kind, combatant, pickup_damage, events);
                bubble.active = false;
            }
        }
        self.bubbles.retain(|b| b.active);
    }

    fn check_game_over(&mut self, events: &mut Vec<GameEvent>) {
        let [p1, p2] = &self.combatants;
        let outcome = match (p1.is_alive(), p2.is_alive()) {
            (true, true) => return,
            (false, false) => Outcome::Draw,
            (false, true) => Outcome::Winner(PlayerSlot::Two),
            (true, false) => Outcome::Winner(PlayerSlot::One),
        };
        log::info!("match over after {} frames: {:?}", self.frame, outcome);
        self.status = MatchStatus::Over(outcome);
        events.push(GameEvent::MatchOver(outcome));
    }
}

/// Resolve the attacker's swing on its active hit frame. A connecting strike
/// is spent so it cannot land twice.
fn resolve_swing(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    pow_damage: i32,
    events: &mut Vec<GameEvent>,
) {
    if !attacker.in_active_hit_window() || !check_attack_hit(attacker, defender) {
        return;
    }
    match attacker.strike.take() {
        Some(SkillKind::Pow) => {
            defender.take_damage(pow_damage, attacker.facing.sign());
            events.push(GameEvent::MeleeHit {
                attacker: attacker.slot,
                damage: pow_damage,
            });
        }
        Some(SkillKind::Delete) => {
            defender.clear_skill();
            events.push(GameEvent::SkillDeleted {
                attacker: attacker.slot,
            });
        }
        Some(SkillKind::Print) | None => {}
    }
}

/// Skill bubbles never overwrite a held skill; Super never refreshes an active
/// super form. The bubble is consumed either way.
fn apply_bubble(
    kind: BubbleKind,
    combatant: &mut Combatant,
    pickup_damage: i32,
    events: &mut Vec<GameEvent>,
) {
    let player = combatant.slot;
    match kind {
        BubbleKind::Pow => {
            combatant.grant_skill(SkillKind::Pow);
        }
        BubbleKind::Delete => {
            combatant.grant_skill(SkillKind::Delete);
        }
        BubbleKind::Print => {
            combatant.grant_skill(SkillKind::Print);
        }
        BubbleKind::Super => {
            if !combatant.is_super() {
                combatant.activate_super();
                events.push(GameEvent::SuperActivated { player });
            }
        }
        BubbleKind::CtrlC => {
            combatant.freeze();
            combatant.take_damage(pickup_damage, 0.0);
            events.push(GameEvent::Frozen { player });
        }
        BubbleKind::TypeError => {
            combatant.reverse_controls();
            combatant.take_damage(pickup_damage, 0.0);
            events.push(GameEvent::Reversed { player });
        }
    }
    events.push(GameEvent::BubbleCollected { player, kind });
}
