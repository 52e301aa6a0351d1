//! The player-controlled fighter.
//!
//! A combatant owns its own physics, skill slot, swing state and status
//! effects. Everything that involves the opponent (hits, pickups, pushes) is
//! resolved by `GameState`, which calls back into the methods here.

use crate::entities::{Facing, InputSnapshot, PlayerSlot, SkillKind};
use crate::geometry::Rect;
use crate::platform::Platform;
use crate::settings::{
    Arena, Combat, Effects, Physics, Settings, ACTIVE_HIT_FRAME, ATTACK_ANIM_FRAMES,
    ATTACK_BOX_HEIGHT, ATTACK_BOX_WIDTH, KNOCKBACK_DECAY, KNOCKBACK_EPSILON, KNOCKBACK_MAGNITUDE,
    SUPER_SCALE,
};
use crate::status::Countdown;

#[derive(Clone, Debug)]
pub struct Combatant {
    pub slot: PlayerSlot,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub max_health: i32,
    pub facing: Facing,
    pub on_ground: bool,

    /// The single pending skill.
    pub skill: Option<SkillKind>,
    pub is_attacking: bool,
    pub attack_frame: u32,
    pub attack_cooldown: u32,
    /// The melee skill driving the current swing; spent once it connects.
    pub strike: Option<SkillKind>,
    pub knockback_x: f32,

    pub frozen: Countdown,
    pub reversed: Countdown,
    pub super_form: Countdown,
    pub super_collision_cooldown: u32,

    physics: Physics,
    combat: Combat,
    effects: Effects,
    arena: Arena,
}

impl Combatant {
    pub fn new(slot: PlayerSlot, x: f32, y: f32, facing: Facing, settings: &Settings) -> Self {
        Self {
            slot,
            x,
            y,
            vel_x: 0.0,
            vel_y: 0.0,
            width: settings.physics.combatant_width,
            height: settings.physics.combatant_height,
            health: settings.combat.max_health,
            max_health: settings.combat.max_health,
            facing,
            on_ground: false,
            skill: None,
            is_attacking: false,
            attack_frame: 0,
            attack_cooldown: 0,
            strike: None,
            knockback_x: 0.0,
            frozen: Countdown::default(),
            reversed: Countdown::default(),
            super_form: Countdown::default(),
            super_collision_cooldown: 0,
            physics: settings.physics,
            combat: settings.combat,
            effects: settings.effects,
            arena: settings.arena,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn body(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_active()
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed.is_active()
    }

    pub fn is_super(&self) -> bool {
        self.super_form.is_active()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// True on the one swing frame where melee hits are evaluated.
    pub fn in_active_hit_window(&self) -> bool {
        self.is_attacking && self.attack_frame == ACTIVE_HIT_FRAME && !self.is_frozen()
    }

    /// Melee box on the facing side, only while swinging.
    pub fn get_attack_rect(&self) -> Option<Rect> {
        if !self.is_attacking {
            return None;
        }
        let x = match self.facing {
            Facing::Right => self.x + self.width,
            Facing::Left => self.x - ATTACK_BOX_WIDTH,
        };
        Some(Rect::new(x, self.y, ATTACK_BOX_WIDTH, ATTACK_BOX_HEIGHT))
    }

    /// Whether the enlarged super-form box touches `other`. Does not deal damage.
    pub fn check_super_collision(&self, other: &Combatant) -> bool {
        if !self.is_super() || self.super_collision_cooldown > 0 {
            return false;
        }
        self.body().scaled(SUPER_SCALE).overlaps(&other.body())
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Advance one frame. Platforms that are not solid are skipped.
    pub fn update(&mut self, input: &InputSnapshot, platforms: &[Platform]) {
        self.tick_status();

        if self.is_frozen() {
            self.frozen.tick();
            self.vel_x = 0.0;
            self.vel_y += self.physics.gravity;
            self.y += self.vel_y;
            self.land_on(platforms);
            self.check_fall_death();
            return;
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        if self.is_attacking {
            self.attack_frame += 1;
            if self.attack_frame > ATTACK_ANIM_FRAMES {
                self.is_attacking = false;
                self.attack_frame = 0;
                self.strike = None;
            }
        }

        if self.knockback_x.abs() > KNOCKBACK_EPSILON {
            self.x += self.knockback_x;
            self.knockback_x *= KNOCKBACK_DECAY;
        } else {
            self.knockback_x = 0.0;
        }

        let (mut left, mut right) = (input.left, input.right);
        if self.is_reversed() {
            std::mem::swap(&mut left, &mut right);
        }

        if left && !self.is_attacking {
            self.vel_x = -self.physics.move_speed;
            self.facing = Facing::Left;
        } else if right && !self.is_attacking {
            self.vel_x = self.physics.move_speed;
            self.facing = Facing::Right;
        } else {
            self.vel_x = 0.0;
        }

        if input.jump && self.on_ground {
            self.vel_y = self.physics.jump_power;
            self.on_ground = false;
        }

        self.vel_y += self.physics.gravity;
        self.x += self.vel_x;
        self.y += self.vel_y;

        self.land_on(platforms);

        self.x = self.x.clamp(0.0, self.arena.width - self.width);
        self.check_fall_death();
    }

    /// Reversed and super-form run down every frame, frozen or not.
    fn tick_status(&mut self) {
        if self.reversed.tick() {
            log::debug!("{:?} controls restored", self.slot);
        }
        if self.super_form.tick() {
            log::debug!("{:?} super form ended", self.slot);
        }
        self.super_collision_cooldown = self.super_collision_cooldown.saturating_sub(1);
    }

    /// Snap onto the first solid platform the body overlaps while moving down.
    fn land_on(&mut self, platforms: &[Platform]) {
        self.on_ground = false;
        if self.vel_y <= 0.0 {
            return;
        }
        let body = self.body();
        for platform in platforms.iter().filter(|p| p.is_solid()) {
            if body.overlaps(&platform.rect) {
                self.y = platform.rect.y - self.height;
                self.vel_y = 0.0;
                self.on_ground = true;
                break;
            }
        }
    }

    fn check_fall_death(&mut self) {
        if self.y > self.arena.height {
            self.health = 0;
        }
    }

    // ── Skills ───────────────────────────────────────────────────────────────

    /// Spend the held skill. Returns what was used, or `None` if there was
    /// nothing to use or the attack is still cooling down.
    pub fn use_skill(&mut self) -> Option<SkillKind> {
        if self.attack_cooldown > 0 {
            return None;
        }
        let used = self.skill.take()?;
        self.attack_cooldown = self.combat.attack_cooldown;
        if used.is_melee() {
            self.is_attacking = true;
            self.attack_frame = 0;
            self.strike = Some(used);
        }
        Some(used)
    }

    /// Put `skill` in the slot unless one is already held. Returns whether it was taken.
    pub fn grant_skill(&mut self, skill: SkillKind) -> bool {
        if self.skill.is_some() {
            return false;
        }
        self.skill = Some(skill);
        true
    }

    pub fn clear_skill(&mut self) {
        self.skill = None;
    }

    // ── Damage & status effects ──────────────────────────────────────────────

    /// Health is clamped to `[0, max_health]` whatever `amount` is.
    pub fn take_damage(&mut self, amount: i32, knockback_direction: f32) {
        self.health = self.health.saturating_sub(amount).clamp(0, self.max_health);
        self.knockback_x = knockback_direction * KNOCKBACK_MAGNITUDE;
    }

    pub fn freeze(&mut self) {
        self.frozen.start(self.effects.freeze_duration);
        self.vel_x = 0.0;
    }

    pub fn reverse_controls(&mut self) {
        self.reversed.start(self.effects.reversed_duration);
    }

    pub fn activate_super(&mut self) {
        self.super_form.start(self.effects.super_duration);
        self.skill = None;
    }
}
