use crate::combatant::Combatant;
use crate::entities::{Facing, PlayerSlot};
use crate::geometry::Rect;
use crate::settings::{
    Settings, PROJECTILE_BOX_HEIGHT, PROJECTILE_BOX_WIDTH, PROJECTILE_OFFSCREEN_MARGIN,
};

/// The "Attack!" text fired by the print skill. Travels in a straight line and
/// disappears on its first hit or once it leaves the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Centre of the hitbox.
    pub x: f32,
    pub y: f32,
    /// +1.0 or −1.0.
    pub direction: f32,
    pub vel_x: f32,
    pub owner: PlayerSlot,
    pub damage: i32,
    pub active: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32, direction: f32, owner: PlayerSlot, settings: &Settings) -> Self {
        Self {
            x,
            y,
            direction,
            vel_x: settings.combat.projectile_speed * direction,
            owner,
            damage: settings.combat.print_damage,
            active: true,
        }
    }

    /// Fire from the shooter's facing edge at half height.
    pub fn spawn_for(shooter: &Combatant, settings: &Settings) -> Self {
        let x = match shooter.facing {
            Facing::Right => shooter.x + shooter.width,
            Facing::Left => shooter.x,
        };
        let y = shooter.y + shooter.height / 2.0;
        Self::new(x, y, shooter.facing.sign(), shooter.slot, settings)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.x, self.y, PROJECTILE_BOX_WIDTH, PROJECTILE_BOX_HEIGHT)
    }

    pub fn update(&mut self, arena_width: f32) {
        self.x += self.vel_x;
        let margin = PROJECTILE_OFFSCREEN_MARGIN;
        if self.x < -margin || self.x > arena_width + margin {
            self.active = false;
        }
    }

    /// Never true against the combatant that fired it.
    pub fn check_collision(&self, target: &Combatant) -> bool {
        if target.slot == self.owner {
            return false;
        }
        self.hitbox().overlaps(&target.body())
    }
}
