use rand::Rng;

use crate::combatant::Combatant;
use crate::entities::BubbleKind;
use crate::settings::{BUBBLE_FALL_SPEED, BUBBLE_RADIUS, BUBBLE_SPAWN_MARGIN, BUBBLE_SPAWN_Y};

/// Relative spawn odds for each bubble kind (out of 100).
pub const SPAWN_WEIGHTS: [(BubbleKind, u32); 6] = [
    (BubbleKind::Pow, 20),
    (BubbleKind::Delete, 12),
    (BubbleKind::Print, 20),
    (BubbleKind::Super, 10),
    (BubbleKind::CtrlC, 18),
    (BubbleKind::TypeError, 20),
];

/// A falling pickup. `x`/`y` is the centre of the circle.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vel_y: f32,
    pub kind: BubbleKind,
    pub active: bool,
}

impl Bubble {
    pub fn new(x: f32, y: f32, kind: BubbleKind) -> Self {
        Self {
            x,
            y,
            radius: BUBBLE_RADIUS,
            vel_y: BUBBLE_FALL_SPEED,
            kind,
            active: true,
        }
    }

    /// A bubble of random kind at a random x above the arena. Arenas too narrow
    /// for the side margins drop every bubble down the middle.
    pub fn spawn(arena_width: f32, rng: &mut impl Rng) -> Self {
        let max_x = arena_width - BUBBLE_SPAWN_MARGIN;
        let x = if max_x >= BUBBLE_SPAWN_MARGIN {
            rng.gen_range(BUBBLE_SPAWN_MARGIN..=max_x)
        } else {
            arena_width / 2.0
        };
        Self::new(x, BUBBLE_SPAWN_Y, roll_kind(rng))
    }

    pub fn update(&mut self, arena_height: f32) {
        self.y += self.vel_y;
        if self.y > arena_height {
            self.active = false;
        }
    }

    /// Circle test against the combatant's centre, padded by half its width.
    pub fn check_collision(&self, combatant: &Combatant) -> bool {
        let (cx, cy) = combatant.body().center();
        let (dx, dy) = (self.x - cx, self.y - cy);
        (dx * dx + dy * dy).sqrt() < self.radius + combatant.width / 2.0
    }
}

pub fn roll_kind(rng: &mut impl Rng) -> BubbleKind {
    let total: u32 = SPAWN_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in SPAWN_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    BubbleKind::Pow
}
