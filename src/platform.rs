//! Keycap platforms: static, oscillating, and breakable.
//!
//! A breakable platform runs a small state machine:
//!
//! ```text
//!   intact ──(stood on past break_threshold)──▶ broken ──(respawn_frames)──▶ intact
//! ```
//!
//! While broken it is not solid, and its debris is simulated until every piece
//! has faded out or fallen off the arena.

use rand::Rng;

use crate::geometry::Rect;
use crate::settings::{PlatformTuning, Settings};

/// Speed multiplier for a horizontal mover while someone rides it.
pub const RIDE_BOOST: f32 = 2.0;

const DEBRIS_ALPHA: f32 = 255.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Back-and-forth motion around the platform's anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub axis: Axis,
    pub speed: f32,
    /// Maximum distance from the anchor in either direction.
    pub range: f32,
    /// +1.0 or −1.0.
    pub direction: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debris {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    /// Degrees.
    pub rotation: f32,
    pub rotation_speed: f32,
    /// 255 = opaque, removed at 0.
    pub alpha: f32,
}

/// What changed on a platform during one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformChange {
    Broke,
    Restored,
}

#[derive(Clone, Debug)]
pub struct Platform {
    pub rect: Rect,
    /// Resting position; oscillation is measured from here and respawns return here.
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub label: String,
    pub oscillation: Option<Oscillation>,
    pub is_breakable: bool,
    pub is_broken: bool,
    /// Frames a combatant has been standing on it (decays when nobody is).
    pub break_timer: u32,
    pub respawn_timer: u32,
    pub debris: Vec<Debris>,
    tuning: PlatformTuning,
    arena_height: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, label: &str, settings: &Settings) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            anchor_x: x,
            anchor_y: y,
            label: label.to_string(),
            oscillation: None,
            is_breakable: false,
            is_broken: false,
            break_timer: 0,
            respawn_timer: 0,
            debris: Vec::new(),
            tuning: settings.platforms,
            arena_height: settings.arena.height,
        }
    }

    pub fn oscillating(mut self, axis: Axis, speed: f32, range: f32) -> Self {
        self.oscillation = Some(Oscillation {
            axis,
            speed,
            range,
            direction: 1.0,
        });
        self
    }

    pub fn breakable(mut self) -> Self {
        self.is_breakable = true;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.oscillation.is_some()
    }

    /// Whether combatants collide with this platform right now.
    pub fn is_solid(&self) -> bool {
        !self.is_broken
    }

    /// Feet within `stand_tolerance` of the top edge and horizontal overlap.
    pub fn check_player_standing(&self, body: &Rect) -> bool {
        body.overlaps_horizontally(&self.rect)
            && (body.bottom() - self.rect.y).abs() <= self.tuning.stand_tolerance
    }

    /// Advance one frame. `standing` holds the bodies of every combatant that
    /// could be standing on the platform.
    pub fn update(&mut self, standing: &[Rect], rng: &mut impl Rng) -> Option<PlatformChange> {
        let occupied = !self.is_broken && standing.iter().any(|b| self.check_player_standing(b));

        if !self.is_broken {
            self.advance_oscillation(occupied);
        }

        if !self.is_breakable {
            return None;
        }

        if self.is_broken {
            self.update_debris();
            self.respawn_timer += 1;
            if self.respawn_timer >= self.tuning.respawn_frames {
                self.restore();
                return Some(PlatformChange::Restored);
            }
            return None;
        }

        if occupied {
            self.break_timer += 1;
        } else {
            self.break_timer = self.break_timer.saturating_sub(1);
        }

        if self.break_timer > self.tuning.break_threshold {
            self.shatter(rng);
            return Some(PlatformChange::Broke);
        }
        None
    }

    fn advance_oscillation(&mut self, occupied: bool) {
        let Some(osc) = self.oscillation.as_mut() else {
            return;
        };

        let (pos, anchor) = match osc.axis {
            Axis::Vertical => (&mut self.rect.y, self.anchor_y),
            Axis::Horizontal => (&mut self.rect.x, self.anchor_x),
        };
        let speed = if occupied && osc.axis == Axis::Horizontal {
            osc.speed * RIDE_BOOST
        } else {
            osc.speed
        };

        *pos += speed * osc.direction;
        if *pos <= anchor - osc.range {
            osc.direction = 1.0;
        } else if *pos >= anchor + osc.range {
            osc.direction = -1.0;
        }
    }

    fn shatter(&mut self, rng: &mut impl Rng) {
        self.is_broken = true;
        self.break_timer = 0;
        self.respawn_timer = 0;

        let (cx, _) = self.rect.center();
        // Degenerate keys still shatter; pieces start on the edge.
        let width = self.rect.width.max(f32::EPSILON);
        let height = self.rect.height.max(f32::EPSILON);
        let half = width / 2.0;
        let count = rng.gen_range(10..=12);
        self.debris = (0..count)
            .map(|_| {
                let x = self.rect.x + rng.gen_range(0.0..width);
                let y = self.rect.y + rng.gen_range(0.0..height);
                // Pieces fly away from the centre, faster the further out they start.
                let spread = (x - cx) / half;
                Debris {
                    x,
                    y,
                    vx: spread * rng.gen_range(1.0..4.0) + rng.gen_range(-0.5..0.5),
                    vy: -rng.gen_range(2.0..6.0),
                    size: rng.gen_range(6.0..14.0),
                    rotation: 0.0,
                    rotation_speed: rng.gen_range(-12.0..12.0),
                    alpha: DEBRIS_ALPHA,
                }
            })
            .collect();
        log::debug!("platform {} broke into {} pieces", self.label, self.debris.len());
    }

    fn update_debris(&mut self) {
        let gravity = self.tuning.debris_gravity;
        let fade = self.tuning.debris_fade;
        for piece in &mut self.debris {
            piece.x += piece.vx;
            piece.y += piece.vy;
            piece.vy += gravity;
            piece.rotation += piece.rotation_speed;
            piece.alpha -= fade;
        }
        let floor = self.arena_height;
        self.debris.retain(|p| p.alpha > 0.0 && p.y <= floor);
    }

    fn restore(&mut self) {
        self.is_broken = false;
        self.respawn_timer = 0;
        self.break_timer = 0;
        self.debris.clear();
        self.rect.x = self.anchor_x;
        self.rect.y = self.anchor_y;
        if let Some(osc) = self.oscillation.as_mut() {
            osc.direction = 1.0;
        }
        log::debug!("platform {} restored", self.label);
    }
}
