//! The keyboard stage. Coordinates assume the default 1200×800 arena; the
//! SPACE bar sits `SPACE_BAR_LIFT` px above the bottom of whatever arena height
//! is configured.

use crate::entities::Facing;
use crate::platform::{Axis, Platform};
use crate::settings::Settings;

const SPACE_BAR_LIFT: f32 = 100.0;
const KEY_WIDTH: f32 = 100.0;
const KEY_HEIGHT: f32 = 32.0;

const SHIFT_SPEED: f32 = 1.0;
const SHIFT_RANGE: f32 = 60.0;

/// Player one's and player two's starting position and facing.
pub const SPAWN_POINTS: [(f32, f32, Facing); 2] =
    [(200.0, 300.0, Facing::Right), (950.0, 300.0, Facing::Left)];

/// Build the keyboard platform layout.
pub fn keyboard_platforms(settings: &Settings) -> Vec<Platform> {
    let key =
        |x: f32, y: f32, label: &str| Platform::new(x, y, KEY_WIDTH, KEY_HEIGHT, label, settings);
    let space_y = settings.arena.height - SPACE_BAR_LIFT;

    vec![
        // Ground
        Platform::new(75.0, space_y, 1050.0, 38.0, "SPACE", settings),
        // QWER row
        key(280.0, 480.0, "Q"),
        key(400.0, 410.0, "W"),
        key(580.0, 485.0, "E"),
        key(920.0, 465.0, "R"),
        // ASD row
        key(150.0, 580.0, "A"),
        key(680.0, 570.0, "S"),
        key(850.0, 590.0, "D"),
        // Shift bobs up and down and shatters when stood on
        key(75.0, 360.0, "Shift")
            .oscillating(Axis::Vertical, SHIFT_SPEED, SHIFT_RANGE)
            .breakable(),
        Platform::new(950.0, 320.0, 125.0, KEY_HEIGHT, "Tab", settings),
    ]
}
