//! Terminal renderer for the match.
//!
//! Scales the arena onto whatever terminal size is current and draws the
//! state read-only. Nothing here feeds back into the simulation.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use keyboard_brawl::bubble::Bubble;
use keyboard_brawl::combatant::Combatant;
use keyboard_brawl::entities::{BubbleKind, Outcome, PlayerSlot};
use keyboard_brawl::events::GameEvent;
use keyboard_brawl::game::GameState;
use keyboard_brawl::geometry::Rect;
use keyboard_brawl::platform::Platform;
use keyboard_brawl::settings::SUPER_SCALE;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_KEY: Color = Color::Grey;
const C_KEY_DYNAMIC: Color = Color::Blue;
const C_DEBRIS: Color = Color::DarkGrey;
const C_PLAYER_ONE: Color = Color::Blue;
const C_PLAYER_TWO: Color = Color::Red;
const C_FROZEN: Color = Color::Cyan;
const C_REVERSED: Color = Color::DarkRed;
const C_SUPER: Color = Color::Magenta;
const C_SWING: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BANNER: Color = Color::White;

/// Maps arena pixels onto the terminal cells inside the border.
struct Viewport {
    width: u16,
    height: u16,
    arena_width: f32,
    arena_height: f32,
}

impl Viewport {
    fn new(state: &GameState, width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            arena_width: state.settings.arena.width,
            arena_height: state.settings.arena.height,
        }
    }

    /// Play area spans columns 1..width-1 and rows 2..height-2.
    fn cols(&self) -> f32 {
        self.width.saturating_sub(2) as f32
    }

    fn rows(&self) -> f32 {
        self.height.saturating_sub(4) as f32
    }

    fn col(&self, x: f32) -> i32 {
        1 + (x / self.arena_width * self.cols()).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        2 + (y / self.arena_height * self.rows()).floor() as i32
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 1 && col < self.width as i32 - 1 && row >= 2 && row < self.height as i32 - 2
    }

    /// Cell span covered by `rect`, at least one cell in each direction.
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let (c0, r0) = (self.col(rect.x), self.row(rect.y));
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r1 = self.row(rect.bottom()).max(r0 + 1);
        (c0, r0, c1, r1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame. `banner` is a short message about the latest event.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
    banner: Option<&str>,
) -> std::io::Result<()> {
    let vp = Viewport::new(state, width, height);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &vp)?;
    draw_hud(out, state, &vp)?;

    for platform in &state.platforms {
        draw_platform(out, platform, &vp)?;
    }
    for bubble in &state.bubbles {
        draw_bubble(out, bubble, &vp)?;
    }
    for projectile in &state.projectiles {
        put(out, &vp, vp.col(projectile.x) - 3, vp.row(projectile.y), "Attack!", C_PROJECTILE)?;
    }
    for combatant in &state.combatants {
        draw_combatant(out, combatant, &vp)?;
    }

    if let Some(msg) = banner {
        let col = (width / 2).saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, 1))?;
        out.queue(style::SetForegroundColor(C_BANNER))?;
        out.queue(Print(msg))?;
    }

    draw_controls_hint(out, &vp)?;

    if let Some(outcome) = state.outcome() {
        draw_game_over(out, outcome, &vp)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Print `text` starting at a cell, clipped to the play area.
fn put<W: Write>(
    out: &mut W,
    vp: &Viewport,
    col: i32,
    row: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (i, ch) in text.chars().enumerate() {
        let c = col + i as i32;
        if vp.contains(c, row) {
            out.queue(cursor::MoveTo(c as u16, row as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

fn fill<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let (c0, r0, c1, r1) = vp.span(rect);
    let line: String = std::iter::repeat(glyph).take((c1 - c0) as usize).collect();
    for row in r0..r1 {
        put(out, vp, c0, row, &line, color)?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.width as usize;
    let h = vp.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar, the banner overwrites its middle
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn status_line(c: &Combatant, fps: u32) -> String {
    let filled = (c.health.max(0) as usize * 10).div_ceil(c.max_health.max(1) as usize);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled.min(10)));
    let mut line = format!("P{} [{}] {:>3}", c.slot.index() + 1, bar, c.health);
    if let Some(skill) = c.skill {
        line.push_str(&format!("  {}", skill.label()));
    }
    let seconds = |frames: u32| frames / fps.max(1) + 1;
    if c.is_frozen() {
        line.push_str(&format!("  FROZEN {}s", seconds(c.frozen.remaining())));
    }
    if c.is_reversed() {
        line.push_str(&format!("  REVERSED {}s", seconds(c.reversed.remaining())));
    }
    if c.is_super() {
        line.push_str(&format!("  SUPER {}s", seconds(c.super_form.remaining())));
    }
    line
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, vp: &Viewport) -> std::io::Result<()> {
    let fps = state.settings.fps;

    let left = status_line(state.combatant(PlayerSlot::One), fps);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER_ONE))?;
    out.queue(Print(&left))?;

    let right = status_line(state.combatant(PlayerSlot::Two), fps);
    let rx = vp.width.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER_TWO))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_platform<W: Write>(out: &mut W, platform: &Platform, vp: &Viewport) -> std::io::Result<()> {
    if platform.is_broken {
        for piece in &platform.debris {
            let glyph = if piece.alpha > 128.0 { "▪" } else { "·" };
            put(out, vp, vp.col(piece.x), vp.row(piece.y), glyph, C_DEBRIS)?;
        }
        return Ok(());
    }

    let color = if platform.is_dynamic() { C_KEY_DYNAMIC } else { C_KEY };
    fill(out, vp, &platform.rect, '▀', color)?;

    let (cx, cy) = platform.rect.center();
    let label_col = vp.col(cx) - platform.label.chars().count() as i32 / 2;
    put(out, vp, label_col, vp.row(cy), &platform.label, Color::Black)?;
    Ok(())
}

fn bubble_color(kind: BubbleKind) -> Color {
    match kind {
        BubbleKind::Pow => Color::DarkYellow,
        BubbleKind::Delete => Color::Red,
        BubbleKind::Print => Color::Yellow,
        BubbleKind::Super => Color::Magenta,
        BubbleKind::CtrlC => Color::Cyan,
        BubbleKind::TypeError => Color::DarkRed,
    }
}

fn draw_bubble<W: Write>(out: &mut W, bubble: &Bubble, vp: &Viewport) -> std::io::Result<()> {
    let label = format!("({})", bubble.kind.label());
    let col = vp.col(bubble.x) - label.chars().count() as i32 / 2;
    put(out, vp, col, vp.row(bubble.y), &label, bubble_color(bubble.kind))
}

fn draw_combatant<W: Write>(out: &mut W, c: &Combatant, vp: &Viewport) -> std::io::Result<()> {
    let base = match c.slot {
        PlayerSlot::One => C_PLAYER_ONE,
        PlayerSlot::Two => C_PLAYER_TWO,
    };
    let color = if c.is_frozen() {
        C_FROZEN
    } else if c.is_reversed() {
        C_REVERSED
    } else if c.is_super() {
        C_SUPER
    } else {
        base
    };

    // Giants are drawn at their contact size
    let body = if c.is_super() {
        c.body().scaled(SUPER_SCALE)
    } else {
        c.body()
    };
    let glyph = if c.is_frozen() { '▓' } else { '█' };
    fill(out, vp, &body, glyph, color)?;

    if !c.is_frozen() {
        if let Some(swing) = c.get_attack_rect() {
            fill(out, vp, &swing, '~', C_SWING)?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "P1: A D W move/jump  F skill   P2: ← → ↑ move/jump  L skill   Q: Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, outcome: Outcome, vp: &Viewport) -> std::io::Result<()> {
    let (headline, color) = match outcome {
        Outcome::Winner(PlayerSlot::One) => ("║  PLAYER 1 WINS!    ║", C_PLAYER_ONE),
        Outcome::Winner(PlayerSlot::Two) => ("║  PLAYER 2 WINS!    ║", C_PLAYER_TWO),
        Outcome::Draw => ("║    DOUBLE K.O.     ║", Color::White),
    };
    let lines: [(&str, Color); 4] = [
        ("╔════════════════════╗", color),
        (headline, color),
        ("╚════════════════════╝", color),
        ("SPACE - Menu   Q - Quit", Color::White),
    ];

    let cx = vp.width / 2;
    let start_row = (vp.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

// ── Event banner ──────────────────────────────────────────────────────────────

/// A one-line announcement for events worth showing above the arena.
pub fn event_banner(event: &GameEvent) -> Option<String> {
    let name = |slot: PlayerSlot| format!("P{}", slot.index() + 1);
    let text = match event {
        GameEvent::SkillUsed { player, skill } => {
            format!("{} used {}", name(*player), skill.label())
        }
        GameEvent::MeleeHit { attacker, damage } => {
            format!("{} lands a pow() for {}!", name(*attacker), damage)
        }
        GameEvent::SkillDeleted { attacker } => {
            format!("{} deleted {}'s skill", name(*attacker), name(attacker.opponent()))
        }
        GameEvent::ProjectileHit { target, damage } => {
            format!("{} takes {} from print()", name(*target), damage)
        }
        GameEvent::Frozen { player } => format!("Ctrl+C! {} is frozen", name(*player)),
        GameEvent::Reversed { player } => {
            format!("TypeError! {}'s controls flipped", name(*player))
        }
        GameEvent::SuperActivated { player } => format!("{} goes SUPER", name(*player)),
        GameEvent::SuperImpact { giant, victim } => {
            format!("{} tramples {}", name(*giant), name(*victim))
        }
        GameEvent::FellOut { player } => format!("{} fell off the keyboard", name(*player)),
        GameEvent::PlatformBroke { .. } => "Shift shattered!".to_string(),
        GameEvent::BubbleSpawned { .. }
        | GameEvent::BubbleCollected { .. }
        | GameEvent::PlatformRestored { .. }
        | GameEvent::MatchOver(_) => return None,
    };
    Some(text)
}
