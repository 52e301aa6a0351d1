mod display;

use std::error::Error;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use keyboard_brawl::controls::KeyTracker;
use keyboard_brawl::game::GameState;
use keyboard_brawl::settings::Settings;

/// How long an event banner stays on screen, in frames.
const BANNER_FRAMES: u32 = 90;

#[derive(Parser, Debug)]
#[command(name = "keyboard_brawl", about = "Two-player fighter on a keyboard-shaped stage")]
struct Cli {
    /// JSON settings file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for bubble spawns and debris, for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("keyboard_brawl.log")
}

/// Route `log` output to a file. Logging is silently off if it can't be opened.
fn init_logging(path: &Path) {
    let Ok(file) = File::create(path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "⌨  KEYBOARD  BRAWL  ⌨";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let players: &[(&str, Color, &str)] = &[
        ("Player 1", Color::Blue, "A D : Move   W : Jump   F : Use skill"),
        ("Player 2", Color::Red, "← → : Move   ↑ : Jump   L : Use skill"),
    ];
    for (i, (name, color, keys)) in players.iter().enumerate() {
        let row = cy.saturating_sub(5) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(22), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<10}", name)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*keys))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(22), cy.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Catch falling bubbles:"))?;

    let bubble_info: &[(&str, Color, &str)] = &[
        ("pow()", Color::DarkYellow, "  melee strike, 8 damage"),
        ("del", Color::Red, "    melee strike that deletes the foe's skill"),
        ("print()", Color::Yellow, "fire an \"Attack!\" projectile"),
        ("SUPER", Color::Magenta, "  grow huge and trample on contact"),
        ("Ctrl+C", Color::Cyan, " trap: frozen for 3 seconds"),
        ("TypeError", Color::DarkRed, "trap: left and right swapped"),
    ];
    for (i, (label, color, desc)) in bubble_info.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(22), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<10}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(desc.trim_start()))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(22), cy + 6))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("SPACE : Start   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the players make a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Input thread is gone; nothing more can be read
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Key events only update the `KeyTracker`; each frame both players' snapshots
/// are read from it at once, so the two players never block each other.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(state.settings.fps));
    let mut keys = KeyTracker::new();
    let mut banner: Option<(String, u32)> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            if kind == KeyEventKind::Press {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true);
                    }
                    KeyCode::Char(' ') if state.is_over() => return Ok(false),
                    _ => {}
                }
            }
            keys.record(code, kind, frame);
        }

        if !state.is_over() {
            let inputs = keys.snapshots(frame);
            for event in state.tick(&inputs, rng) {
                if let Some(text) = display::event_banner(&event) {
                    banner = Some((text, BANNER_FRAMES));
                }
            }
        }

        banner = banner.and_then(|(text, left)| (left > 0).then(|| (text, left - 1)));

        let (width, height) = terminal::size()?;
        let message = banner.as_ref().map(|(text, _)| text.as_str());
        display::render(out, state, width, height, message)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_logging(&cli.log_file.clone().unwrap_or_else(default_log_path));

    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };
    settings.validate()?;
    log::info!("starting with {:?}", settings);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        log::warn!("terminal has no key-release events; falling back to the hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &settings, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}

fn run<W: Write>(
    out: &mut W,
    settings: &Settings,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                log::info!("match started");
                let mut state = GameState::new(*settings);
                if game_loop(out, &mut state, rng, rx)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
