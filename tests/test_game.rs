use keyboard_brawl::bubble::Bubble;
use keyboard_brawl::entities::*;
use keyboard_brawl::events::GameEvent;
use keyboard_brawl::game::GameState;
use keyboard_brawl::platform::Platform;
use keyboard_brawl::settings::Settings;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FLOOR_Y: f32 = 700.0;
const STAND_Y: f32 = FLOOR_Y - 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Flat arena, no random bubbles, both fighters standing on the floor.
fn make_state() -> GameState {
    let mut settings = Settings::default();
    settings.bubbles.spawn_interval = 1_000_000;
    let floor = Platform::new(0.0, FLOOR_Y, 1200.0, 40.0, "SPACE", &settings);
    let mut state = GameState::with_platforms(settings, vec![floor]);
    place(&mut state, PlayerSlot::One, 200.0, Facing::Right);
    place(&mut state, PlayerSlot::Two, 900.0, Facing::Left);
    state
}

fn place(state: &mut GameState, slot: PlayerSlot, x: f32, facing: Facing) {
    let c = state.combatant_mut(slot);
    c.x = x;
    c.y = STAND_Y;
    c.vel_y = 0.0;
    c.facing = facing;
}

fn idle() -> [InputSnapshot; 2] {
    [InputSnapshot::default(); 2]
}

fn p1_attacks() -> [InputSnapshot; 2] {
    let press = InputSnapshot {
        attack_pressed: true,
        ..Default::default()
    };
    [press, InputSnapshot::default()]
}

/// Run `frames` idle ticks and collect every event.
fn run_idle(state: &mut GameState, rng: &mut StdRng, frames: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(state.tick(&idle(), rng));
    }
    events
}

/// Drop a bubble right on top of a fighter's centre.
fn bubble_on(state: &mut GameState, slot: PlayerSlot, kind: BubbleKind) {
    let (cx, cy) = state.combatant(slot).body().center();
    state.bubbles.push(Bubble::new(cx, cy, kind));
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn new_match_uses_keyboard_stage() {
    let state = GameState::new(Settings::default());
    assert_eq!(state.platforms.len(), 10);
    assert_eq!(state.platforms[0].label, "SPACE");
    assert!(state.platforms.iter().any(|p| p.is_breakable && p.is_dynamic()));

    let p1 = state.combatant(PlayerSlot::One);
    let p2 = state.combatant(PlayerSlot::Two);
    assert_eq!((p1.x, p1.y, p1.facing), (200.0, 300.0, Facing::Right));
    assert_eq!((p2.x, p2.y, p2.facing), (950.0, 300.0, Facing::Left));
    assert_eq!(state.status, MatchStatus::Playing);
    assert_eq!(state.frame, 0);
}

#[test]
fn fighters_settle_on_keyboard_stage() {
    let mut state = GameState::new(Settings::default());
    let mut rng = seeded_rng();
    run_idle(&mut state, &mut rng, 120);
    assert!(state.combatants.iter().all(|c| c.on_ground && c.is_alive()));
    assert_eq!(state.frame, 120);
}

// ── melee ─────────────────────────────────────────────────────────────────────

#[test]
fn pow_hits_once_on_fifth_swing_frame() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 500.0, Facing::Right);
    place(&mut state, PlayerSlot::Two, 560.0, Facing::Left);
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Pow);

    let events = state.tick(&p1_attacks(), &mut rng);
    assert!(events.contains(&GameEvent::SkillUsed {
        player: PlayerSlot::One,
        skill: SkillKind::Pow
    }));

    run_idle(&mut state, &mut rng, 3);
    assert_eq!(state.combatant(PlayerSlot::Two).health, 100);

    let events = state.tick(&idle(), &mut rng);
    assert!(events.contains(&GameEvent::MeleeHit {
        attacker: PlayerSlot::One,
        damage: 8
    }));
    let p2 = state.combatant(PlayerSlot::Two);
    assert_eq!(p2.health, 92);
    assert_eq!(p2.knockback_x, 15.0);

    run_idle(&mut state, &mut rng, 20);
    assert_eq!(state.combatant(PlayerSlot::Two).health, 92);
    assert!(state.combatant(PlayerSlot::Two).x > 560.0);
}

#[test]
fn pow_knocks_back_in_attacker_facing() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 500.0, Facing::Left);
    place(&mut state, PlayerSlot::Two, 440.0, Facing::Right);
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Pow);

    state.tick(&p1_attacks(), &mut rng);
    run_idle(&mut state, &mut rng, 4);
    assert_eq!(state.combatant(PlayerSlot::Two).knockback_x, -15.0);
}

#[test]
fn delete_wipes_defender_skill_without_damage() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 500.0, Facing::Right);
    place(&mut state, PlayerSlot::Two, 560.0, Facing::Left);
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Delete);
    state.combatant_mut(PlayerSlot::Two).grant_skill(SkillKind::Print);

    state.tick(&p1_attacks(), &mut rng);
    let events = run_idle(&mut state, &mut rng, 4);

    assert!(events.contains(&GameEvent::SkillDeleted {
        attacker: PlayerSlot::One
    }));
    let p2 = state.combatant(PlayerSlot::Two);
    assert_eq!(p2.skill, None);
    assert_eq!(p2.health, 100);
}

#[test]
fn missed_swing_still_spends_skill() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Pow);

    state.tick(&p1_attacks(), &mut rng);
    run_idle(&mut state, &mut rng, 20);

    assert_eq!(state.combatant(PlayerSlot::One).skill, None);
    assert_eq!(state.combatant(PlayerSlot::Two).health, 100);
}

#[test]
fn frozen_fighter_cannot_use_skill() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    let p1 = state.combatant_mut(PlayerSlot::One);
    p1.grant_skill(SkillKind::Pow);
    p1.freeze();

    let events = state.tick(&p1_attacks(), &mut rng);

    assert!(events.is_empty());
    let p1 = state.combatant(PlayerSlot::One);
    assert_eq!(p1.skill, Some(SkillKind::Pow));
    assert!(!p1.is_attacking);
}

// ── projectiles ───────────────────────────────────────────────────────────────

#[test]
fn print_fires_projectile_that_hits_opponent() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::Two, 600.0, Facing::Left);
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Print);

    state.tick(&p1_attacks(), &mut rng);
    assert_eq!(state.projectiles.len(), 1);
    let shot = &state.projectiles[0];
    assert_eq!(shot.owner, PlayerSlot::One);
    assert_eq!(shot.x, 250.0); // spawned at 240, moved once
    assert_eq!(shot.y, STAND_Y + 30.0);

    let events = run_idle(&mut state, &mut rng, 40);

    assert!(events.contains(&GameEvent::ProjectileHit {
        target: PlayerSlot::Two,
        damage: 2
    }));
    assert!(state.projectiles.is_empty());
    assert_eq!(state.combatant(PlayerSlot::Two).health, 98);
    assert_eq!(state.combatant(PlayerSlot::One).health, 100);
}

#[test]
fn projectile_leaves_arena_without_hitting() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 600.0, Facing::Left);
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Print);

    state.tick(&p1_attacks(), &mut rng);
    run_idle(&mut state, &mut rng, 70);

    assert!(state.projectiles.is_empty());
    assert!(state.combatants.iter().all(|c| c.health == 100));
}

// ── bubbles ───────────────────────────────────────────────────────────────────

#[test]
fn skill_bubble_fills_empty_slot() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    bubble_on(&mut state, PlayerSlot::One, BubbleKind::Print);

    let events = state.tick(&idle(), &mut rng);

    assert_eq!(state.combatant(PlayerSlot::One).skill, Some(SkillKind::Print));
    assert!(state.bubbles.is_empty());
    assert!(events.contains(&GameEvent::BubbleCollected {
        player: PlayerSlot::One,
        kind: BubbleKind::Print
    }));
}

#[test]
fn skill_bubble_does_not_overwrite_held_skill() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Pow);
    bubble_on(&mut state, PlayerSlot::One, BubbleKind::Delete);

    state.tick(&idle(), &mut rng);

    assert_eq!(state.combatant(PlayerSlot::One).skill, Some(SkillKind::Pow));
    assert!(state.bubbles.is_empty());
}

#[test]
fn ctrl_c_freezes_and_chips() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    bubble_on(&mut state, PlayerSlot::Two, BubbleKind::CtrlC);

    let events = state.tick(&idle(), &mut rng);

    let p2 = state.combatant(PlayerSlot::Two);
    assert!(p2.is_frozen());
    assert_eq!(p2.health, 97);
    assert_eq!(p2.knockback_x, 0.0);
    assert!(events.contains(&GameEvent::Frozen {
        player: PlayerSlot::Two
    }));
}

#[test]
fn type_error_reverses_and_chips() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    bubble_on(&mut state, PlayerSlot::One, BubbleKind::TypeError);

    state.tick(&idle(), &mut rng);
    let p1 = state.combatant(PlayerSlot::One);
    assert!(p1.is_reversed());
    assert_eq!(p1.health, 97);

    let right = InputSnapshot {
        right: true,
        ..Default::default()
    };
    state.tick(&[right, InputSnapshot::default()], &mut rng);
    assert_eq!(state.combatant(PlayerSlot::One).x, 194.0);
}

#[test]
fn super_bubble_transforms_and_clears_skill() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::One).grant_skill(SkillKind::Print);
    bubble_on(&mut state, PlayerSlot::One, BubbleKind::Super);

    let events = state.tick(&idle(), &mut rng);

    let p1 = state.combatant(PlayerSlot::One);
    assert!(p1.is_super());
    assert_eq!(p1.skill, None);
    assert!(events.contains(&GameEvent::SuperActivated {
        player: PlayerSlot::One
    }));
}

#[test]
fn super_bubble_does_not_refresh_active_super() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::One).activate_super();
    run_idle(&mut state, &mut rng, 50);
    bubble_on(&mut state, PlayerSlot::One, BubbleKind::Super);

    let events = state.tick(&idle(), &mut rng);

    assert_eq!(state.combatant(PlayerSlot::One).super_form.remaining(), 249);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::SuperActivated { .. })));
    assert!(state.bubbles.is_empty());
}

#[test]
fn player_one_wins_shared_bubble() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 500.0, Facing::Right);
    place(&mut state, PlayerSlot::Two, 530.0, Facing::Left);
    state.bubbles.push(Bubble::new(515.0, STAND_Y + 30.0, BubbleKind::Pow));

    state.tick(&idle(), &mut rng);

    assert_eq!(state.combatant(PlayerSlot::One).skill, Some(SkillKind::Pow));
    assert_eq!(state.combatant(PlayerSlot::Two).skill, None);
}

#[test]
fn bubbles_spawn_on_interval() {
    let settings = Settings::default();
    let floor = Platform::new(0.0, FLOOR_Y, 1200.0, 40.0, "SPACE", &settings);
    let mut state = GameState::with_platforms(settings, vec![floor]);
    let mut rng = seeded_rng();

    run_idle(&mut state, &mut rng, 149);
    assert!(state.bubbles.is_empty());

    let events = state.tick(&idle(), &mut rng);
    assert_eq!(state.bubbles.len(), 1);
    assert_eq!(state.bubble_timer, 0);
    let bubble = &state.bubbles[0];
    assert!(bubble.x >= 100.0 && bubble.x <= 1100.0);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::BubbleSpawned { .. })));
}

#[test]
fn narrow_arena_drops_bubbles_down_the_middle() {
    let mut settings = Settings::default();
    settings.arena.width = 150.0;
    settings.bubbles.spawn_interval = 10;
    let floor = Platform::new(0.0, FLOOR_Y, 150.0, 40.0, "SPACE", &settings);
    let mut state = GameState::with_platforms(settings, vec![floor]);
    let mut rng = seeded_rng();

    let events = run_idle(&mut state, &mut rng, 10);

    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::BubbleSpawned { .. })));
    assert_eq!(state.bubbles.len(), 1);
    assert_eq!(state.bubbles[0].x, 75.0);
}

#[test]
fn uncollected_bubble_falls_out() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.bubbles.push(Bubble::new(600.0, 790.0, BubbleKind::CtrlC));
    run_idle(&mut state, &mut rng, 5);
    assert!(state.bubbles.is_empty());
    assert!(state.combatants.iter().all(|c| !c.is_frozen()));
}

#[test]
fn same_seed_same_match() {
    let mut a = GameState::new(Settings::default());
    let mut b = GameState::new(Settings::default());
    let (mut rng_a, mut rng_b) = (seeded_rng(), seeded_rng());

    let events_a = run_idle(&mut a, &mut rng_a, 600);
    let events_b = run_idle(&mut b, &mut rng_b, 600);

    assert_eq!(events_a, events_b);
    assert_eq!(a.bubbles, b.bubbles);
}

// ── super contact ─────────────────────────────────────────────────────────────

#[test]
fn giant_tramples_with_cooldown() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 500.0, Facing::Right);
    place(&mut state, PlayerSlot::Two, 550.0, Facing::Left);
    state.combatant_mut(PlayerSlot::One).activate_super();

    let events = state.tick(&idle(), &mut rng);
    assert!(events.contains(&GameEvent::SuperImpact {
        giant: PlayerSlot::One,
        victim: PlayerSlot::Two
    }));
    assert_eq!(state.combatant(PlayerSlot::Two).health, 95);
    assert_eq!(state.combatant(PlayerSlot::Two).knockback_x, 15.0);

    place(&mut state, PlayerSlot::Two, 550.0, Facing::Left);
    state.combatant_mut(PlayerSlot::Two).knockback_x = 0.0;
    run_idle(&mut state, &mut rng, 5);
    assert_eq!(state.combatant(PlayerSlot::Two).health, 95);
}

#[test]
fn overlapping_fighters_are_pushed_apart() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    place(&mut state, PlayerSlot::One, 500.0, Facing::Right);
    place(&mut state, PlayerSlot::Two, 520.0, Facing::Left);

    state.tick(&idle(), &mut rng);

    assert_eq!(state.combatant(PlayerSlot::One).x, 498.0);
    assert_eq!(state.combatant(PlayerSlot::Two).x, 522.0);
}

// ── match end ─────────────────────────────────────────────────────────────────

#[test]
fn knockout_declares_winner() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::Two).health = 0;

    let events = state.tick(&idle(), &mut rng);

    let outcome = Outcome::Winner(PlayerSlot::One);
    assert_eq!(state.status, MatchStatus::Over(outcome));
    assert_eq!(state.outcome(), Some(outcome));
    assert!(events.contains(&GameEvent::MatchOver(outcome)));
}

#[test]
fn simultaneous_knockout_is_a_draw() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::One).health = 0;
    state.combatant_mut(PlayerSlot::Two).health = 0;

    state.tick(&idle(), &mut rng);

    assert_eq!(state.outcome(), Some(Outcome::Draw));
}

#[test]
fn falling_off_loses_the_match() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    let p1 = state.combatant_mut(PlayerSlot::One);
    p1.y = 799.5;
    p1.x = 50.0;
    state.platforms.clear();

    let events = state.tick(&idle(), &mut rng);

    assert!(events.contains(&GameEvent::FellOut {
        player: PlayerSlot::One
    }));
    assert_eq!(state.outcome(), Some(Outcome::Winner(PlayerSlot::Two)));
}

#[test]
fn tick_is_noop_once_over() {
    let mut state = make_state();
    let mut rng = seeded_rng();
    state.combatant_mut(PlayerSlot::Two).health = 0;
    state.tick(&idle(), &mut rng);
    let frame = state.frame;
    let p1_y = state.combatant(PlayerSlot::One).y;

    let events = state.tick(&p1_attacks(), &mut rng);

    assert!(events.is_empty());
    assert_eq!(state.frame, frame);
    assert_eq!(state.combatant(PlayerSlot::One).y, p1_y);
    assert!(state.is_over());
}
