//! Pairwise combat checks between the two combatants.

use crate::combatant::Combatant;
use crate::settings::{PUSH_APART, SUPER_CONTACT_COOLDOWN};

/// Body overlap test. Overlapping combatants are nudged `PUSH_APART` px away
/// from each other along x.
pub fn check_player_collision(a: &mut Combatant, b: &mut Combatant) -> bool {
    if !a.body().overlaps(&b.body()) {
        return false;
    }
    if a.x < b.x {
        a.x -= PUSH_APART;
        b.x += PUSH_APART;
    } else {
        a.x += PUSH_APART;
        b.x -= PUSH_APART;
    }
    true
}

/// Whether the attacker's melee box overlaps the defender's body.
pub fn check_attack_hit(attacker: &Combatant, defender: &Combatant) -> bool {
    attacker
        .get_attack_rect()
        .is_some_and(|rect| rect.overlaps(&defender.body()))
}

/// Apply one super-form contact hit from `giant` to `victim` if they touch.
/// The victim is knocked away from the giant and the giant's contact cooldown
/// starts so the hit does not repeat every frame.
pub fn resolve_super_contact(giant: &mut Combatant, victim: &mut Combatant, damage: i32) -> bool {
    if !giant.check_super_collision(victim) {
        return false;
    }
    let direction = if victim.x >= giant.x { 1.0 } else { -1.0 };
    victim.take_damage(damage, direction);
    giant.super_collision_cooldown = SUPER_CONTACT_COOLDOWN;
    true
}
