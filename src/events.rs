use crate::entities::{BubbleKind, Outcome, PlayerSlot, SkillKind};

/// Something noteworthy that happened during a tick. Consumers (sound, HUD)
/// react to these; nothing flows back into the simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    SkillUsed { player: PlayerSlot, skill: SkillKind },
    MeleeHit { attacker: PlayerSlot, damage: i32 },
    SkillDeleted { attacker: PlayerSlot },
    ProjectileHit { target: PlayerSlot, damage: i32 },
    BubbleSpawned { kind: BubbleKind, x: f32 },
    BubbleCollected { player: PlayerSlot, kind: BubbleKind },
    Frozen { player: PlayerSlot },
    Reversed { player: PlayerSlot },
    SuperActivated { player: PlayerSlot },
    SuperImpact { giant: PlayerSlot, victim: PlayerSlot },
    PlatformBroke { index: usize },
    PlatformRestored { index: usize },
    FellOut { player: PlayerSlot },
    MatchOver(Outcome),
}
