//! Small closed types shared by every entity and by the frontend.

// ── Identity & orientation ───────────────────────────────────────────────────

/// Which of the two combatants something belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// −1.0 for Left, +1.0 for Right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// ── Skills & pickups ─────────────────────────────────────────────────────────

/// A skill a combatant can hold in its single skill slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillKind {
    /// Melee swing that deals damage with knockback.
    Pow,
    /// Melee swing that wipes the defender's skill slot.
    Delete,
    /// Fires a horizontal projectile.
    Print,
}

impl SkillKind {
    pub fn is_melee(self) -> bool {
        match self {
            SkillKind::Pow | SkillKind::Delete => true,
            SkillKind::Print => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillKind::Pow => "pow()",
            SkillKind::Delete => "delete",
            SkillKind::Print => "print",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleKind {
    Pow,
    Delete,
    Print,
    /// Giant transformation.
    Super,
    /// Freezes whoever touches it.
    CtrlC,
    /// Reverses left/right for whoever touches it.
    TypeError,
}

impl BubbleKind {
    /// The skill this bubble grants, if it is a skill bubble.
    pub fn skill(self) -> Option<SkillKind> {
        match self {
            BubbleKind::Pow => Some(SkillKind::Pow),
            BubbleKind::Delete => Some(SkillKind::Delete),
            BubbleKind::Print => Some(SkillKind::Print),
            BubbleKind::Super | BubbleKind::CtrlC | BubbleKind::TypeError => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BubbleKind::Pow => "pow()",
            BubbleKind::Delete => "delete",
            BubbleKind::Print => "print",
            BubbleKind::Super => "SUPER",
            BubbleKind::CtrlC => "Ctrl+C",
            BubbleKind::TypeError => "TypeError",
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// What one player is doing this frame. `attack_pressed` is edge-triggered:
/// it is true only on the frame the attack key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack_pressed: bool,
}

// ── Match status ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(PlayerSlot),
    /// Both combatants hit zero health on the same tick.
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStatus {
    Playing,
    Over(Outcome),
}
