// engine/src/world/tile.rs
#![forbid(unsafe_code)]

use super::constants::HOSTILE_THRESHOLD;

/// Hostile subtypes of the tuned game.
///
/// Ordinal invariant: every `code()` is `>= HOSTILE_THRESHOLD`. `Other` carries
/// any hostile code the rules do not know by name (17 is one of them).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HostileKind {
    Basic,
    Toad,
    Fly,
    Archer,
    Other(u8),
}

impl HostileKind {
    pub fn code(self) -> u8 {
        use HostileKind::*;
        match self {
            Basic => 15,
            Toad => 16,
            Fly => 18,
            Archer => 19,
            Other(code) => code,
        }
    }

    /// Inverse of `code()`. Returns None below the hostile threshold.
    pub fn from_code(code: u8) -> Option<Self> {
        use HostileKind::*;
        match code {
            15 => Some(Basic),
            16 => Some(Toad),
            18 => Some(Fly),
            19 => Some(Archer),
            c if c >= HOSTILE_THRESHOLD => Some(Other(c)),
            _ => None,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, HostileKind::Other(_))
    }
}

/**
 * One cell of the discretized game area.
 *
 * Codes follow the game's tile vocabulary:
 *   0 empty, 1 agent, 6 pickup, 10 ground, 12 block, 13 powerup, 14 pipe, >=15 hostile.
 *
 * `Scenery` holds every other code below the hostile threshold (background
 * decorations the rules never look at). `from_code` is total over u8 and
 * `code()` is its exact inverse.
 */
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Tile {
    #[default]
    Empty,
    Agent,
    Pickup,
    Ground,
    Block,
    Powerup,
    Pipe,
    Hostile(HostileKind),
    Scenery(u8),
}

impl Tile {
    pub fn code(self) -> u8 {
        use Tile::*;
        match self {
            Empty => 0,
            Agent => 1,
            Pickup => 6,
            Ground => 10,
            Block => 12,
            Powerup => 13,
            Pipe => 14,
            Hostile(kind) => kind.code(),
            Scenery(code) => code,
        }
    }

    pub fn from_code(code: u8) -> Self {
        use Tile::*;
        match code {
            0 => Empty,
            1 => Agent,
            6 => Pickup,
            10 => Ground,
            12 => Block,
            13 => Powerup,
            14 => Pipe,
            c => match HostileKind::from_code(c) {
                Some(kind) => Hostile(kind),
                None => Scenery(c),
            },
        }
    }

    /// Single ordinal comparison; relies on the code layout documented above.
    #[inline]
    pub fn is_hostile(self) -> bool {
        self.code() >= HOSTILE_THRESHOLD
    }

    pub fn hostile_kind(self) -> Option<HostileKind> {
        match self {
            Tile::Hostile(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        use Tile::*;
        match self {
            Empty => '.',
            Agent => 'M',
            Pickup => 'o',
            Ground => '#',
            Block => 'B',
            Powerup => '?',
            Pipe => 'P',
            Hostile(HostileKind::Basic) => 'g',
            Hostile(HostileKind::Toad) => 't',
            Hostile(HostileKind::Fly) => 'f',
            Hostile(HostileKind::Archer) => 'a',
            Hostile(HostileKind::Other(_)) => 'x',
            Scenery(_) => ',',
        }
    }
}
