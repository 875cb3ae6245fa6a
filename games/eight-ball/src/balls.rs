//! Ball taxonomy: kinds, suits, the 16-ball set and the rack layout.

use glam::Vec2;
use pocket_engine::EntityId;

/// The color class a player collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Striped balls, 9–15.
    Half,
    /// Solid balls, 1–7.
    Full,
}

impl Suit {
    pub fn other(self) -> Suit {
        match self {
            Suit::Half => Suit::Full,
            Suit::Full => Suit::Half,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Suit::Half => "Half",
            Suit::Full => "Full",
        }
    }
}

/// What a ball means to the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallKind {
    Half,
    Full,
    Eight,
    Cue,
}

impl BallKind {
    /// Classify a ball by its number (0 is the cue ball).
    pub fn for_number(number: u8) -> BallKind {
        match number {
            0 => BallKind::Cue,
            8 => BallKind::Eight,
            1..=7 => BallKind::Full,
            _ => BallKind::Half,
        }
    }

    /// The suit of an objective ball; `None` for the cue and eight balls.
    pub fn suit(self) -> Option<Suit> {
        match self {
            BallKind::Half => Some(Suit::Half),
            BallKind::Full => Some(Suit::Full),
            BallKind::Eight | BallKind::Cue => None,
        }
    }
}

/// A spawned ball: entity handle plus its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub id: EntityId,
    pub number: u8,
    pub kind: BallKind,
}

impl Ball {
    pub fn new(id: EntityId, number: u8) -> Self {
        Self {
            id,
            number,
            kind: BallKind::for_number(number),
        }
    }

    /// Scene tag used when spawning this ball.
    pub fn tag(number: u8) -> String {
        if number == 0 {
            CUE_TAG.to_string()
        } else {
            format!("ball_{}", number)
        }
    }
}

/// Scene tag shared by every cue ball.
pub const CUE_TAG: &str = "cue";

/// Number of objective balls in a full rack.
pub const OBJECTIVE_BALLS: usize = 15;

/// Standard 8-ball triangle rack layout.
/// Returns positions for balls 1–15 (index = number − 1).
/// The apex points LEFT toward the cue ball, rows spread RIGHT.
///
/// ```text
///  1
///  9   2
///  3   8  10
/// 11  4  5  12
///  6 13 14  7 15
/// ```
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [Vec2; OBJECTIVE_BALLS] {
    let gap = ball_radius * 2.0 + 1.0;
    let row_offset = gap * 0.866; // sqrt(3)/2 for equilateral triangle

    // (ball_number, row, vertical_offset)
    let layout: [(u8, usize, f32); OBJECTIVE_BALLS] = [
        (1, 0, 0.0),
        (9, 1, -0.5), (2, 1, 0.5),
        (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
        (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
        (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
    ];

    let mut positions = [Vec2::ZERO; OBJECTIVE_BALLS];
    for (ball_num, row, v_offset) in layout {
        let x = apex.x + (row as f32) * row_offset;
        let y = apex.y + v_offset * gap;
        positions[(ball_num - 1) as usize] = Vec2::new(x, y);
    }
    positions
}
