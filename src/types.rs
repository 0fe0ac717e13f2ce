use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: u8 = 8;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
const RANKS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Pawn,
    ];

    /// Piece count per side in the standard starting position.
    pub fn starting_count(self) -> u8 {
        match self {
            Self::King | Self::Queen => 1,
            Self::Rook | Self::Bishop | Self::Knight => 2,
            Self::Pawn => 8,
        }
    }
}

/// A single board occupant as the server serializes it:
/// `{"color": "white", "type": "pawn"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: PieceColor,
    #[serde(rename = "type")]
    pub kind: PieceType,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceType) -> Self {
        Self { color, kind }
    }

    /// Unicode glyph for this piece, also used for the capture tally.
    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (PieceColor::White, PieceType::King) => '♔',
            (PieceColor::White, PieceType::Queen) => '♕',
            (PieceColor::White, PieceType::Rook) => '♖',
            (PieceColor::White, PieceType::Bishop) => '♗',
            (PieceColor::White, PieceType::Knight) => '♘',
            (PieceColor::White, PieceType::Pawn) => '♙',
            (PieceColor::Black, PieceType::King) => '♚',
            (PieceColor::Black, PieceType::Queen) => '♛',
            (PieceColor::Black, PieceType::Rook) => '♜',
            (PieceColor::Black, PieceType::Bishop) => '♝',
            (PieceColor::Black, PieceType::Knight) => '♞',
            (PieceColor::Black, PieceType::Pawn) => '♟',
        }
    }
}

/// A board coordinate. Row 0 is the server's back rank (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Returns `None` when either coordinate falls outside the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_WIDTH && col < BOARD_WIDTH {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Algebraic label, e.g. row 6 / col 4 -> "e2".
    pub fn label(self) -> String {
        let mut out = String::with_capacity(2);
        out.push(FILES[self.col as usize]);
        out.push(RANKS[self.row as usize]);
        out
    }
}

/// The most recent move, kept purely for highlight rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePair {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    WhiteWon,
    BlackWon,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// One entry of the visible move-history panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based half-move index.
    pub half_move: u32,
    pub color: PieceColor,
    pub from: Square,
    pub to: Square,
}

impl MoveRecord {
    pub fn new(half_move: u32, color: PieceColor, from: Square, to: Square) -> Self {
        Self {
            half_move,
            color,
            from,
            to,
        }
    }

    /// Full-move number shown in the panel (two half-moves per row).
    pub fn move_number(self) -> u32 {
        self.half_move.div_ceil(2)
    }

    pub fn label(self) -> String {
        let marker = match self.color {
            PieceColor::White => '⬜',
            PieceColor::Black => '⬛',
        };
        format!(
            "{}. {} {} → {}",
            self.move_number(),
            marker,
            self.from.label(),
            self.to.label()
        )
    }
}
