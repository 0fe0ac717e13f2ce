use crate::types::{BOARD_WIDTH, MovePair, Piece, PieceColor, PieceType, Square};

const WIDTH: usize = BOARD_WIDTH as usize;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The 8x8 board snapshot. Owned wholesale: every authoritative server
/// response replaces it, and a plain copy serves as the rollback snapshot
/// for optimistic moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; WIDTH]; WIDTH],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; WIDTH]; WIDTH],
        }
    }

    /// The standard starting position, row 0 = black's back rank.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for col in 0..WIDTH {
            let kind = BACK_RANK[col];
            board.squares[0][col] = Some(Piece::new(PieceColor::Black, kind));
            board.squares[1][col] = Some(Piece::new(PieceColor::Black, PieceType::Pawn));
            board.squares[6][col] = Some(Piece::new(PieceColor::White, PieceType::Pawn));
            board.squares[7][col] = Some(Piece::new(PieceColor::White, kind));
        }
        board
    }

    /// Builds a board from the server's row-major wire grid.
    /// Rejects grids that are not exactly 8x8.
    pub fn from_rows(rows: &[Vec<Option<Piece>>]) -> Result<Self, String> {
        if rows.len() != WIDTH {
            return Err(format!("board has {} rows, expected {}", rows.len(), WIDTH));
        }

        let mut board = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != WIDTH {
                return Err(format!("row {} has {} cells, expected {}", r, row.len(), WIDTH));
            }
            for (c, cell) in row.iter().enumerate() {
                board.squares[r][c] = *cell;
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    /// Applies an optimistic move: the source piece lands on the destination
    /// and the source empties. Returns the pre-move occupant of the
    /// destination (the inferred capture).
    pub fn move_piece(&mut self, mv: MovePair) -> Option<Piece> {
        let captured = self.piece_at(mv.to);
        self.squares[mv.to.row as usize][mv.to.col as usize] = self.piece_at(mv.from);
        self.squares[mv.from.row as usize][mv.from.col as usize] = None;
        captured
    }

    /// Position of the white king, for check highlighting.
    pub fn white_king(&self) -> Option<Square> {
        self.find(Piece::new(PieceColor::White, PieceType::King))
    }

    fn find(&self, piece: Piece) -> Option<Square> {
        for row in 0..WIDTH {
            for col in 0..WIDTH {
                if self.squares[row][col] == Some(piece) {
                    return Square::new(row as u8, col as u8);
                }
            }
        }
        None
    }

    fn count(&self, piece: Piece) -> u8 {
        let mut total = 0;
        for row in &self.squares {
            for cell in row {
                if *cell == Some(piece) {
                    total += 1;
                }
            }
        }
        total
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rebuilds a capture tally for pieces of `color` from the authoritative
/// board: every piece missing against the starting roster counts as captured.
/// Chronological order from `current` is preserved where the counts still
/// agree; surplus entries are dropped and deficits appended per type.
///
/// Promotions can mint extra material, so per-type deficits clamp at zero.
pub fn reconcile_captures(board: &Board, color: PieceColor, current: &[Piece]) -> Vec<Piece> {
    let mut missing = [0u8; PieceType::ALL.len()];
    for (slot, kind) in missing.iter_mut().zip(PieceType::ALL) {
        let on_board = board.count(Piece::new(color, kind));
        *slot = kind.starting_count().saturating_sub(on_board);
    }

    let type_index = |kind: PieceType| {
        PieceType::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    };

    let mut tally = Vec::new();
    for piece in current {
        let slot = type_index(piece.kind);
        if piece.color == color && missing[slot] > 0 {
            missing[slot] -= 1;
            tally.push(*piece);
        }
    }
    for (slot, kind) in missing.iter().zip(PieceType::ALL) {
        for _ in 0..*slot {
            tally.push(Piece::new(color, kind));
        }
    }
    tally
}
