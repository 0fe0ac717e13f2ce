use crate::board::Board;
use crate::types::{BOARD_WIDTH, MovePair, Piece, PieceColor, Square};

/// Logical size of the drawing surface in CSS pixels.
pub const BOARD_PIXELS: f64 = 560.0;
/// Logical size of one square.
pub const SQUARE_PIXELS: f64 = 70.0;

pub const LIGHT_SQUARE: &str = "#f0d9b5";
pub const DARK_SQUARE: &str = "#b58863";
pub const SELECTED_TINT: &str = "rgba(20, 85, 30, 0.6)";
pub const CHECK_TINT: &str = "rgba(231, 76, 60, 0.55)";
pub const LAST_MOVE_TINT: &str = "rgba(255, 255, 100, 0.3)";
pub const MOVE_MARKER: &str = "rgba(0, 0, 0, 0.25)";

/// Translucent tint layered over the base square color. Declaration order is
/// paint order: later variants win visually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    LastMove,
    Check,
    Selected,
}

impl Overlay {
    pub fn color(self) -> &'static str {
        match self {
            Self::LastMove => LAST_MOVE_TINT,
            Self::Check => CHECK_TINT,
            Self::Selected => SELECTED_TINT,
        }
    }
}

/// Marker on a legal destination square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMarker {
    /// Centered dot on an empty destination.
    Dot,
    /// Ring around a capturable occupant.
    Ring,
}

/// Piece glyph plus the flag driving the contrast outline stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub outlined: bool,
}

/// Everything one square needs painted, in order: base fill, overlay tints,
/// move marker, glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquarePaint {
    pub square: Square,
    pub base: &'static str,
    pub overlays: Vec<Overlay>,
    pub marker: Option<MoveMarker>,
    pub glyph: Option<Glyph>,
}

/// Full draw plan for the board, 64 squares row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardScene {
    pub squares: Vec<SquarePaint>,
}

pub fn base_color(square: Square) -> &'static str {
    if (square.row + square.col) % 2 == 0 {
        LIGHT_SQUARE
    } else {
        DARK_SQUARE
    }
}

fn glyph_for(piece: Piece) -> Glyph {
    Glyph {
        symbol: piece.glyph(),
        outlined: piece.color == PieceColor::White,
    }
}

/// Composes the deterministic draw plan from the current snapshot. Tolerates
/// an empty valid-move set and no selection; `check_square` is the defending
/// king's square when the check tint applies.
pub fn compose(
    board: &Board,
    selection: Option<Square>,
    valid_moves: &[Square],
    last_move: Option<MovePair>,
    check_square: Option<Square>,
) -> BoardScene {
    let mut squares = Vec::with_capacity((BOARD_WIDTH as usize).pow(2));

    for row in 0..BOARD_WIDTH {
        for col in 0..BOARD_WIDTH {
            let square = Square { row, col };
            let occupant = board.piece_at(square);

            let mut overlays = Vec::new();
            if last_move.is_some_and(|m| m.from == square || m.to == square) {
                overlays.push(Overlay::LastMove);
            }
            if check_square == Some(square) {
                overlays.push(Overlay::Check);
            }
            if selection == Some(square) {
                overlays.push(Overlay::Selected);
            }

            let marker = if valid_moves.contains(&square) {
                Some(if occupant.is_some() {
                    MoveMarker::Ring
                } else {
                    MoveMarker::Dot
                })
            } else {
                None
            };

            squares.push(SquarePaint {
                square,
                base: base_color(square),
                overlays,
                marker,
                glyph: occupant.map(glyph_for),
            });
        }
    }

    BoardScene { squares }
}

impl BoardScene {
    pub fn at(&self, square: Square) -> &SquarePaint {
        &self.squares[square.row as usize * BOARD_WIDTH as usize + square.col as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn base_colors_alternate_by_parity() {
        assert_eq!(base_color(sq(0, 0)), LIGHT_SQUARE);
        assert_eq!(base_color(sq(0, 1)), DARK_SQUARE);
        assert_eq!(base_color(sq(1, 0)), DARK_SQUARE);
        assert_eq!(base_color(sq(7, 7)), LIGHT_SQUARE);
    }

    #[test]
    fn bare_snapshot_composes_without_highlights() {
        let scene = compose(&Board::standard(), None, &[], None, None);

        assert_eq!(scene.squares.len(), 64);
        assert!(scene.squares.iter().all(|s| s.overlays.is_empty()));
        assert!(scene.squares.iter().all(|s| s.marker.is_none()));
        assert_eq!(
            scene.at(sq(7, 4)).glyph,
            Some(Glyph {
                symbol: '♔',
                outlined: true
            })
        );
        assert_eq!(
            scene.at(sq(0, 4)).glyph,
            Some(Glyph {
                symbol: '♚',
                outlined: false
            })
        );
        assert_eq!(scene.at(sq(4, 4)).glyph, None);
    }

    #[test]
    fn overlays_stack_in_paint_order() {
        // Contrived pile-up: the destination of the last move is also the
        // checked king square and the current selection.
        let hot = sq(7, 4);
        let last = MovePair {
            from: sq(6, 4),
            to: hot,
        };
        let scene = compose(&Board::standard(), Some(hot), &[], Some(last), Some(hot));

        assert_eq!(
            scene.at(hot).overlays,
            vec![Overlay::LastMove, Overlay::Check, Overlay::Selected]
        );
        assert_eq!(scene.at(sq(6, 4)).overlays, vec![Overlay::LastMove]);
    }

    #[test]
    fn destination_markers_distinguish_captures() {
        let board = {
            let mut b = Board::standard();
            // Open up e4 as an empty destination while d7 stays occupied.
            b.move_piece(MovePair {
                from: sq(6, 4),
                to: sq(5, 4),
            });
            b
        };

        let moves = [sq(4, 4), sq(1, 3)];
        let scene = compose(&board, Some(sq(5, 4)), &moves, None, None);

        assert_eq!(scene.at(sq(4, 4)).marker, Some(MoveMarker::Dot));
        assert_eq!(scene.at(sq(1, 3)).marker, Some(MoveMarker::Ring));
        assert_eq!(scene.at(sq(4, 3)).marker, None);
    }

    #[test]
    fn only_white_glyphs_carry_the_outline() {
        let w = sq(4, 0);
        let b = sq(4, 1);
        let board = {
            let mut grid = vec![vec![None; 8]; 8];
            grid[4][0] = Some(Piece::new(PieceColor::White, PieceType::Queen));
            grid[4][1] = Some(Piece::new(PieceColor::Black, PieceType::Queen));
            Board::from_rows(&grid).unwrap()
        };

        let scene = compose(&board, None, &[], None, None);
        assert!(scene.at(w).glyph.unwrap().outlined);
        assert!(!scene.at(b).glyph.unwrap().outlined);
    }
}
