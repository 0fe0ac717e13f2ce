use crate::scene::{BOARD_PIXELS, SQUARE_PIXELS};
use crate::types::{Piece, PieceColor, Square};

/// Maps a pointer position (relative to the displayed canvas) to a board
/// square. The canvas may be scaled by CSS, so the displayed size is mapped
/// linearly onto the logical drawing surface before the floor division.
/// Anything landing outside the 8x8 grid is `None`.
pub fn point_to_square(x: f64, y: f64, rect_width: f64, rect_height: f64) -> Option<Square> {
    if rect_width <= 0.0 || rect_height <= 0.0 {
        return None;
    }

    let logical_x = x * BOARD_PIXELS / rect_width;
    let logical_y = y * BOARD_PIXELS / rect_height;
    if logical_x < 0.0 || logical_y < 0.0 {
        return None;
    }

    let col = (logical_x / SQUARE_PIXELS).floor();
    let row = (logical_y / SQUARE_PIXELS).floor();
    if row > 7.0 || col > 7.0 {
        return None;
    }

    Square::new(row as u8, col as u8)
}

/// The two-click interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Selected(Square),
}

impl Selection {
    pub fn square(self) -> Option<Square> {
        match self {
            Self::Idle => None,
            Self::Selected(square) => Some(square),
        }
    }
}

/// Named transition out of a board click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTransition {
    /// Empty or opponent square clicked while idle.
    Ignored,
    /// Own piece clicked while idle.
    Select(Square),
    /// Another own piece clicked while one was already selected.
    Reselect(Square),
    /// Selected, but the click was neither a destination nor an own piece.
    Deselect,
    /// A square from the valid-move set was clicked.
    Submit { from: Square, to: Square },
}

/// Classifies a click against the interaction machine. Pure: board geometry
/// and network effects stay with the caller.
pub fn classify_click(
    selection: Selection,
    clicked: Square,
    occupant: Option<Piece>,
    valid_moves: &[Square],
) -> ClickTransition {
    let own_piece = occupant.is_some_and(|p| p.color == PieceColor::White);

    match selection {
        Selection::Idle => {
            if own_piece {
                ClickTransition::Select(clicked)
            } else {
                ClickTransition::Ignored
            }
        }
        Selection::Selected(from) => {
            if valid_moves.contains(&clicked) {
                ClickTransition::Submit { from, to: clicked }
            } else if own_piece {
                ClickTransition::Reselect(clicked)
            } else {
                ClickTransition::Deselect
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn white(kind: PieceType) -> Option<Piece> {
        Some(Piece::new(PieceColor::White, kind))
    }

    fn black(kind: PieceType) -> Option<Piece> {
        Some(Piece::new(PieceColor::Black, kind))
    }

    #[test]
    fn pointer_maps_at_native_resolution() {
        assert_eq!(point_to_square(0.0, 0.0, 560.0, 560.0), Some(sq(0, 0)));
        assert_eq!(point_to_square(69.9, 0.0, 560.0, 560.0), Some(sq(0, 0)));
        assert_eq!(point_to_square(70.0, 0.0, 560.0, 560.0), Some(sq(0, 1)));
        assert_eq!(point_to_square(315.0, 455.0, 560.0, 560.0), Some(sq(6, 4)));
    }

    #[test]
    fn pointer_maps_through_css_scaling() {
        // Canvas displayed at half size: displayed pixel 35 is logical 70.
        assert_eq!(point_to_square(34.9, 0.0, 280.0, 280.0), Some(sq(0, 0)));
        assert_eq!(point_to_square(35.0, 0.0, 280.0, 280.0), Some(sq(0, 1)));
        // Non-uniform stretch scales each axis independently.
        assert_eq!(point_to_square(139.9, 70.0, 1120.0, 560.0), Some(sq(1, 0)));
    }

    #[test]
    fn pointer_outside_board_is_ignored() {
        assert_eq!(point_to_square(-1.0, 100.0, 560.0, 560.0), None);
        assert_eq!(point_to_square(100.0, -0.1, 560.0, 560.0), None);
        assert_eq!(point_to_square(560.0, 0.0, 560.0, 560.0), None);
        assert_eq!(point_to_square(0.0, 600.0, 560.0, 560.0), None);
        assert_eq!(point_to_square(10.0, 10.0, 0.0, 560.0), None);
    }

    #[test]
    fn idle_click_selects_only_own_pieces() {
        let target = sq(6, 4);

        assert_eq!(
            classify_click(Selection::Idle, target, white(PieceType::Pawn), &[]),
            ClickTransition::Select(target)
        );
        assert_eq!(
            classify_click(Selection::Idle, target, black(PieceType::Pawn), &[]),
            ClickTransition::Ignored
        );
        assert_eq!(
            classify_click(Selection::Idle, target, None, &[]),
            ClickTransition::Ignored
        );
    }

    #[test]
    fn selected_click_on_destination_submits() {
        let from = sq(6, 4);
        let to = sq(4, 4);
        let moves = [sq(5, 4), to];

        assert_eq!(
            classify_click(Selection::Selected(from), to, None, &moves),
            ClickTransition::Submit { from, to }
        );
    }

    #[test]
    fn capture_destination_beats_reselection_rules() {
        // An opponent piece inside the valid-move set is a capture, not a
        // deselection.
        let from = sq(6, 4);
        let to = sq(5, 3);

        assert_eq!(
            classify_click(Selection::Selected(from), to, black(PieceType::Pawn), &[to]),
            ClickTransition::Submit { from, to }
        );
    }

    #[test]
    fn selected_click_on_own_piece_reselects() {
        let from = sq(6, 4);
        let other = sq(7, 6);

        assert_eq!(
            classify_click(
                Selection::Selected(from),
                other,
                white(PieceType::Knight),
                &[sq(5, 4)]
            ),
            ClickTransition::Reselect(other)
        );
    }

    #[test]
    fn selected_click_elsewhere_deselects() {
        let from = sq(6, 4);

        assert_eq!(
            classify_click(Selection::Selected(from), sq(3, 3), None, &[sq(5, 4)]),
            ClickTransition::Deselect
        );
        assert_eq!(
            classify_click(
                Selection::Selected(from),
                sq(1, 1),
                black(PieceType::Knight),
                &[sq(5, 4)]
            ),
            ClickTransition::Deselect
        );
    }
}
