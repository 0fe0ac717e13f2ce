use crate::scene::BoardScene;
use crate::types::{GameStatus, MoveRecord, Piece, PieceColor};

/// CSS tone class applied to the status box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Check,
    Win,
    Lose,
    Draw,
}

impl StatusTone {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "",
            Self::Check => "check",
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Draw => "draw",
        }
    }
}

/// One line of the status area: icon, message, tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub icon: &'static str,
    pub text: String,
    pub tone: StatusTone,
}

impl StatusLine {
    fn neutral(icon: &'static str, text: impl Into<String>) -> Self {
        Self {
            icon,
            text: text.into(),
            tone: StatusTone::Neutral,
        }
    }

    pub fn pick_a_piece() -> Self {
        Self::neutral("♟", "Your turn — select a white piece")
    }

    pub fn your_turn() -> Self {
        Self::neutral("♟", "Your turn — select a piece")
    }

    pub fn loading_moves() -> Self {
        Self::neutral("⏳", "Loading moves...")
    }

    /// Count-based report for a destination query; zero results get their own
    /// message.
    pub fn moves_available(count: usize) -> Self {
        if count == 0 {
            Self::neutral("⚠️", "No legal moves for this piece")
        } else {
            Self::neutral("✅", format!("{} moves available", count))
        }
    }

    pub fn thinking() -> Self {
        Self::neutral("🤔", "AI is thinking...")
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::neutral("❌", message)
    }

    pub fn connection_error() -> Self {
        Self::neutral("❌", "Connection error")
    }

    pub fn connection_error_on_move() -> Self {
        Self::neutral("❌", "Connection error. Please refresh.")
    }

    pub fn check_warning() -> Self {
        Self {
            icon: "⚠️",
            text: "Check! Protect your king!".into(),
            tone: StatusTone::Check,
        }
    }

    pub fn won() -> Self {
        Self {
            icon: "🏆",
            text: "Checkmate! You won!".into(),
            tone: StatusTone::Win,
        }
    }

    pub fn lost() -> Self {
        Self {
            icon: "😔",
            text: "Checkmate! You lost!".into(),
            tone: StatusTone::Lose,
        }
    }

    pub fn draw() -> Self {
        Self {
            icon: "🤝",
            text: "Stalemate! Draw!".into(),
            tone: StatusTone::Draw,
        }
    }

    /// Page-load wording for a game that was already finished.
    pub fn finished_earlier(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Active => None,
            GameStatus::WhiteWon => Some(Self {
                icon: "🏆",
                text: "You won this game!".into(),
                tone: StatusTone::Win,
            }),
            GameStatus::BlackWon => Some(Self {
                icon: "😔",
                text: "You lost this game!".into(),
                tone: StatusTone::Lose,
            }),
            GameStatus::Draw => Some(Self {
                icon: "🤝",
                text: "This game was a draw!".into(),
                tone: StatusTone::Draw,
            }),
        }
    }
}

/// Content of the game-over modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverNotice {
    pub icon: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

impl GameOverNotice {
    /// Modal shown when the terminal status arrives in a move response.
    pub fn for_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Active => None,
            GameStatus::WhiteWon => Some(Self {
                icon: "🏆",
                title: "You Won!",
                message: "Checkmate — the AI has no escape!",
            }),
            GameStatus::BlackWon => Some(Self {
                icon: "😔",
                title: "You Lost!",
                message: "Checkmate — your king is trapped!",
            }),
            GameStatus::Draw => Some(Self {
                icon: "🤝",
                title: "Draw!",
                message: "Stalemate — no legal moves available!",
            }),
        }
    }

    /// Shorter wording when the page loads onto an already-finished game.
    pub fn for_finished_game(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Active => None,
            GameStatus::WhiteWon => Some(Self {
                icon: "🏆",
                title: "You Won!",
                message: "Checkmate!",
            }),
            GameStatus::BlackWon => Some(Self {
                icon: "😔",
                title: "You Lost!",
                message: "Checkmate!",
            }),
            GameStatus::Draw => Some(Self {
                icon: "🤝",
                title: "Draw!",
                message: "Stalemate!",
            }),
        }
    }
}

/// Presentation boundary. The controller mutates state and pushes the result
/// through this trait; nothing behind it is consulted for decisions, so the
/// interaction and sync logic test against a recording fake.
pub trait View {
    fn render_board(&mut self, scene: &BoardScene);
    fn set_status(&mut self, line: &StatusLine);
    /// Highlights the turn card for the given side.
    fn set_turn(&mut self, side: PieceColor);
    /// Replaces the whole move-history panel.
    fn set_history(&mut self, records: &[MoveRecord]);
    /// Capture tallies: pieces white has taken, then pieces black has taken.
    fn set_captured(&mut self, by_white: &[Piece], by_black: &[Piece]);
    fn show_game_over(&mut self, notice: &GameOverNotice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_counts_are_reported_exactly() {
        assert_eq!(StatusLine::moves_available(2).text, "2 moves available");
        assert_eq!(StatusLine::moves_available(17).text, "17 moves available");
        assert_eq!(
            StatusLine::moves_available(0).text,
            "No legal moves for this piece"
        );
    }

    #[test]
    fn terminal_statuses_map_to_modals() {
        assert!(GameOverNotice::for_status(GameStatus::Active).is_none());
        assert_eq!(
            GameOverNotice::for_status(GameStatus::BlackWon).unwrap().title,
            "You Lost!"
        );
        assert_eq!(
            GameOverNotice::for_finished_game(GameStatus::Draw)
                .unwrap()
                .message,
            "Stalemate!"
        );
    }

    #[test]
    fn tone_classes_match_stylesheet_names() {
        assert_eq!(StatusLine::won().tone.css_class(), "win");
        assert_eq!(StatusLine::check_warning().tone.css_class(), "check");
        assert_eq!(StatusLine::your_turn().tone.css_class(), "");
    }
}
