use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{GameStatus, MovePair, Piece, Square};

/// Body of `POST /game/{id}/moves/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovesRequest {
    pub row: u8,
    pub col: u8,
}

impl From<Square> for MovesRequest {
    fn from(square: Square) -> Self {
        Self {
            row: square.row,
            col: square.col,
        }
    }
}

/// Reply to the destination query. An absent `moves` array means none.
#[derive(Debug, Clone, Deserialize)]
pub struct MovesReply {
    #[serde(default)]
    pub moves: Vec<[u8; 2]>,
}

impl MovesReply {
    /// Keeps only in-range coordinates; the server owns legality, the client
    /// only guards its own indexing.
    pub fn into_squares(self) -> Vec<Square> {
        self.moves
            .into_iter()
            .filter_map(|[row, col]| Square::new(row, col))
            .collect()
    }
}

/// Body of `POST /game/{id}/move/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRequest {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
}

impl From<MovePair> for MoveRequest {
    fn from(mv: MovePair) -> Self {
        Self {
            from_row: mv.from.row,
            from_col: mv.from.col,
            to_row: mv.to.row,
            to_col: mv.to.col,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMove {
    pub from: [u8; 2],
    pub to: [u8; 2],
}

/// Raw reply to a move submission: either an `error` or the authoritative
/// state. Win and draw replies omit `in_check`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveReply {
    pub error: Option<String>,
    pub board: Option<Vec<Vec<Option<Piece>>>>,
    pub ai_move: Option<WireMove>,
    #[serde(default)]
    pub in_check: bool,
    pub status: Option<GameStatus>,
}

/// Validated outcome of an accepted move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub board: Board,
    pub ai_move: Option<MovePair>,
    pub in_check: bool,
    pub status: GameStatus,
}

impl MoveReply {
    pub fn into_outcome(self) -> Result<MoveOutcome, ServiceError> {
        if let Some(message) = self.error {
            return Err(ServiceError::Rejected(message));
        }

        let rows = self
            .board
            .ok_or_else(|| ServiceError::transport("move reply carried no board"))?;
        let board = Board::from_rows(&rows).map_err(ServiceError::Transport)?;

        let ai_move = match self.ai_move {
            None => None,
            Some(wire) => {
                let from = Square::new(wire.from[0], wire.from[1]);
                let to = Square::new(wire.to[0], wire.to[1]);
                match (from, to) {
                    (Some(from), Some(to)) => Some(MovePair { from, to }),
                    _ => return Err(ServiceError::transport("ai move out of range")),
                }
            }
        };

        let status = self
            .status
            .ok_or_else(|| ServiceError::transport("move reply carried no status"))?;

        Ok(MoveOutcome {
            board,
            ai_move,
            in_check: self.in_check,
            status,
        })
    }
}

/// The two failure kinds the status line distinguishes by message only:
/// the exchange never completed, or the server answered with an `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Transport(String),
    Rejected(String),
}

impl ServiceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "connection failed: {}", message),
            Self::Rejected(message) => write!(f, "{}", message),
        }
    }
}

/// The sync seam to the authoritative game service. Both operations block the
/// interaction layer until resolved; the controller holds its thinking gate
/// across each call.
#[allow(async_fn_in_trait)]
pub trait GameService {
    /// Legal destinations for the piece on `square`.
    async fn legal_destinations(&self, square: Square) -> Result<Vec<Square>, ServiceError>;

    /// Submits a move; on success returns the authoritative state including
    /// the opponent's reply.
    async fn submit_move(&self, request: MoveRequest) -> Result<MoveOutcome, ServiceError>;
}

/// Page-load snapshot injected by the host page instead of read from ambient
/// globals: starting board, game identifier, initial status, CSRF token.
#[derive(Debug, Clone, Deserialize)]
pub struct BootConfig {
    pub board: Vec<Vec<Option<Piece>>>,
    pub game_id: u64,
    pub status: GameStatus,
    pub csrf_token: String,
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use js_sys::JSON;
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    #[wasm_bindgen_test]
    fn boot_config_converts_from_a_js_object() {
        let row = "[null,null,null,null,null,null,null,null]";
        let json = format!(
            r#"{{"board":[{}],"game_id":7,"status":"draw","csrf_token":"abc"}}"#,
            vec![row; 8].join(",")
        );
        let value = JSON::parse(&json).unwrap();

        let config: BootConfig = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(config.game_id, 7);
        assert_eq!(config.status, GameStatus::Draw);
        assert_eq!(config.csrf_token, "abc");
        assert_eq!(config.board.len(), 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceColor, PieceType};

    #[test]
    fn moves_request_serializes_zero_indexed_coordinates() {
        let body = MovesRequest::from(Square::new(6, 4).unwrap());
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"row":6,"col":4}"#
        );
    }

    #[test]
    fn move_request_serializes_all_four_fields() {
        let mv = MovePair {
            from: Square::new(6, 4).unwrap(),
            to: Square::new(4, 4).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&MoveRequest::from(mv)).unwrap(),
            r#"{"from_row":6,"from_col":4,"to_row":4,"to_col":4}"#
        );
    }

    #[test]
    fn absent_moves_array_decodes_as_empty() {
        let reply: MovesReply = serde_json::from_str("{}").unwrap();
        assert!(reply.into_squares().is_empty());

        let reply: MovesReply = serde_json::from_str(r#"{"moves":[[5,4],[4,4]]}"#).unwrap();
        let squares = reply.into_squares();
        assert_eq!(squares.len(), 2);
        assert_eq!(squares[0], Square::new(5, 4).unwrap());
    }

    #[test]
    fn out_of_range_destinations_are_dropped() {
        let reply: MovesReply = serde_json::from_str(r#"{"moves":[[5,4],[9,4]]}"#).unwrap();
        assert_eq!(reply.into_squares(), vec![Square::new(5, 4).unwrap()]);
    }

    #[test]
    fn error_reply_becomes_rejection() {
        let reply: MoveReply = serde_json::from_str(r#"{"error":"Illegal move"}"#).unwrap();
        assert_eq!(
            reply.into_outcome(),
            Err(ServiceError::Rejected("Illegal move".into()))
        );
    }

    #[test]
    fn success_reply_decodes_board_ai_move_and_status() {
        let empty_row = r#"[null,null,null,null,null,null,null,null]"#;
        let rows: Vec<String> = (0..8)
            .map(|r| {
                if r == 4 {
                    r#"[null,null,null,null,{"color":"white","type":"pawn"},null,null,null]"#
                        .to_string()
                } else {
                    empty_row.to_string()
                }
            })
            .collect();
        let json = format!(
            r#"{{"board":[{}],"ai_move":{{"from":[1,4],"to":[3,4]}},"in_check":false,"status":"active"}}"#,
            rows.join(",")
        );

        let outcome: MoveOutcome = serde_json::from_str::<MoveReply>(&json)
            .unwrap()
            .into_outcome()
            .unwrap();

        assert_eq!(outcome.status, GameStatus::Active);
        assert!(!outcome.in_check);
        let reply_move = outcome.ai_move.unwrap();
        assert_eq!(reply_move.from, Square::new(1, 4).unwrap());
        assert_eq!(reply_move.to, Square::new(3, 4).unwrap());
        assert_eq!(
            outcome.board.piece_at(Square::new(4, 4).unwrap()),
            Some(Piece::new(PieceColor::White, PieceType::Pawn))
        );
    }

    #[test]
    fn terminal_reply_defaults_missing_in_check() {
        // The server omits in_check on win/draw replies.
        let row = "[null,null,null,null,null,null,null,null]";
        let json = format!(
            r#"{{"board":[{}],"ai_move":null,"status":"white_won"}}"#,
            vec![row; 8].join(",")
        );

        let outcome = serde_json::from_str::<MoveReply>(&json)
            .unwrap()
            .into_outcome()
            .unwrap();
        assert_eq!(outcome.status, GameStatus::WhiteWon);
        assert!(!outcome.in_check);
        assert!(outcome.ai_move.is_none());
    }

    #[test]
    fn malformed_success_reply_is_a_transport_error() {
        let reply: MoveReply = serde_json::from_str(r#"{"status":"active"}"#).unwrap();
        assert!(matches!(
            reply.into_outcome(),
            Err(ServiceError::Transport(_))
        ));

        let bad_grid = r#"{"board":[[null]],"status":"active"}"#;
        let reply: MoveReply = serde_json::from_str(bad_grid).unwrap();
        assert!(matches!(
            reply.into_outcome(),
            Err(ServiceError::Transport(_))
        ));
    }

    #[test]
    fn boot_config_parses_host_page_snapshot() {
        let row = "[null,null,null,null,null,null,null,null]";
        let json = format!(
            r#"{{"board":[{}],"game_id":42,"status":"active","csrf_token":"tok"}}"#,
            vec![row; 8].join(",")
        );
        let config: BootConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.game_id, 42);
        assert_eq!(config.status, GameStatus::Active);
        assert_eq!(config.csrf_token, "tok");
    }
}
