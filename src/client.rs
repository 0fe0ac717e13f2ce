use crate::board::{Board, reconcile_captures};
use crate::input::{ClickTransition, Selection, classify_click};
use crate::protocol::{GameService, MoveRequest, ServiceError};
use crate::scene;
use crate::types::{GameStatus, MovePair, MoveRecord, Piece, PieceColor, Square};
use crate::view::{GameOverNotice, StatusLine, View};

/// State captured before an optimistic move so a rejected or failed
/// submission can be rolled back instead of leaving the board diverged from
/// server truth.
struct PendingSnapshot {
    board: Board,
    last_move: Option<MovePair>,
    in_check: bool,
    captured_len: usize,
    history_len: usize,
}

/// The single controller instance owning all tab-session game state. The
/// server stays authoritative for rules and outcomes; this only mutates a
/// local snapshot for responsiveness and displays what the server reports.
pub struct GameClient<S: GameService, V: View> {
    service: S,
    view: V,
    board: Board,
    selection: Selection,
    valid_moves: Vec<Square>,
    last_move: Option<MovePair>,
    captured_by_white: Vec<Piece>,
    captured_by_black: Vec<Piece>,
    history: Vec<MoveRecord>,
    in_check: bool,
    game_over: bool,
    thinking: bool,
}

impl<S: GameService, V: View> GameClient<S, V> {
    /// Builds the controller from the page-load snapshot and paints the
    /// initial frame. A game that was already finished when the page loaded
    /// comes up frozen with the modal shown.
    pub fn new(service: S, view: V, board: Board, status: GameStatus) -> Self {
        let mut client = Self {
            service,
            view,
            board,
            selection: Selection::Idle,
            valid_moves: Vec::new(),
            last_move: None,
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
            history: Vec::new(),
            in_check: false,
            game_over: status.is_terminal(),
            thinking: false,
        };

        client.refresh_board();
        client.view.set_turn(PieceColor::White);
        client.view.set_history(&client.history);
        client
            .view
            .set_captured(&client.captured_by_white, &client.captured_by_black);

        if let Some(notice) = GameOverNotice::for_finished_game(status) {
            client.view.show_game_over(&notice);
            if let Some(line) = StatusLine::finished_earlier(status) {
                client.view.set_status(&line);
            }
        } else {
            client.view.set_status(&StatusLine::pick_a_piece());
        }

        client
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Entry point for a mapped board click. All input is dropped while a
    /// request is in flight or after the game reached a terminal status.
    pub async fn handle_click(&mut self, square: Square) {
        if self.thinking || self.game_over {
            return;
        }

        let transition = classify_click(
            self.selection,
            square,
            self.board.piece_at(square),
            &self.valid_moves,
        );

        match transition {
            ClickTransition::Ignored => {}
            ClickTransition::Select(sq) | ClickTransition::Reselect(sq) => {
                self.select_square(sq).await;
            }
            ClickTransition::Deselect => {
                self.selection = Selection::Idle;
                self.valid_moves.clear();
                self.refresh_board();
                self.view.set_status(&StatusLine::your_turn());
            }
            ClickTransition::Submit { from, to } => {
                self.submit_move(MovePair { from, to }).await;
            }
        }
    }

    /// Queries legal destinations for the piece on `square`. On failure the
    /// selection stays intact so the user can retry by clicking again.
    async fn select_square(&mut self, square: Square) {
        self.selection = Selection::Selected(square);
        self.valid_moves.clear();
        self.refresh_board();
        self.view.set_status(&StatusLine::loading_moves());

        self.thinking = true;
        let result = self.service.legal_destinations(square).await;
        self.thinking = false;

        match result {
            Ok(moves) => {
                let count = moves.len();
                self.valid_moves = moves;
                self.refresh_board();
                self.view.set_status(&StatusLine::moves_available(count));
            }
            Err(ServiceError::Rejected(message)) => {
                self.view.set_status(&StatusLine::rejected(message));
            }
            Err(ServiceError::Transport(_)) => {
                self.view.set_status(&StatusLine::connection_error());
            }
        }
    }

    /// Applies the move optimistically, then submits it. The server response
    /// wholesale-replaces the local board; any error restores the snapshot.
    async fn submit_move(&mut self, mv: MovePair) {
        let snapshot = PendingSnapshot {
            board: self.board,
            last_move: self.last_move,
            in_check: self.in_check,
            captured_len: self.captured_by_white.len(),
            history_len: self.history.len(),
        };

        if let Some(captured) = self.board.move_piece(mv) {
            self.captured_by_white.push(captured);
        }
        self.last_move = Some(mv);
        self.selection = Selection::Idle;
        self.valid_moves.clear();
        self.in_check = false;
        self.history.push(MoveRecord::new(
            self.history.len() as u32 + 1,
            PieceColor::White,
            mv.from,
            mv.to,
        ));

        self.refresh_board();
        self.view
            .set_captured(&self.captured_by_white, &self.captured_by_black);
        self.view.set_history(&self.history);
        self.view.set_status(&StatusLine::thinking());
        self.view.set_turn(PieceColor::Black);

        self.thinking = true;
        let result = self.service.submit_move(MoveRequest::from(mv)).await;
        self.thinking = false;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                self.rollback(snapshot);
                let line = match error {
                    ServiceError::Rejected(message) => StatusLine::rejected(message),
                    ServiceError::Transport(_) => StatusLine::connection_error_on_move(),
                };
                self.view.set_status(&line);
                self.view.set_turn(PieceColor::White);
                return;
            }
        };

        self.board = outcome.board;
        if let Some(reply) = outcome.ai_move {
            self.last_move = Some(reply);
            self.history.push(MoveRecord::new(
                self.history.len() as u32 + 1,
                PieceColor::Black,
                reply.from,
                reply.to,
            ));
        }
        self.in_check = outcome.in_check;

        // The authoritative board settles both tallies; the optimistic guess
        // cannot account for en passant or promotion captures.
        self.captured_by_white =
            reconcile_captures(&self.board, PieceColor::Black, &self.captured_by_white);
        self.captured_by_black =
            reconcile_captures(&self.board, PieceColor::White, &self.captured_by_black);

        self.refresh_board();
        self.view
            .set_captured(&self.captured_by_white, &self.captured_by_black);
        self.view.set_history(&self.history);

        if let Some(notice) = GameOverNotice::for_status(outcome.status) {
            self.game_over = true;
            self.view.show_game_over(&notice);
            let line = match outcome.status {
                GameStatus::WhiteWon => StatusLine::won(),
                GameStatus::BlackWon => StatusLine::lost(),
                _ => StatusLine::draw(),
            };
            self.view.set_status(&line);
            return;
        }

        if self.in_check {
            self.view.set_status(&StatusLine::check_warning());
        } else {
            self.view.set_status(&StatusLine::your_turn());
        }
        self.view.set_turn(PieceColor::White);
    }

    fn rollback(&mut self, snapshot: PendingSnapshot) {
        self.board = snapshot.board;
        self.last_move = snapshot.last_move;
        self.in_check = snapshot.in_check;
        self.captured_by_white.truncate(snapshot.captured_len);
        self.history.truncate(snapshot.history_len);

        self.refresh_board();
        self.view
            .set_captured(&self.captured_by_white, &self.captured_by_black);
        self.view.set_history(&self.history);
    }

    fn refresh_board(&mut self) {
        let check_square = if self.in_check {
            self.board.white_king()
        } else {
            None
        };
        let plan = scene::compose(
            &self.board,
            self.selection.square(),
            &self.valid_moves,
            self.last_move,
            check_square,
        );
        self.view.render_board(&plan);
    }
}
