//! The game engine.
//!
//! [`Game`] owns the current [`GameState`] and an [`EventBus`]. Every
//! mutation goes through it: moves are checked, executed, recorded, and
//! announced; undo restores the state recorded before the last move.

use chess_core::{Color, FenError, Move, Square};

use crate::error::{MoveError, StateError, UndoError};
use crate::events::{EventBus, GameEvent, ListenerId};
use crate::execute::{is_valid_promotion, play, requires_promotion};
use crate::rules::{self, GameStatus};
use crate::state::{MoveRecord, PendingPromotion};
use crate::validate::{all_legal_moves, is_legal_move, legal_moves_for_piece};
use crate::{json, GameState, Position};

/// A chess game with history, undo, and change notifications.
#[derive(Debug, Default)]
pub struct Game {
    state: GameState,
    events: EventBus,
}

impl Game {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        Game {
            state: GameState::from_position(position),
            events: EventBus::new(),
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.state.position
    }

    /// Returns the side to move.
    pub fn current_player(&self) -> Color {
        self.state.current_player()
    }

    /// Returns where the game stands.
    pub fn game_status(&self) -> GameStatus {
        rules::game_status(&self.state)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        rules::is_check(&self.state.position, self.current_player())
    }

    /// Returns the legal moves of the piece on `square`.
    ///
    /// Empty if the square is empty, holds a piece of the side not to move,
    /// or the game is over.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        let position = &self.state.position;
        let owned = position
            .board
            .piece_at(square)
            .is_some_and(|p| p.color == position.side_to_move);
        if !owned || self.game_status().is_terminal() {
            return Vec::new();
        }
        legal_moves_for_piece(position, square).to_vec()
    }

    /// Returns every legal move for the side to move; empty once the game is
    /// over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.game_status().is_terminal() {
            return Vec::new();
        }
        all_legal_moves(&self.state.position).to_vec()
    }

    /// Returns the moves played so far, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.state.move_history
    }

    /// Returns the current position as FEN.
    pub fn fen(&self) -> String {
        self.state.position.to_fen()
    }

    /// If moving the side to move's pawn from `from` to `to` needs a
    /// promotion piece, returns the pending promotion to complete.
    pub fn pending_promotion(&self, from: Square, to: Square) -> Option<PendingPromotion> {
        let piece = self.state.position.board.piece_at(from)?;
        let pending = piece.color == self.current_player() && requires_promotion(piece, to);
        pending.then_some(PendingPromotion {
            from,
            to,
            color: piece.color,
        })
    }

    /// Plays a move.
    ///
    /// Checks, in order: the game is not over, the origin holds a piece, the
    /// piece belongs to the side to move, a promoting pawn names a valid
    /// piece, and the move is legal. On success the new state is committed,
    /// a [`GameEvent::MoveMade`] is emitted, and a [`GameEvent::GameOver`]
    /// follows if the move ended the game.
    pub fn make_move(&mut self, mv: Move) -> Result<&GameState, MoveError> {
        if let Err(e) = self.check_move(mv) {
            tracing::trace!(mv = %mv, error = %e, "move rejected");
            return Err(e);
        }

        let position = &self.state.position;
        let (next, exec) = play(position, mv).ok_or(MoveError::NoPiece)?;
        let opponent = next.side_to_move;
        let is_check = rules::is_check(&next, opponent);
        let record = MoveRecord {
            mv,
            piece: exec.piece,
            captured: exec.captured,
            is_check,
            is_checkmate: is_check && rules::is_checkmate(&next),
            castling: exec.castling,
            is_en_passant: exec.is_en_passant,
            before: position.clone(),
        };

        self.state.position_history.push(next.key());
        self.state.move_history.push(record);
        self.state.position = next;

        tracing::debug!(mv = %mv, fen = %self.state.position.to_fen(), "move made");
        self.events.emit(&GameEvent::MoveMade {
            mv,
            new_state: self.state.clone(),
        });

        let status = self.game_status();
        if status.is_terminal() {
            tracing::info!(%status, plies = self.state.move_history.len(), "game over");
            self.events.emit(&GameEvent::GameOver { status });
        }

        Ok(&self.state)
    }

    /// Plays a move given in UCI notation (`e2e4`, `e7e8q`).
    ///
    /// Unparsable text is reported as [`MoveError::IllegalMove`].
    pub fn make_move_uci(&mut self, uci: &str) -> Result<&GameState, MoveError> {
        let mv = Move::from_uci(uci).ok_or(MoveError::IllegalMove)?;
        self.make_move(mv)
    }

    fn check_move(&self, mv: Move) -> Result<(), MoveError> {
        if self.game_status().is_terminal() {
            return Err(MoveError::GameOver);
        }
        let position = &self.state.position;
        let piece = position.board.piece_at(mv.from).ok_or(MoveError::NoPiece)?;
        if piece.color != position.side_to_move {
            return Err(MoveError::WrongColor);
        }
        if !is_valid_promotion(piece, mv) {
            return Err(MoveError::IllegalMove);
        }
        if !is_legal_move(position, mv) {
            return Err(MoveError::IllegalMove);
        }
        Ok(())
    }

    /// Resets to the standard starting position and emits
    /// [`GameEvent::GameStarted`]. Listeners stay registered.
    pub fn new_game(&mut self) -> &GameState {
        self.state = GameState::initial();
        tracing::info!("new game started");
        self.events.emit(&GameEvent::GameStarted {
            state: self.state.clone(),
        });
        &self.state
    }

    /// Takes back the last move, restoring the state recorded before it,
    /// and emits [`GameEvent::MoveUndone`].
    pub fn undo_move(&mut self) -> Result<&GameState, UndoError> {
        let Some(previous) = self.state.previous() else {
            tracing::trace!("undo rejected: no moves");
            return Err(UndoError::NoMovesToUndo);
        };
        self.state = previous;
        tracing::debug!(fen = %self.state.position.to_fen(), "move undone");
        self.events.emit(&GameEvent::MoveUndone {
            previous_state: self.state.clone(),
        });
        Ok(&self.state)
    }

    /// Returns true if there is a move to take back.
    pub fn can_undo(&self) -> bool {
        !self.state.move_history.is_empty()
    }

    /// Registers a listener for game events.
    ///
    /// Listeners run synchronously in registration order and must not call
    /// back into this game. See [`crate::events`] for details.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Serializes the current state. Move history is not included.
    pub fn to_json(&self) -> String {
        json::to_json(&self.state)
    }

    /// Serializes the current state as indented JSON.
    pub fn to_json_pretty(&self) -> String {
        json::to_json_pretty(&self.state)
    }

    /// Replaces the current state with a serialized one and emits
    /// [`GameEvent::GameStarted`].
    ///
    /// On error the current state is left untouched. The loaded state starts
    /// with an empty move history, so its moves cannot be undone.
    pub fn from_json(&mut self, json: &str) -> Result<&GameState, StateError> {
        let loaded = json::from_json(json).map_err(|e| {
            tracing::trace!(error = %e, "state rejected");
            e
        })?;
        self.state = loaded;
        tracing::info!(fen = %self.state.position.to_fen(), "game loaded");
        self.events.emit(&GameEvent::GameStarted {
            state: self.state.clone(),
        });
        Ok(&self.state)
    }
}
