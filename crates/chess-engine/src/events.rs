//! Game events and their synchronous fan-out.
//!
//! Listeners run in registration order on the caller's thread, after the
//! game has committed the change they describe. A listener only receives a
//! shared reference to the event.
//!
//! Listeners must not mutate the emitting [`Game`] or its listener set from
//! inside a callback. The borrow checker rules this out when the game is
//! owned directly, since emitting holds `&mut Game`. It does not rule it out
//! when the game lives behind shared ownership such as `Rc<RefCell<Game>>`:
//! a listener that captures that handle and borrows it during fan-out will
//! panic with a `BorrowMutError`. Record what you need in the callback and
//! act on it after the call that emitted the event returns.
//!
//! [`Game`]: crate::Game

use std::fmt;

use chess_core::Move;

use crate::rules::GameStatus;
use crate::GameState;

/// Something that happened to a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was accepted.
    MoveMade { mv: Move, new_state: GameState },
    /// The last move was taken back; carries the restored state.
    MoveUndone { previous_state: GameState },
    /// A game was started or loaded.
    GameStarted { state: GameState },
    /// A move ended the game.
    GameOver { status: GameStatus },
}

impl GameEvent {
    /// A short kebab-case name for the event, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::MoveMade { .. } => "move-made",
            GameEvent::MoveUndone { .. } => "move-undone",
            GameEvent::GameStarted { .. } => "game-started",
            GameEvent::GameOver { .. } => "game-over",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// An ordered set of listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It will see every event emitted from now on,
    /// after all listeners registered before it.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Delivers `event` to every listener in registration order.
    pub fn emit(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
