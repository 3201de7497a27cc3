//! Drag-and-drop gesture state machine for one project board.
//!
//! The board knows nothing about rendering. The UI feeds it pointer events
//! (`pick_up`, `hover`, `leave`, `drop_task`, `cancel`) and reads back the
//! current [`GestureState`] and placeholder position. A drop onto another
//! kanban yields a [`PendingMove`] that holds the board's in-flight slot
//! until it is dropped, so at most one move per board is ever outstanding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

/// Where the current drag gesture stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging {
        task_id: String,
        source: String,
    },
    HoveringTarget {
        task_id: String,
        source: String,
        target: String,
    },
    /// Released over `target`; rests here until [`Board::settle`].
    Dropped {
        task_id: String,
        source: String,
        target: String,
    },
}

impl GestureState {
    fn label(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Dragging { .. } => "dragging",
            GestureState::HoveringTarget { .. } => "hovering",
            GestureState::Dropped { .. } => "dropped",
        }
    }
}

/// Errors from feeding an event the current state cannot take.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    #[error("cannot {event} while {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

/// Parameters of a remote move, as sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCommand {
    pub task_id: String,
    pub team_id: String,
    pub project_id: String,
    pub kanban_id_from: String,
    pub kanban_id_to: String,
}

/// A move that may be sent. Keeps the board busy until dropped.
#[derive(Debug)]
pub struct PendingMove {
    command: MoveCommand,
    _slot: InFlightSlot,
}

impl PendingMove {
    pub fn command(&self) -> &MoveCommand {
        &self.command
    }
}

/// Outcome of releasing a dragged task.
#[derive(Debug)]
pub enum DropOutcome {
    /// Send this move; the board is busy until it is dropped.
    Move(PendingMove),
    /// Released over its own kanban.
    SameKanban,
    /// Another move on this board is still in flight.
    Busy,
    /// Released outside any kanban.
    NoTarget,
}

#[derive(Debug)]
struct InFlightSlot {
    flag: Arc<AtomicBool>,
}

impl InFlightSlot {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Gesture state and in-flight flag for one project board.
#[derive(Debug)]
pub struct Board {
    team_id: String,
    project_id: String,
    state: GestureState,
    in_flight: Arc<AtomicBool>,
}

impl Board {
    pub fn new(team_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            project_id: project_id.into(),
            state: GestureState::Idle,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a move request from this board is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Kanban that should render the drop placeholder, if any.
    pub fn placeholder(&self) -> Option<&str> {
        match &self.state {
            GestureState::HoveringTarget { source, target, .. } if source != target => {
                Some(target)
            }
            _ => None,
        }
    }

    /// Start dragging `task_id` out of `source`.
    pub fn pick_up(
        &mut self,
        task_id: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), GestureError> {
        match self.state {
            GestureState::Idle | GestureState::Dropped { .. } => {
                self.transition(GestureState::Dragging {
                    task_id: task_id.into(),
                    source: source.into(),
                });
                Ok(())
            }
            _ => Err(self.invalid("pick up")),
        }
    }

    /// The dragged task is over `target`.
    pub fn hover(&mut self, target: impl Into<String>) -> Result<(), GestureError> {
        let next = match &self.state {
            GestureState::Dragging { task_id, source }
            | GestureState::HoveringTarget {
                task_id, source, ..
            } => GestureState::HoveringTarget {
                task_id: task_id.clone(),
                source: source.clone(),
                target: target.into(),
            },
            _ => return Err(self.invalid("hover")),
        };
        self.transition(next);
        Ok(())
    }

    /// The dragged task left every kanban.
    pub fn leave(&mut self) -> Result<(), GestureError> {
        let next = match &self.state {
            GestureState::HoveringTarget {
                task_id, source, ..
            } => GestureState::Dragging {
                task_id: task_id.clone(),
                source: source.clone(),
            },
            GestureState::Dragging { .. } => return Ok(()),
            _ => return Err(self.invalid("leave")),
        };
        self.transition(next);
        Ok(())
    }

    /// Release the dragged task.
    ///
    /// Only a release over a different kanban while no move is in flight
    /// produces [`DropOutcome::Move`]; every other outcome returns to idle.
    pub fn drop_task(&mut self) -> Result<DropOutcome, GestureError> {
        if matches!(self.state, GestureState::Dragging { .. }) {
            self.transition(GestureState::Idle);
            return Ok(DropOutcome::NoTarget);
        }
        let GestureState::HoveringTarget {
            task_id,
            source,
            target,
        } = self.state.clone()
        else {
            return Err(self.invalid("drop"));
        };

        if source == target {
            self.transition(GestureState::Idle);
            return Ok(DropOutcome::SameKanban);
        }

        let Some(slot) = InFlightSlot::acquire(&self.in_flight) else {
            debug!(%task_id, "Drop ignored, a move is already in flight");
            self.transition(GestureState::Idle);
            return Ok(DropOutcome::Busy);
        };

        let command = MoveCommand {
            task_id: task_id.clone(),
            team_id: self.team_id.clone(),
            project_id: self.project_id.clone(),
            kanban_id_from: source.clone(),
            kanban_id_to: target.clone(),
        };
        self.transition(GestureState::Dropped {
            task_id,
            source,
            target,
        });

        Ok(DropOutcome::Move(PendingMove {
            command,
            _slot: slot,
        }))
    }

    /// Abort the gesture without moving anything.
    pub fn cancel(&mut self) {
        self.transition(GestureState::Idle);
    }

    /// Return a dropped gesture to idle once its move has resolved.
    pub fn settle(&mut self) {
        if matches!(self.state, GestureState::Dropped { .. }) {
            self.transition(GestureState::Idle);
        }
    }

    fn transition(&mut self, next: GestureState) {
        debug!(from = self.state.label(), to = next.label(), "Gesture transition");
        self.state = next;
    }

    fn invalid(&self, event: &'static str) -> GestureError {
        GestureError::InvalidTransition {
            from: self.state.label(),
            event,
        }
    }
}
