//! Turn-based match state machine.
//!
//! A match owns one board and two agents and drives the alternating ply loop
//! on a dedicated worker thread. The board is exclusively owned and mutated
//! by that thread; agents only ever see immutable `State` snapshots.
//! Cancellation is cooperative and checked between plies, and `interrupt`
//! joins the worker before returning, so no board mutation or notification
//! can happen after it returns. The worker owns the event sender, so its
//! exit, clean or panicked, always disconnects the subscriber. An optional
//! ply limit is enforced inside the loop itself, making the bound exact.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::agents::agent_trait::Agent;
use crate::chess_errors::ChessErrors;
use crate::game::board::Board;
use crate::game::chess_move::Move;
use crate::game::chess_types::Color;
use crate::game::state::State;
use crate::movegen::generator::moves_for_color;
use crate::utils::algebraic::move_to_long_algebraic;

/// Lifecycle states. `Finished` and `Interrupted` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLifecycle {
    Prepared,
    Ongoing,
    /// A king was captured; the match has a winner.
    Finished,
    /// Cancelled, drawn, or resolved by an agent fault; no winner.
    Interrupted,
}

impl MatchLifecycle {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, MatchLifecycle::Finished | MatchLifecycle::Interrupted)
    }
}

/// How a match reached its terminal lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// `winner` captured the opposing king.
    KingCaptured { winner: Color },
    /// Only the two kings remained after a full ply.
    KingsOnlyDraw,
    /// Cooperative cancellation was observed between plies.
    Cancelled,
    /// The configured ply limit was reached before a terminal piece count.
    PlyLimitReached,
    /// The side to move had no legal moves; resolved as a no-winner draw.
    Stalled { side: Color },
    /// An agent failed, panicked, or returned a move outside the legal set.
    AgentFault { side: Color, error: ChessErrors },
}

/// Notifications delivered to the (at most one) subscriber, strictly in the
/// order they occurred.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    BoardChanged {
        mover: Color,
        played: Move,
        /// Long-algebraic text of `played`, rendered before application.
        notation: String,
        board: Board,
    },
    LifecycleChanged(MatchLifecycle),
}

struct MatchShared {
    cancel: AtomicBool,
    lifecycle: Mutex<MatchLifecycle>,
    winner: Mutex<Option<Color>>,
    outcome: Mutex<Option<MatchOutcome>>,
    current_player: Mutex<Color>,
    subscriber: Mutex<Option<Sender<MatchEvent>>>,
}

fn send_event(sender: Option<&Sender<MatchEvent>>, event: MatchEvent) {
    if let Some(sender) = sender {
        // A dropped receiver only loses the notification.
        let _ = sender.send(event);
    }
}

impl MatchShared {
    fn set_lifecycle(&self, sender: Option<&Sender<MatchEvent>>, next: MatchLifecycle) {
        if let Ok(mut guard) = self.lifecycle.lock() {
            *guard = next;
        }
        send_event(sender, MatchEvent::LifecycleChanged(next));
    }

    fn resolve(
        &self,
        sender: Option<&Sender<MatchEvent>>,
        lifecycle: MatchLifecycle,
        winner: Option<Color>,
        outcome: MatchOutcome,
    ) {
        if let Ok(mut guard) = self.winner.lock() {
            *guard = winner;
        }
        if let Ok(mut guard) = self.outcome.lock() {
            *guard = Some(outcome);
        }
        self.set_lifecycle(sender, lifecycle);
    }
}

/// One game between two agents, run on its own worker thread.
pub struct Match {
    shared: Arc<MatchShared>,
    start_inputs: Option<(Board, Box<dyn Agent>, Box<dyn Agent>)>,
    ply_limit: Option<u32>,
    worker: Option<JoinHandle<()>>,
}

impl Match {
    /// Match over the standard starting layout.
    pub fn new(light: Box<dyn Agent>, dark: Box<dyn Agent>) -> Self {
        Self::with_board(Board::standard(), light, dark)
    }

    /// Match over a caller-provided layout, for curated scenarios and tests.
    pub fn with_board(board: Board, light: Box<dyn Agent>, dark: Box<dyn Agent>) -> Self {
        Self {
            shared: Arc::new(MatchShared {
                cancel: AtomicBool::new(false),
                lifecycle: Mutex::new(MatchLifecycle::Prepared),
                winner: Mutex::new(None),
                outcome: Mutex::new(None),
                current_player: Mutex::new(Color::Light),
                subscriber: Mutex::new(None),
            }),
            start_inputs: Some((board, light, dark)),
            ply_limit: None,
            worker: None,
        }
    }

    /// Bound the match to at most `limit` applied moves; reaching the bound
    /// resolves it as a no-winner interruption. Takes effect at `start`.
    pub fn limit_plies(&mut self, limit: u32) {
        self.ply_limit = Some(limit);
    }

    /// Register the single subscriber. Only accepted while the match is
    /// still prepared; a mid-game subscriber would observe a partial stream.
    pub fn subscribe(&self) -> Result<Receiver<MatchEvent>, ChessErrors> {
        if self.start_inputs.is_none() {
            return Err(ChessErrors::MatchAlreadyStarted);
        }
        let (sender, receiver) = mpsc::channel();
        if let Ok(mut guard) = self.shared.subscriber.lock() {
            *guard = Some(sender);
        }
        Ok(receiver)
    }

    /// Spawn the worker thread running the ply loop. Fails on a match that
    /// already left the prepared state.
    pub fn start(&mut self) -> Result<(), ChessErrors> {
        let (board, light, dark) = self
            .start_inputs
            .take()
            .ok_or(ChessErrors::MatchAlreadyStarted)?;

        // Hand the sender to the worker: from here on its exit is the only
        // thing that can end the subscriber's stream.
        let sender = self
            .shared
            .subscriber
            .lock()
            .ok()
            .and_then(|mut guard| guard.take());
        self.shared
            .set_lifecycle(sender.as_ref(), MatchLifecycle::Ongoing);

        let shared = Arc::clone(&self.shared);
        let ply_limit = self.ply_limit;
        self.worker = Some(thread::spawn(move || {
            run_match_loop(board, light, dark, &shared, sender, ply_limit);
        }));
        Ok(())
    }

    /// Request cooperative cancellation and join the worker. Returns only
    /// after the worker has fully stopped; if the match already resolved by
    /// itself the resolved outcome stands.
    pub fn interrupt(&mut self) -> Result<(), ChessErrors> {
        self.shared.cancel.store(true, Ordering::Relaxed);
        self.wait()
    }

    /// Join the worker without cancelling.
    pub fn wait(&mut self) -> Result<(), ChessErrors> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        if worker.join().is_err() {
            self.shared.resolve(
                None,
                MatchLifecycle::Interrupted,
                None,
                MatchOutcome::AgentFault {
                    side: self.current_player(),
                    error: ChessErrors::MatchWorkerPanicked,
                },
            );
            return Err(ChessErrors::MatchWorkerPanicked);
        }
        Ok(())
    }

    pub fn lifecycle(&self) -> MatchLifecycle {
        self.shared
            .lifecycle
            .lock()
            .map(|guard| *guard)
            .unwrap_or(MatchLifecycle::Interrupted)
    }

    pub fn winner(&self) -> Option<Color> {
        self.shared
            .winner
            .lock()
            .map(|guard| *guard)
            .unwrap_or(None)
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.shared
            .outcome
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }

    pub fn current_player(&self) -> Color {
        self.shared
            .current_player
            .lock()
            .map(|guard| *guard)
            .unwrap_or(Color::Light)
    }
}

impl Drop for Match {
    fn drop(&mut self) {
        // Never leave a detached worker mutating a board nobody can observe.
        let _ = self.interrupt();
    }
}

fn run_match_loop(
    mut board: Board,
    mut light: Box<dyn Agent>,
    mut dark: Box<dyn Agent>,
    shared: &Arc<MatchShared>,
    sender: Option<Sender<MatchEvent>>,
    ply_limit: Option<u32>,
) {
    let sender = sender.as_ref();
    let mut plies = 0u32;
    loop {
        for color in [Color::Light, Color::Dark] {
            if shared.cancel.load(Ordering::Relaxed) {
                shared.resolve(
                    sender,
                    MatchLifecycle::Interrupted,
                    None,
                    MatchOutcome::Cancelled,
                );
                return;
            }
            if let Ok(mut guard) = shared.current_player.lock() {
                *guard = color;
            }

            let legal_moves = moves_for_color(&board, color);
            if legal_moves.is_empty() {
                shared.resolve(
                    sender,
                    MatchLifecycle::Interrupted,
                    None,
                    MatchOutcome::Stalled { side: color },
                );
                return;
            }

            let state = State::capture(&board);
            let agent = match color {
                Color::Light => light.as_mut(),
                Color::Dark => dark.as_mut(),
            };
            // A panicking agent must fault its own match, not take down the
            // worker with the subscriber still blocked on it.
            let decision = panic::catch_unwind(AssertUnwindSafe(|| {
                agent.choose_move(color, &legal_moves, &state)
            }));
            let chosen = match decision {
                Ok(Ok(mv)) => mv,
                Ok(Err(error)) => {
                    shared.resolve(
                        sender,
                        MatchLifecycle::Interrupted,
                        None,
                        MatchOutcome::AgentFault { side: color, error },
                    );
                    return;
                }
                Err(_) => {
                    shared.resolve(
                        sender,
                        MatchLifecycle::Interrupted,
                        None,
                        MatchOutcome::AgentFault {
                            side: color,
                            error: ChessErrors::AgentPanicked,
                        },
                    );
                    return;
                }
            };
            // Agents are untrusted: membership in the legal set is the
            // validity proof for the unchecked apply below.
            if !legal_moves.contains(&chosen) {
                shared.resolve(
                    sender,
                    MatchLifecycle::Interrupted,
                    None,
                    MatchOutcome::AgentFault {
                        side: color,
                        error: ChessErrors::IllegalMoveReturned,
                    },
                );
                return;
            }

            // Membership makes the move well formed; rendered before the
            // board changes underneath it.
            let notation =
                move_to_long_algebraic(&chosen, &board).unwrap_or_else(|_| String::from("?"));
            board.apply_move_unchecked(&chosen);
            plies += 1;
            send_event(
                sender,
                MatchEvent::BoardChanged {
                    mover: color,
                    played: chosen,
                    notation,
                    board: board.clone(),
                },
            );

            if board.king_missing(color.opposite()) {
                shared.resolve(
                    sender,
                    MatchLifecycle::Finished,
                    Some(color),
                    MatchOutcome::KingCaptured { winner: color },
                );
                return;
            }
            if let Some(limit) = ply_limit {
                if plies >= limit {
                    shared.resolve(
                        sender,
                        MatchLifecycle::Interrupted,
                        None,
                        MatchOutcome::PlyLimitReached,
                    );
                    return;
                }
            }
        }

        // Checked once per full ply pair, after both sides have moved.
        if board.kings_only() {
            shared.resolve(
                sender,
                MatchLifecycle::Interrupted,
                None,
                MatchOutcome::KingsOnlyDraw,
            );
            return;
        }
    }
}
