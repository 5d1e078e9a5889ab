//! Concurrent match series harness.
//!
//! Runs N matches with a bounded number in flight, tallies per-side wins and
//! draws through atomic counters (completions race), and prints one
//! timestamped outcome line per match plus aggregate percentages. The ply
//! cap is configured onto each match before it starts, so the worker itself
//! enforces the exact bound; the runner only observes the event stream.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Condvar, Mutex};
use std::thread;

use chrono::Local;

use crate::agents::agent_minimax::MiniMaxAgent;
use crate::agents::agent_random::RandomAgent;
use crate::agents::agent_trait::Agent;
use crate::arena::chess_match::{Match, MatchEvent, MatchLifecycle, MatchOutcome};
use crate::chess_errors::ChessErrors;
use crate::eval::heuristic::MaterialHeuristic;
use crate::game::chess_types::Color;
use crate::utils::render_board::render_board;

/// Fixed-size admission gate: at most `permits` matches run simultaneously.
struct PermitPool {
    permits: Mutex<usize>,
    available: Condvar,
}

impl PermitPool {
    fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits.max(1)),
            available: Condvar::new(),
        }
    }

    /// Block until a permit is free. A poisoned pool degrades to unbounded
    /// admission rather than deadlocking the series.
    fn acquire(&self) {
        let Ok(mut count) = self.permits.lock() else {
            return;
        };
        while *count == 0 {
            match self.available.wait(count) {
                Ok(guard) => count = guard,
                Err(_) => return,
            }
        }
        *count -= 1;
    }

    fn release(&self) {
        if let Ok(mut count) = self.permits.lock() {
            *count += 1;
        }
        self.available.notify_one();
    }
}

#[derive(Debug, Clone)]
pub struct SeriesConfig {
    pub games: u16,
    /// Upper bound on matches in flight.
    pub concurrency: usize,
    /// Each match is resolved as a no-winner interruption after this many
    /// applied moves.
    pub max_plies: u32,
    pub verbose: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            concurrency: 4,
            max_plies: 300,
            verbose: false,
        }
    }
}

/// Result of one bounded match inside a series.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub index: u16,
    pub light_name: String,
    pub dark_name: String,
    pub lifecycle: MatchLifecycle,
    pub winner: Option<Color>,
    pub outcome: Option<MatchOutcome>,
    pub plies: u32,
}

impl MatchRecord {
    pub fn outcome_line(&self) -> String {
        let verdict = match self.winner {
            Some(Color::Light) => "light wins".to_owned(),
            Some(Color::Dark) => "dark wins".to_owned(),
            None => match &self.outcome {
                Some(MatchOutcome::KingsOnlyDraw) => "draw (kings only)".to_owned(),
                Some(MatchOutcome::PlyLimitReached) => "draw (ply cap)".to_owned(),
                Some(MatchOutcome::Cancelled) => "draw (cancelled)".to_owned(),
                Some(MatchOutcome::Stalled { side }) => format!("draw ({side:?} stalled)"),
                Some(MatchOutcome::AgentFault { side, error }) => {
                    format!("interrupted ({side:?} agent fault: {error})")
                }
                _ => "interrupted".to_owned(),
            },
        };
        format!(
            "[{}] match {} ({} vs {}) after {} plies: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            self.index,
            self.light_name,
            self.dark_name,
            self.plies,
            verdict
        )
    }
}

#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub games: u16,
    pub light_wins: u32,
    pub dark_wins: u32,
    pub draws: u32,
    pub records: Vec<MatchRecord>,
}

impl SeriesStats {
    pub fn light_win_percent(&self) -> f64 {
        percent(self.light_wins, self.games)
    }

    pub fn dark_win_percent(&self) -> f64 {
        percent(self.dark_wins, self.games)
    }

    pub fn draw_percent(&self) -> f64 {
        percent(self.draws, self.games)
    }

    pub fn report(&self) -> String {
        format!(
            "games={} light_wins={} ({:.1}%) dark_wins={} ({:.1}%) draws={} ({:.1}%)",
            self.games,
            self.light_wins,
            self.light_win_percent(),
            self.dark_wins,
            self.dark_win_percent(),
            self.draws,
            self.draw_percent()
        )
    }
}

#[inline]
fn percent(count: u32, games: u16) -> f64 {
    if games == 0 {
        0.0
    } else {
        f64::from(count) * 100.0 / f64::from(games)
    }
}

/// Build an agent from its registry name.
///
/// Recognized forms: `random`, `random:<seed>`, `minimax:<depth>`, and
/// `minimax:<depth>:<seed>`. An explicit registry, not reflection.
pub fn agent_from_name(name: &str) -> Result<Box<dyn Agent>, ChessErrors> {
    let mut parts = name.split(':');
    let kind = parts.next().unwrap_or_default();
    let fields: Vec<&str> = parts.collect();

    match (kind, fields.as_slice()) {
        ("random", []) => Ok(Box::new(RandomAgent::new())),
        ("random", [seed]) => {
            let seed = parse_u64(name, seed)?;
            Ok(Box::new(RandomAgent::with_seed(seed)))
        }
        ("minimax", [depth]) => {
            let depth = parse_depth(name, depth)?;
            Ok(Box::new(MiniMaxAgent::new(depth, MaterialHeuristic)?))
        }
        ("minimax", [depth, seed]) => {
            let depth = parse_depth(name, depth)?;
            let seed = parse_u64(name, seed)?;
            Ok(Box::new(MiniMaxAgent::with_seed(
                depth,
                MaterialHeuristic,
                seed,
            )?))
        }
        _ => Err(ChessErrors::UnknownAgentName(name.to_owned())),
    }
}

fn parse_u64(name: &str, field: &str) -> Result<u64, ChessErrors> {
    field
        .parse::<u64>()
        .map_err(|_| ChessErrors::UnknownAgentName(name.to_owned()))
}

/// Depths are parsed at their real width; an out-of-range value is rejected,
/// never truncated.
fn parse_depth(name: &str, field: &str) -> Result<u8, ChessErrors> {
    field
        .parse::<u8>()
        .map_err(|_| ChessErrors::UnknownAgentName(name.to_owned()))
}

/// Run one ply-limited match and reduce it to a record.
///
/// The limit is enforced by the match worker itself; this runner only
/// counts the board-change events it observes and renders verbose output.
pub fn play_bounded_match(
    index: u16,
    light: Box<dyn Agent>,
    dark: Box<dyn Agent>,
    max_plies: u32,
    verbose: bool,
) -> Result<MatchRecord, ChessErrors> {
    let light_name = light.name().to_owned();
    let dark_name = dark.name().to_owned();

    let mut game = Match::new(light, dark);
    game.limit_plies(max_plies);
    let events = game.subscribe()?;
    game.start()?;

    let mut plies = 0u32;
    let mut final_board = None;
    loop {
        match events.recv() {
            Ok(MatchEvent::BoardChanged {
                mover,
                notation,
                board,
                ..
            }) => {
                plies += 1;
                if verbose {
                    println!("[match {index}] {mover:?}: {notation}");
                }
                final_board = Some(board);
            }
            Ok(MatchEvent::LifecycleChanged(lifecycle)) if lifecycle.is_terminal() => break,
            Ok(MatchEvent::LifecycleChanged(_)) => {}
            // The worker exited and dropped its sender.
            Err(_) => break,
        }
    }
    game.wait()?;

    if verbose {
        if let Some(board) = &final_board {
            println!("{}", render_board(board));
        }
    }

    let lifecycle = game.lifecycle();
    let winner = game.winner();
    match (lifecycle, winner) {
        (MatchLifecycle::Finished, None) | (MatchLifecycle::Interrupted, Some(_)) => {
            return Err(ChessErrors::InconsistentOutcome(winner));
        }
        _ => {}
    }

    Ok(MatchRecord {
        index,
        light_name,
        dark_name,
        lifecycle,
        winner,
        outcome: game.outcome(),
        plies,
    })
}

/// Play `config.games` matches between fresh agent pairs and aggregate the
/// per-side results.
pub fn play_match_series<F1, F2>(
    light_factory: F1,
    dark_factory: F2,
    config: SeriesConfig,
) -> Result<SeriesStats, ChessErrors>
where
    F1: Fn() -> Box<dyn Agent> + Send + Sync,
    F2: Fn() -> Box<dyn Agent> + Send + Sync,
{
    let pool = PermitPool::new(config.concurrency);
    let light_wins = AtomicU32::new(0);
    let dark_wins = AtomicU32::new(0);
    let draws = AtomicU32::new(0);
    let records: Mutex<Vec<MatchRecord>> = Mutex::new(Vec::with_capacity(config.games as usize));
    let failure: Mutex<Option<ChessErrors>> = Mutex::new(None);

    thread::scope(|scope| {
        for index in 0..config.games {
            pool.acquire();
            if config.verbose {
                println!("[series] match {index} admitted");
            }

            let light = light_factory();
            let dark = dark_factory();
            let pool = &pool;
            let light_wins = &light_wins;
            let dark_wins = &dark_wins;
            let draws = &draws;
            let records = &records;
            let failure = &failure;
            let max_plies = config.max_plies;
            let verbose = config.verbose;

            scope.spawn(move || {
                let outcome = play_bounded_match(index, light, dark, max_plies, verbose);
                match outcome {
                    Ok(record) => {
                        match record.winner {
                            Some(Color::Light) => light_wins.fetch_add(1, Ordering::Relaxed),
                            Some(Color::Dark) => dark_wins.fetch_add(1, Ordering::Relaxed),
                            None => draws.fetch_add(1, Ordering::Relaxed),
                        };
                        println!("{}", record.outcome_line());
                        if let Ok(mut guard) = records.lock() {
                            guard.push(record);
                        }
                    }
                    Err(error) => {
                        if let Ok(mut guard) = failure.lock() {
                            guard.get_or_insert(error);
                        }
                    }
                }
                pool.release();
            });
        }
    });

    if let Ok(mut guard) = failure.lock() {
        if let Some(error) = guard.take() {
            return Err(error);
        }
    }

    let mut records = records
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    records.sort_by_key(|record| record.index);

    Ok(SeriesStats {
        games: config.games,
        light_wins: light_wins.into_inner(),
        dark_wins: dark_wins.into_inner(),
        draws: draws.into_inner(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::{agent_from_name, play_bounded_match, play_match_series, SeriesConfig};
    use crate::agents::agent_random::RandomAgent;
    use crate::agents::agent_trait::Agent;
    use crate::arena::chess_match::{MatchLifecycle, MatchOutcome};
    use crate::chess_errors::ChessErrors;
    use crate::game::chess_move::Move;
    use crate::game::chess_types::Color;
    use crate::game::state::State;

    struct PanickyAgent;

    impl Agent for PanickyAgent {
        fn name(&self) -> &str {
            "panicky"
        }

        fn choose_move(
            &mut self,
            _mover: Color,
            _legal_moves: &[Move],
            _state: &State,
        ) -> Result<Move, ChessErrors> {
            panic!("agent blew up")
        }
    }

    #[test]
    fn factory_recognizes_registered_names() {
        assert!(agent_from_name("random").is_ok());
        assert!(agent_from_name("random:7").is_ok());
        assert!(agent_from_name("minimax:2").is_ok());
        assert!(agent_from_name("minimax:2:9").is_ok());
    }

    #[test]
    fn factory_rejects_unknown_and_misconfigured_names() {
        assert!(matches!(
            agent_from_name("alphazero"),
            Err(ChessErrors::UnknownAgentName(_))
        ));
        assert!(matches!(
            agent_from_name("minimax:x"),
            Err(ChessErrors::UnknownAgentName(_))
        ));
        assert!(matches!(
            agent_from_name("minimax:0"),
            Err(ChessErrors::MisconfiguredAgent(_))
        ));
    }

    #[test]
    fn factory_rejects_out_of_range_depth_instead_of_truncating() {
        // u8 wraparound would silently read 257 as depth 1.
        assert!(matches!(
            agent_from_name("minimax:257"),
            Err(ChessErrors::UnknownAgentName(_))
        ));
        assert!(matches!(
            agent_from_name("minimax:300:9"),
            Err(ChessErrors::UnknownAgentName(_))
        ));
    }

    #[test]
    fn bounded_match_with_panicking_agent_terminates() {
        let record = play_bounded_match(
            0,
            Box::new(PanickyAgent),
            Box::new(RandomAgent::with_seed(2)),
            10,
            false,
        )
        .expect("the fault must resolve the match, not the runner");

        assert_eq!(record.lifecycle, MatchLifecycle::Interrupted);
        assert_eq!(record.winner, None);
        assert_eq!(
            record.outcome,
            Some(MatchOutcome::AgentFault {
                side: Color::Light,
                error: ChessErrors::AgentPanicked,
            })
        );
    }

    #[test]
    fn short_series_of_random_agents_accounts_for_every_game() {
        let stats = play_match_series(
            || Box::new(RandomAgent::with_seed(11)),
            || Box::new(RandomAgent::with_seed(12)),
            SeriesConfig {
                games: 4,
                concurrency: 2,
                max_plies: 6,
                verbose: false,
            },
        )
        .expect("series should run");

        assert_eq!(stats.games, 4);
        assert_eq!(stats.records.len(), 4);
        assert_eq!(stats.light_wins + stats.dark_wins + stats.draws, 4);
        // The worker stops each match at exactly six plies, so no king can
        // fall and every game is a capped draw.
        assert_eq!(stats.draws, 4);
        assert!((stats.draw_percent() - 100.0).abs() < f64::EPSILON);

        for (position, record) in stats.records.iter().enumerate() {
            assert_eq!(record.index as usize, position);
            assert_eq!(record.plies, 6);
            assert_eq!(record.outcome, Some(MatchOutcome::PlyLimitReached));
            assert!(record.lifecycle.is_terminal());
            assert!(record.outcome_line().contains("(random vs random)"));
        }
    }
}
