use futures::future::join_all;
use log::debug;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

use tile_grid::{can_move, is_game_over, slide_tiles, Grid, Move};

use crate::frontend::{Ack, Frontend};

/// Where a session currently is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingInput,
    Resolving(Move),
    Finalizing,
    Terminal,
}

/// End-of-session report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Completed turns (rejected directions don't count).
    pub turns: u64,
    pub highest_tile: u32,
}

/// Turn sequencing for one game: validate a move, resolve it, wait out the
/// visual transitions, fold merges, spawn, and watch for the loss state.
///
/// The session is the only writer of its grid. Exactly one direction is
/// consumed per cycle and the feed is not read again until the turn has
/// fully completed, so turns can never overlap; directions buffered while
/// a turn resolves wait their own cycle and are validated like any other.
pub struct GameSession<F: Frontend> {
    grid: Grid,
    frontend: F,
    inputs: mpsc::Receiver<Move>,
    rng: StdRng,
    four_chance: f64,
    phase: Phase,
    pending_entrance: Option<Ack>,
    turns: u64,
}

impl<F: Frontend> GameSession<F> {
    /// Start a fresh game: an empty grid seeded with two spawned tiles.
    pub fn new(frontend: F, inputs: mpsc::Receiver<Move>, rng: StdRng, four_chance: f64) -> Self {
        let mut session = Self::from_parts(Grid::new(), frontend, inputs, rng, four_chance);
        for _ in 0..2 {
            let spawn = session
                .grid
                .spawn_random(&mut session.rng, session.four_chance)
                .expect("a fresh grid has empty cells");
            let _ = session.frontend.tile_spawned(&spawn);
        }
        session
    }

    /// Resume from a prepared grid. No tiles are spawned.
    pub fn from_parts(
        grid: Grid,
        frontend: F,
        inputs: mpsc::Receiver<Move>,
        rng: StdRng,
        four_chance: f64,
    ) -> Self {
        Self {
            grid,
            frontend,
            inputs,
            rng,
            four_chance,
            phase: Phase::AwaitingInput,
            pending_entrance: None,
            turns: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Drive the session until the grid is terminal or the input feed
    /// closes. Returns the end-of-session summary either way.
    pub async fn run(mut self) -> SessionSummary {
        loop {
            match self.phase {
                Phase::AwaitingInput => {
                    let Some(direction) = self.inputs.recv().await else {
                        break;
                    };
                    if can_move(&self.grid, direction) {
                        self.phase = Phase::Resolving(direction);
                    } else {
                        debug!("{direction:?} is not a legal move, ignoring");
                    }
                }
                Phase::Resolving(direction) => {
                    let motions = slide_tiles(&mut self.grid, direction);
                    debug!("{direction:?}: {} tiles moved", motions.len());
                    let transitions: Vec<Ack> = motions
                        .iter()
                        .map(|m| self.frontend.tile_moved(m.tile, m.to))
                        .collect();
                    // Nothing on the grid changes until every transition
                    // has been acknowledged.
                    join_all(transitions).await;
                    self.phase = Phase::Finalizing;
                }
                Phase::Finalizing => {
                    for merge in self.grid.finalize_merges() {
                        self.frontend.tile_value_changed(merge.kept, merge.value);
                        self.frontend.tile_removed(merge.absorbed);
                    }
                    let spawn = self
                        .grid
                        .spawn_random(&mut self.rng, self.four_chance)
                        .expect("a completed move leaves at least one empty cell");
                    let entrance = self.frontend.tile_spawned(&spawn);
                    self.turns += 1;
                    if is_game_over(&self.grid) {
                        self.pending_entrance = Some(entrance);
                        self.phase = Phase::Terminal;
                    } else {
                        self.phase = Phase::AwaitingInput;
                    }
                }
                Phase::Terminal => {
                    // Let the final tile finish its entrance before the
                    // loss is announced.
                    if let Some(entrance) = self.pending_entrance.take() {
                        let _ = entrance.await;
                    }
                    self.frontend.game_over();
                    break;
                }
            }
        }
        SessionSummary {
            turns: self.turns,
            highest_tile: self.grid.highest_tile(),
        }
    }
}
