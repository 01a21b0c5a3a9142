use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use game_runtime::config::Config;
use game_runtime::controller::GameSession;
use game_runtime::frontend::{instant_ack, Ack, Frontend};
use game_runtime::input;
use tile_grid::{SpawnRecord, TileId, GRID_SIZE};

#[derive(Parser, Debug)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the RNG seed (also settable in the config file)
    #[arg(long)]
    seed: Option<u64>,
}

/// Keeps its own model of the board from the notifications it receives and
/// redraws after every spawn (each turn ends with exactly one).
struct TerminalFrontend {
    tiles: HashMap<TileId, (u32, (usize, usize))>,
}

impl TerminalFrontend {
    fn new() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    fn draw(&self) {
        let mut values = [[0u32; GRID_SIZE]; GRID_SIZE];
        for &(value, (x, y)) in self.tiles.values() {
            values[y][x] = value;
        }
        println!();
        for row in values {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        String::from("     .")
                    } else {
                        format!("{v:>6}")
                    }
                })
                .collect();
            println!("{}", cells.join(" "));
        }
    }
}

impl Frontend for TerminalFrontend {
    fn tile_spawned(&mut self, spawn: &SpawnRecord) -> Ack {
        self.tiles
            .insert(spawn.tile, (spawn.value, (spawn.x, spawn.y)));
        self.draw();
        instant_ack()
    }

    fn tile_moved(&mut self, tile: TileId, to: (usize, usize)) -> Ack {
        if let Some(entry) = self.tiles.get_mut(&tile) {
            entry.1 = to;
        }
        instant_ack()
    }

    fn tile_value_changed(&mut self, tile: TileId, value: u32) {
        if let Some(entry) = self.tiles.get_mut(&tile) {
            entry.0 = value;
        }
    }

    fn tile_removed(&mut self, tile: TileId) {
        self.tiles.remove(&tile);
    }

    fn game_over(&mut self) {
        println!("\nno moves left, you lose");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_toml(path)
            .map_err(|e| anyhow!("failed to load config {}: {e}", path.display()))?,
        None => Config::default(),
    };
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    info!("starting session with seed {seed}");

    println!("slide with w/a/s/d or up/down/left/right, one move per line");
    let inputs = input::stdin_moves(8);
    let session = GameSession::new(
        TerminalFrontend::new(),
        inputs,
        StdRng::seed_from_u64(seed),
        config.spawn.four_chance,
    );
    let summary = session.run().await;
    println!(
        "{} moves played, highest tile {}",
        summary.turns, summary.highest_tile
    );
    Ok(())
}
