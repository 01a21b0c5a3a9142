use tokio::sync::oneshot;

use tile_grid::{SpawnRecord, TileId};

/// Completion signal for a single visual effect.
///
/// The session awaits these; the presentation layer resolves them whenever
/// its transition or entrance effect actually finishes. Dropping the
/// sender also counts as completion, so a frontend with nothing to animate
/// can simply return an already-resolved receiver.
pub type Ack = oneshot::Receiver<()>;

/// Sender half for presentation layers that acknowledge later.
pub type AckSender = oneshot::Sender<()>;

/// A fresh acknowledgement pair.
pub fn ack_pair() -> (AckSender, Ack) {
    oneshot::channel()
}

/// An acknowledgement that has already completed.
pub fn instant_ack() -> Ack {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(());
    rx
}

/// What the core tells the presentation layer.
///
/// One notification per state change; the methods returning [`Ack`] are
/// the effects the session waits out before mutating tiles further. How
/// anything is rendered is entirely the implementor's business.
pub trait Frontend {
    /// A tile appeared. The returned acknowledgement covers its entrance
    /// effect; it is awaited only when the spawn ends the game.
    fn tile_spawned(&mut self, spawn: &SpawnRecord) -> Ack;

    /// A tile slid to `to`. All of a turn's movement acknowledgements are
    /// awaited together before any merge is folded.
    fn tile_moved(&mut self, tile: TileId, to: (usize, usize)) -> Ack;

    /// A merge doubled this tile's value.
    fn tile_value_changed(&mut self, tile: TileId, value: u32);

    /// This tile was merged away; its visual should go.
    fn tile_removed(&mut self, tile: TileId);

    /// No legal move remains. Sent once, after the final entrance effect.
    fn game_over(&mut self);
}

/// Frontend that acknowledges everything immediately. Useful headless and
/// in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantFrontend;

impl Frontend for InstantFrontend {
    fn tile_spawned(&mut self, _spawn: &SpawnRecord) -> Ack {
        instant_ack()
    }

    fn tile_moved(&mut self, _tile: TileId, _to: (usize, usize)) -> Ack {
        instant_ack()
    }

    fn tile_value_changed(&mut self, _tile: TileId, _value: u32) {}

    fn tile_removed(&mut self, _tile: TileId) {}

    fn game_over(&mut self) {}
}
