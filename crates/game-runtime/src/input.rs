use std::io::BufRead;

use tokio::sync::mpsc;

use tile_grid::Move;

/// Map one line of keyboard input to a direction.
///
/// Anything that isn't a direction returns `None` and costs the player
/// nothing; the session keeps listening.
pub fn parse_key(key: &str) -> Option<Move> {
    match key.trim().to_ascii_lowercase().as_str() {
        "w" | "k" | "up" => Some(Move::Up),
        "s" | "j" | "down" => Some(Move::Down),
        "a" | "h" | "left" => Some(Move::Left),
        "d" | "l" | "right" => Some(Move::Right),
        _ => None,
    }
}

/// Feed directions from stdin, one per line, into a bounded channel.
///
/// A dedicated thread does the blocking reads; the receiver closes the
/// feed by being dropped. Non-directional lines are discarded at this
/// edge, so the session only ever sees the four direction symbols.
pub fn stdin_moves(buffer: usize) -> mpsc::Receiver<Move> {
    let (tx, rx) = mpsc::channel(buffer);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(direction) = parse_key(&line) else {
                continue;
            };
            if tx.blocking_send(direction).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_words_and_wasd_map_to_moves() {
        assert_eq!(parse_key("w"), Some(Move::Up));
        assert_eq!(parse_key("  DOWN \n"), Some(Move::Down));
        assert_eq!(parse_key("a"), Some(Move::Left));
        assert_eq!(parse_key("l"), Some(Move::Right));
    }

    #[test]
    fn everything_else_is_ignored() {
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("q"), None);
        assert_eq!(parse_key("upwards"), None);
        assert_eq!(parse_key("2048"), None);
    }
}
