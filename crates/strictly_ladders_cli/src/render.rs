//! Plain-text board and event rendering.

use std::fmt::Write;
use strictly_ladders::{BoardTopology, GameEvent, Player, PlayerId, ShortcutKind, ShortcutTable};

/// Draws the board top row first, in the zig-zag numbering.
///
/// Each cell shows the square number, `L` or `S` on a ladder foot or snake
/// head, and the seat number of a player standing there (`*` for several).
pub fn board(topology: &BoardTopology, shortcuts: &ShortcutTable, players: &[Player]) -> String {
    let mut out = String::new();
    for row in (0..topology.rows()).rev() {
        for col in 0..topology.cols() {
            let Some(square) = topology.square_at(row, col) else {
                continue;
            };
            let marker = match shortcuts.lookup(square).map(|e| e.kind()) {
                Some(ShortcutKind::Ladder) => 'L',
                Some(ShortcutKind::Snake) => 'S',
                None => ' ',
            };
            let _ = write!(out, "{:>4}{}{} ", square, marker, occupant(players, square));
        }
        out.push('\n');
    }

    for player in players {
        let _ = match player.current_square() {
            0 => writeln!(out, "  {} {}: off the board", seat(player.id()), player.name()),
            square => writeln!(out, "  {} {}: {}", seat(player.id()), player.name(), square),
        };
    }
    out
}

fn seat(id: PlayerId) -> char {
    char::from_digit(u32::from(id.get()) % 10, 10).unwrap_or('?')
}

fn occupant(players: &[Player], square: u32) -> char {
    let mut here = players.iter().filter(|p| p.current_square() == square);
    match (here.next(), here.next()) {
        (Some(player), None) => seat(player.id()),
        (Some(_), Some(_)) => '*',
        _ => ' ',
    }
}

fn name_of(players: &[Player], id: PlayerId) -> String {
    players
        .iter()
        .find(|p| p.id() == id)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// A line describing `event`, or `None` for events not worth printing.
pub fn event_line(event: &GameEvent, players: &[Player]) -> Option<String> {
    let line = match event {
        GameEvent::TurnStarted(_) | GameEvent::RollRequested(_) => return None,
        GameEvent::DiceRolled(value) => format!("  rolled a {}", value),
        GameEvent::PlayerStarted(id) => format!("  {} enters the board", name_of(players, *id)),
        GameEvent::TurnPassed(id) => format!("  {} has not started yet", name_of(players, *id)),
        GameEvent::PlayerMoved { player, square } => {
            format!("  {} is on {}", name_of(players, *player), square)
        }
        GameEvent::ShortcutTaken { player, entry } => match entry.kind() {
            ShortcutKind::Ladder => format!(
                "  {} climbs a ladder from {} to {}",
                name_of(players, *player),
                entry.start(),
                entry.end()
            ),
            ShortcutKind::Snake => format!(
                "  {} slides down a snake from {} to {}",
                name_of(players, *player),
                entry.start(),
                entry.end()
            ),
        },
        GameEvent::ChainLimitExceeded { player, square } => format!(
            "  {} stops on {}: too many shortcuts in a row",
            name_of(players, *player),
            square
        ),
        GameEvent::PlayerWon(id) => format!("{} wins!", name_of(players, *id)),
    };
    Some(line)
}
