//! Text rendering of levels and events.

use std::fmt::Write as _;

use maze_runner_core::{CellCoord, Event, LevelSnapshot, TileCategory};

/// Draws the level as one character per cell.
///
/// `@` player, `G` goal, `#` wall, `^` trap, `O` teleporter, `k` key,
/// `L` lock, `.` open floor.
pub(crate) fn ascii_map(snapshot: &LevelSnapshot) -> String {
    let columns = snapshot.grid.columns();
    let mut map = String::with_capacity(snapshot.grid.area() + snapshot.grid.rows() as usize);
    for row in 0..snapshot.grid.rows() {
        for column in 0..columns {
            map.push(glyph(snapshot, CellCoord::new(column, row)));
        }
        map.push('\n');
    }
    map
}

fn glyph(snapshot: &LevelSnapshot, cell: CellCoord) -> char {
    if cell == snapshot.player {
        return '@';
    }
    if cell == snapshot.goal {
        return 'G';
    }
    if snapshot.grid.is_wall(cell) {
        return '#';
    }
    match snapshot.tiles.category_at(cell) {
        Some(TileCategory::Trap) => '^',
        Some(TileCategory::Teleporter) => 'O',
        Some(TileCategory::Key) => 'k',
        Some(TileCategory::Lock) => 'L',
        None => '.',
    }
}

/// One-line description of an event.
pub(crate) fn describe(event: &Event) -> String {
    let mut line = String::new();
    let _ = match event {
        Event::LevelRequested { level } => write!(line, "generating level {level}"),
        Event::LevelStarted {
            level,
            requested_level,
            time_limit,
            columns,
            rows,
        } => {
            if level == requested_level {
                write!(line, "level {level} started: {columns}x{rows}, {time_limit}s")
            } else {
                write!(
                    line,
                    "level {level} started in place of level {requested_level}: {columns}x{rows}, {time_limit}s"
                )
            }
        }
        Event::LevelRejected { level, reason } => write!(line, "level {level} rejected: {reason}"),
        Event::PlayerMoved { from, to } => write!(
            line,
            "moved ({}, {}) -> ({}, {})",
            from.column(),
            from.row(),
            to.column(),
            to.row()
        ),
        Event::Teleported { entry, exit } => write!(
            line,
            "teleported ({}, {}) -> ({}, {})",
            entry.column(),
            entry.row(),
            exit.column(),
            exit.row()
        ),
        Event::KeyCollected { cell } => {
            write!(line, "picked up a key at ({}, {})", cell.column(), cell.row())
        }
        Event::LockOpened { cell } => {
            write!(line, "opened a lock at ({}, {})", cell.column(), cell.row())
        }
        Event::TimeAdvanced { remaining } => write!(line, "{remaining}s left"),
        Event::LevelCompleted {
            level,
            time_remaining,
        } => write!(line, "level {level} complete with {time_remaining}s to spare"),
        Event::GameOver { level, cause } => write!(line, "game over on level {level}: {cause:?}"),
        Event::GameRestarted => write!(line, "restarting from level 1"),
    };
    line
}
