//! Diagnostic rendering of a solution path.

use std::io::{self, IsTerminal, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use tracing::warn;

use crate::config::CELL_DELIMITER;
use crate::heuristic::manhattan_distance;
use crate::node::{NodeArena, NodeId};
use crate::puzzle::Board;

/// Print the goal node and every ancestor back to the root on stdout.
///
/// Best effort: a failed write is logged and otherwise ignored.
pub fn print_path(arena: &NodeArena, goal: NodeId) {
    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut out = stdout.lock();
    if let Err(err) = write_path(&mut out, arena, goal, styled).and_then(|()| out.flush()) {
        warn!(%err, "could not render solution path");
    }
}

/// Write the path from `goal` back to the root, goal first.
///
/// Ancestors are followed by their Manhattan distance. With `styled` the
/// blank is dimmed using terminal escape codes.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_path<W: Write>(
    out: &mut W,
    arena: &NodeArena,
    goal: NodeId,
    styled: bool,
) -> io::Result<()> {
    for id in arena.path_to_root(goal) {
        let node = arena.get(id);
        write_board(out, &node.board, styled)?;
        if id != goal {
            queue!(
                out,
                Print(format!("manhattan: {}\n", manhattan_distance(&node.board)))
            )?;
        }
        if let Some(action) = node.action {
            queue!(out, Print(format!("reached by: {action}\n")))?;
        }
        queue!(out, Print("\n"))?;
    }
    Ok(())
}

fn write_board<W: Write>(out: &mut W, board: &Board, styled: bool) -> io::Result<()> {
    for row in board.rows() {
        for (col, &value) in row.iter().enumerate() {
            if col > 0 {
                queue!(out, Print(CELL_DELIMITER))?;
            }
            if styled && value == 0 {
                queue!(out, PrintStyledContent(value.to_string().dark_grey()))?;
            } else {
                queue!(out, Print(value))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    Ok(())
}
