//! Line-oriented script driver.
//!
//! Each input line is one command against a single board:
//!
//! ```text
//! spawn <NAME> [dx dy]   introduce a catalog piece, optionally shifted
//! left | right | down    one step
//! cw | ccw               rotate
//! drop                   fall until landed
//! mark | collapse        the two line-clearing phases
//! clear                  mark and collapse
//! show                   print the board
//! # ...                  comment
//! ```
//!
//! Malformed lines abort the script. Engine refusals (no piece, blocked
//! spawn, ...) are reported on the log stream and the script carries on.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};

use crate::core::{Board, BoardEvent, EngineError, GameConfig, PieceCatalog};
use crate::types::{Move, MoveOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Spawn { name: String, dx: i32, dy: i32 },
    Step(Move),
    Drop,
    Mark,
    Collapse,
    Clear,
    Show,
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "spawn" => {
            let (name, offset) = rest
                .split_first()
                .ok_or_else(|| anyhow!("spawn: missing piece name"))?;
            let (dx, dy) = match offset {
                [] => (0, 0),
                [dx, dy] => (parse_offset(dx)?, parse_offset(dy)?),
                _ => return Err(anyhow!("spawn: expected <NAME> [dx dy]")),
            };
            return Ok(Some(ScriptCommand::Spawn {
                name: (*name).to_string(),
                dx,
                dy,
            }));
        }
        "drop" => ScriptCommand::Drop,
        "mark" => ScriptCommand::Mark,
        "collapse" => ScriptCommand::Collapse,
        "clear" => ScriptCommand::Clear,
        "show" => ScriptCommand::Show,
        other => Move::from_str(other)
            .map(ScriptCommand::Step)
            .ok_or_else(|| anyhow!("unknown command: {}", other))?,
    };

    if !rest.is_empty() {
        return Err(anyhow!("{}: unexpected arguments", head));
    }
    Ok(Some(command))
}

fn parse_offset(text: &str) -> Result<i32> {
    text.parse::<i32>()
        .map_err(|_| anyhow!("spawn: invalid offset: {}", text))
}

/// One-line description of a board event for the log stream.
pub fn describe_event(event: &BoardEvent) -> String {
    match event {
        BoardEvent::Landed { cells } => format!("piece landed on cells {:?}", cells.as_slice()),
        BoardEvent::RowsMarked { rows } => format!("rows marked for deletion: {:?}", rows),
        BoardEvent::RowsCollapsed { count } => format!("{} row(s) collapsed", count),
    }
}

pub struct ScriptRunner {
    board: Board,
    catalog: PieceCatalog,
}

impl ScriptRunner {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            board: Board::with_config(config.board)?,
            catalog: config.pieces,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Apply one command. Board dumps go to `out`, status lines to `log`.
    pub fn apply(
        &mut self,
        command: &ScriptCommand,
        out: &mut impl Write,
        log: &mut impl Write,
    ) -> Result<()> {
        let result = self.execute(command, out, log);
        if let Some(event) = self.board.take_last_event() {
            writeln!(log, "[blockfall] {}", describe_event(&event))?;
        }
        match result {
            Err(err) => match err.downcast_ref::<EngineError>() {
                Some(e) => {
                    writeln!(log, "[blockfall] {} ({})", e, e.code())?;
                    Ok(())
                }
                None => Err(err),
            },
            Ok(()) => Ok(()),
        }
    }

    fn execute(
        &mut self,
        command: &ScriptCommand,
        out: &mut impl Write,
        log: &mut impl Write,
    ) -> Result<()> {
        match command {
            ScriptCommand::Spawn { name, dx, dy } => {
                let piece = self.catalog.spawn(name)?.translated(*dx, *dy);
                self.board.introduce_piece(piece)?;
            }
            ScriptCommand::Step(kind) => {
                if self.board.attempt_move(*kind)? == MoveOutcome::Frozen {
                    writeln!(log, "[blockfall] {}: piece is frozen", kind.as_str())?;
                }
            }
            ScriptCommand::Drop => {
                self.board.drop_piece()?;
            }
            ScriptCommand::Mark => {
                self.board.mark_filled_rows_for_deletion()?;
            }
            ScriptCommand::Collapse => {
                self.board.collapse()?;
            }
            ScriptCommand::Clear => {
                self.board.clear_filled_rows()?;
            }
            ScriptCommand::Show => {
                write!(out, "{}", self.board)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Run every line of `input`, then print the final board to `out`.
pub fn run_script(
    config: GameConfig,
    input: impl BufRead,
    mut out: impl Write,
    mut log: impl Write,
) -> Result<Board> {
    let mut runner = ScriptRunner::new(config)?;
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let Some(command) = parse_line(&line).map_err(|e| anyhow!("line {}: {}", n + 1, e))? else {
            continue;
        };
        runner.apply(&command, &mut out, &mut log)?;
    }
    write!(out, "{}", runner.board())?;
    out.flush()?;
    Ok(runner.board)
}
