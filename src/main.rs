//! Blockfall runner (default binary).
//!
//! `blockfall [play]` runs the interactive terminal game; `blockfall script`
//! reads commands from stdin and prints the board (see `blockfall::script`).
//! Both accept `--config <path>` pointing at a JSON game configuration.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use blockfall::cli::{load_config, parse_args, Mode};
use blockfall::core::{Board, EngineError, GameConfig, PieceCatalog};
use blockfall::script::run_script;
use blockfall::term::{BoardView, TerminalRenderer};
use blockfall::types::{Move, MoveOutcome};

const GRAVITY_MS: u64 = 500;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    let config = load_config(cli.config.as_ref())?;

    match cli.mode {
        Mode::Script => {
            let stdin = io::stdin();
            run_script(config, stdin.lock(), io::stdout(), io::stderr())?;
            Ok(())
        }
        Mode::Play => {
            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = play(&mut term, config);

            // Always try to restore terminal state.
            let _ = term.exit();
            match result? {
                Some(cleared) => eprintln!("[blockfall] game over, {} row(s) cleared", cleared),
                None => eprintln!("[blockfall] quit"),
            }
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Step(Move),
    Drop,
    Quit,
}

fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Step(Move::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Step(Move::Right)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Step(Move::Down)),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('k') => Some(Action::Step(Move::RotateCw)),
        KeyCode::Char('z') => Some(Action::Step(Move::RotateCcw)),
        KeyCode::Char(' ') => Some(Action::Drop),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Interactive session state: the board plus the catalog cycle.
struct Session {
    board: Board,
    catalog: PieceCatalog,
    next: usize,
    cleared: usize,
    status: String,
}

impl Session {
    fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            board: Board::with_config(config.board)?,
            catalog: config.pieces,
            next: 0,
            cleared: 0,
            status: "rows 0".to_string(),
        })
    }

    /// Introduce the next catalog piece. `false` when the spawn is blocked.
    fn spawn_next(&mut self) -> Result<bool> {
        let shape = &self.catalog.shapes()[self.next % self.catalog.len()];
        self.next += 1;
        match self.board.introduce_piece(shape.spawn()) {
            Ok(()) => Ok(true),
            Err(EngineError::SpawnBlocked) => {
                self.status = format!("{} cannot spawn", shape.name());
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Clear rows after a landing and bring in the next piece.
    fn after_landing(&mut self) -> Result<bool> {
        let rows = self.board.clear_filled_rows()?;
        self.board.take_last_event();
        self.cleared += rows.len();
        self.status = match rows.len() {
            0 => format!("rows {}", self.cleared),
            n => format!("+{} rows {}", n, self.cleared),
        };
        self.spawn_next()
    }

    /// Apply one step. `false` once the game is over.
    fn step(&mut self, kind: Move) -> Result<bool> {
        match self.board.attempt_move(kind)? {
            MoveOutcome::Landed => self.after_landing(),
            _ => Ok(true),
        }
    }

    fn hard_drop(&mut self) -> Result<bool> {
        self.board.drop_piece()?;
        self.after_landing()
    }
}

/// Run until the player quits (`None`) or a spawn is blocked
/// (`Some(rows cleared)`).
fn play(term: &mut TerminalRenderer, config: GameConfig) -> Result<Option<usize>> {
    let mut session = Session::new(config)?;
    let view = BoardView::default();
    let tick = Duration::from_millis(GRAVITY_MS);
    let mut last_tick = Instant::now();

    if !session.spawn_next()? {
        return Ok(Some(0));
    }

    loop {
        term.draw(view.render(&session.board, &session.status))?;

        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let alive = match map_key(key) {
                    Some(Action::Quit) => return Ok(None),
                    Some(Action::Step(kind)) => session.step(kind)?,
                    Some(Action::Drop) => session.hard_drop()?,
                    None => true,
                };
                if !alive {
                    return Ok(Some(session.cleared));
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if !session.step(Move::Down)? {
                return Ok(Some(session.cleared));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall::core::{Border, BoardConfig};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(map_key(press(KeyCode::Left)), Some(Action::Step(Move::Left)));
        assert_eq!(map_key(press(KeyCode::Char('l'))), Some(Action::Step(Move::Right)));
        assert_eq!(map_key(press(KeyCode::Char('z'))), Some(Action::Step(Move::RotateCcw)));
        assert_eq!(map_key(press(KeyCode::Char('x'))), Some(Action::Step(Move::RotateCw)));
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(Action::Drop));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('p'))), None);
    }

    #[test]
    fn session_cycles_catalog_until_spawn_blocked() {
        let config = GameConfig {
            board: BoardConfig::new(10, 4, Border::Open),
            ..GameConfig::default()
        };
        let mut session = Session::new(config).unwrap();
        assert!(session.spawn_next().unwrap());
        assert_eq!(session.board.active().unwrap().name(), "I");

        // A vertical I fills the whole 4-row column at the spawn offset.
        assert!(!session.hard_drop().unwrap());
        assert_eq!(session.status, "J cannot spawn");
        assert_eq!(session.cleared, 0);
    }
}
