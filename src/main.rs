//! Terminal minofall runner (default binary).
//!
//! Loads the two piece-definition files, allocates the color palette,
//! and drives the board at a fixed tick: at most one game input per tick,
//! applied before the update step, exactly in that order.

use std::env;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use minofall::core::{load_catalog_from_paths, Board, PieceCatalog};
use minofall::input::{map_key, should_quit, KeyAction};
use minofall::term::{GameView, Palette, TerminalRenderer, Viewport};
use minofall::types::{GameInput, TICK_MS};

const BOARD_ROWS: usize = 20;
const BOARD_COLS: usize = 10;

fn main() -> Result<()> {
    let data_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let (palette, colors) = Palette::standard()?;
    let catalog = Rc::new(
        load_catalog_from_paths(
            &data_dir.join("shapes.txt"),
            &data_dir.join("wallkicks.txt"),
            &colors,
        )
        .context("loading piece definition files")?,
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &palette, catalog);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, palette: &Palette, catalog: Rc<PieceCatalog>) -> Result<()> {
    let mut seed = clock_seed();
    let mut board = new_board(&catalog, seed)?;
    let view = GameView::new();

    let tick = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();
    let mut paused = false;
    let mut pending: Option<GameInput> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        term.frame(|buf| view.render(&board, palette, Viewport::new(w, h), paused, buf))?;

        // Input with timeout until the next tick.
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match map_key(key) {
                        Some(KeyAction::Pause) => paused = !paused,
                        Some(KeyAction::Restart) => {
                            seed = seed.wrapping_add(1);
                            board = new_board(&catalog, seed)?;
                            paused = false;
                            pending = None;
                        }
                        // Latest press within a tick wins.
                        Some(KeyAction::Play(input)) => pending = Some(input),
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if paused || board.game_over() {
                pending = None;
            } else {
                if let Some(input) = pending.take() {
                    board.apply_input(input);
                }
                board.update();
            }
        }
    }
}

fn new_board(catalog: &Rc<PieceCatalog>, seed: u32) -> Result<Board> {
    let mut board = Board::new(catalog.clone(), BOARD_ROWS, BOARD_COLS, seed)?;
    board.start();
    Ok(board)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
