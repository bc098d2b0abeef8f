//! Terminal Tetris runner (default binary).
//!
//! One current-thread tokio runtime drives everything: the game loop ticker
//! and the key reader both feed a single `select!`, so every session call
//! happens on this thread, one at a time. Prints the final score as JSON on
//! exit.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

use tlol_tetris::core::{GameSnapshot, ScoreSummary};
use tlol_tetris::engine::{tokio_ticker, GameSession, TokioTicker};
use tlol_tetris::input::{map_key, InputCommand};
use tlol_tetris::term::{FrameBuffer, TermView, TerminalRenderer, Viewport};
use tlol_tetris::types::GameSettings;

type Session = GameSession<TermView, TokioTicker>;

const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = GameSettings::from_env()?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = rt.block_on(run(&mut term, settings));

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

async fn run(term: &mut TerminalRenderer, settings: GameSettings) -> Result<ScoreSummary> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let view = TermView::new(
        settings.board.total_columns,
        settings.board.total_rows,
        Viewport::new(w, h),
    );

    let (ticker, mut ticks) = tokio_ticker();
    let mut session: Session = GameSession::new(settings, ticker)?;
    session.initialize(Some(view))?;
    session.start();

    let mut events = spawn_input_reader();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(w, h);

    loop {
        draw(term, &session, &mut snapshot, &mut fb)?;

        tokio::select! {
            Some(_) = ticks.recv() => {
                session.tick();
            }
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                if !handle_event(&mut session, term, event) {
                    break;
                }
            }
        }
    }

    Ok(session.summary())
}

/// Apply one terminal event. Returns false when the player quits.
fn handle_event(session: &mut Session, term: &mut TerminalRenderer, event: Event) -> bool {
    match event {
        Event::Key(key) => match map_key(key) {
            Some(InputCommand::Quit) => return false,
            Some(InputCommand::Restart) => {
                if let Err(err) = session.restart() {
                    log::warn!("restart failed: {}", err);
                }
            }
            Some(InputCommand::Move(direction)) => {
                session.run(Some(direction));
            }
            None => {}
        },
        Event::Resize(w, h) => {
            if let Some(view) = session.view_mut() {
                view.set_viewport(Viewport::new(w, h));
            }
            term.invalidate();
        }
        _ => {}
    }
    true
}

fn draw(
    term: &mut TerminalRenderer,
    session: &Session,
    snapshot: &mut GameSnapshot,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let Some(view) = session.view() else {
        return Ok(());
    };
    session.snapshot_into(snapshot);
    view.render_into(snapshot, fb);
    term.draw(fb)
}

/// Read terminal events on a plain thread and hand them to the runtime.
///
/// The thread exits once the receiver is gone.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("terminal read failed: {}", err);
                    break;
                }
            },
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(err) => {
                log::error!("terminal poll failed: {}", err);
                break;
            }
        }
    });
    rx
}
