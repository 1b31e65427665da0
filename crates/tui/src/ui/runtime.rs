//! Runtime: event loop and terminal lifecycle for the dashboard TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Forward terminal input from a dedicated blocking thread.
//! - Spawn one task per dispatched gateway call and feed each completion back
//!   into the dashboard as a message.
//! - Redraw only after something visible changed.
//!
//! Ticking runs fast while a call is in flight or a toast is showing and
//! slows down when idle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use provadmin_api::{GatewayError, GatewayErrorKind, ProviderGateway};
use provadmin_engine::{Completion, Dashboard, Msg, Ticket};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::app::App;
use crate::ui::main_view;
use crate::ui::theme;

type Backend = CrosstermBackend<std::io::Stdout>;

/// Spawn a dedicated OS thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs a ticket on the Tokio pool. A panicking call still completes its
/// ticket so the dashboard's in-flight count settles.
fn spawn_ticket(gateway: &Arc<dyn ProviderGateway>, ticket: Ticket) -> BoxFuture<'static, Msg> {
    debug!(call = ticket.call.label(), generation = ticket.generation, "dispatching");
    let gateway = Arc::clone(gateway);
    let fallback = ticket.clone();
    let handle = tokio::spawn(async move { provadmin_engine::execute(gateway.as_ref(), ticket).await });
    async move {
        handle.await.unwrap_or_else(|error| {
            warn!("Gateway task failed: {}", error);
            Completion {
                ticket: fallback,
                outcome: Err(GatewayError::new(GatewayErrorKind::Network, format!("task failed: {error}"))),
            }
            .into_msg()
        })
    }
    .boxed()
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop and always restores the terminal on the way out.
pub async fn run_app(gateway: Arc<dyn ProviderGateway>) -> Result<()> {
    let mut app = App::new(Dashboard::new(), theme::load());
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, gateway).await;
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(terminal: &mut Terminal<Backend>, app: &mut App, gateway: Arc<dyn ProviderGateway>) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut pending: FuturesUnordered<BoxFuture<'static, Msg>> = FuturesUnordered::new();
    for ticket in app.apply(Msg::LoadRequested) {
        pending.push(spawn_ticket(&gateway, ticket));
    }

    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(1000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    terminal.draw(|frame| main_view::draw(frame, app))?;

    while !app.should_quit {
        let needs_animation = app.is_busy() || !app.toasts.is_empty();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                            break;
                        }
                        for ticket in app.handle_key(key) {
                            pending.push(spawn_ticket(&gateway, ticket));
                        }
                        needs_render = true;
                    }
                    Event::Resize(..) => needs_render = true,
                    _ => {}
                }
            }

            _ = ticker.tick() => {
                needs_render = app.tick(Instant::now());
            }

            Some(msg) = pending.next(), if !pending.is_empty() => {
                for ticket in app.apply(msg) {
                    pending.push(spawn_ticket(&gateway, ticket));
                }
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if needs_render {
            terminal.draw(|frame| main_view::draw(frame, app))?;
        }
    }
    Ok(())
}
