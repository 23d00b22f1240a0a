//! src/main.rs
//! Terminal front end for the explorer controller

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TerminalEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{debug, error, info, warn};

use explorer_core::{
    Logger,
    config::Config,
    controller::{Action, ExplorerController},
    model::entries::Section,
    service::{FileService, LocalFileService},
    view::{theme, ui::UIRenderer},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let config = Config::load().await.unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e:#}");
        Config::default()
    });
    let _log_guard = Logger::init(&config.logging).context("Failed to initialize logging")?;
    info!("Starting explorer");

    let app = App::new(&config).context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

/// What a key press asks the loop to do.
enum Flow {
    Continue,
    Redraw,
    Quit,
}

struct App {
    terminal: AppTerminal,
    controller: ExplorerController,
    action_rx: mpsc::UnboundedReceiver<Action>,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        theme::init_theme();

        let service: Arc<dyn FileService> = Arc::new(LocalFileService::new(config.index.roots.clone()));
        let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
        let controller = ExplorerController::new(service, config, action_tx);

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        Ok(Self {
            terminal,
            controller,
            action_rx,
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        self.controller.initialize();

        let mut event_stream = EventStream::new();
        let mut dirty = true;

        loop {
            if dirty {
                self.render()?;
                dirty = false;
            }

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(TerminalEvent::Key(key))) => match self.on_key(key) {
                            Flow::Quit => break,
                            Flow::Redraw => dirty = true,
                            Flow::Continue => {}
                        },
                        Some(Ok(TerminalEvent::Resize(..))) => dirty = true,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => warn!("Terminal event error: {}", e),
                        None => break,
                    }
                }

                Some(event) = self.controller.next_event() => {
                    dirty |= self.controller.handle_event(event);
                }

                Some(action) = self.action_rx.recv() => {
                    match action {
                        Action::Navigate(path) => debug!("router now at {}", path),
                    }
                    dirty = true;
                }
            }
        }

        self.controller.shutdown();
        info!("Event loop terminated cleanly");
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        let ctl = &mut self.controller;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') if ctrl => return Flow::Quit,
            KeyCode::Char('h') if ctrl => {
                ctl.home();
            }
            KeyCode::Char('b') if ctrl => {
                ctl.back();
            }
            KeyCode::Char('r') if ctrl => ctl.refresh_all(),
            KeyCode::Char('n') if ctrl => {
                ctl.show_more_results();
            }
            KeyCode::Char(c) if !ctrl => {
                let mut text = ctl.search().state().query_text.to_string();
                text.push(c);
                ctl.on_search_input(&text);
            }
            KeyCode::Backspace => {
                let mut text = ctl.search().state().query_text.to_string();
                text.pop();
                ctl.on_search_input(&text);
            }
            KeyCode::Esc => ctl.clear_search(),
            KeyCode::Tab => {
                ctl.cycle_view_mode();
            }
            KeyCode::F(n @ 1..=4) => ctl.open_route(Section::ALL[usize::from(n - 1)].route()),
            _ => return Flow::Continue,
        }
        Flow::Redraw
    }

    fn render(&mut self) -> Result<()> {
        let Self {
            terminal,
            controller,
            ui_renderer,
            ..
        } = self;

        terminal
            .draw(|f| ui_renderer.render(f, controller))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                match signal(SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = sigterm.recv() => info!("Received SIGTERM"),
                            _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                        }
                    }
                    Err(e) => {
                        warn!("Failed to create SIGTERM handler: {}", e);
                        if signal::ctrl_c().await.is_err() {
                            return;
                        }
                    }
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
