//! Application loop: terminal, key events, and request dispatch

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::practice::PracticeService;
use crate::session::{Action, Effect, SessionState};
use crate::ui;
use input::KeyOutcome;
use state::UiState;

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Practice session state
    session: SessionState,

    /// Front-end state
    ui: UiState,

    /// Generation and review backend
    service: Arc<dyn PracticeService>,

    /// Completed requests come back here as actions
    tx: mpsc::Sender<Action>,
    rx: mpsc::Receiver<Action>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, session: SessionState, service: Arc<dyn PracticeService>) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let (tx, rx) = mpsc::channel(8);

        Ok(Self { config, session, ui: UiState::default(), service, tx, rx, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();
        tracing::info!("Session started for user {}", self.session.identity.user_id);

        loop {
            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.session, &self.ui, &theme);
            })?;
            self.ui.tick = self.ui.tick.wrapping_add(1);

            // Apply finished requests
            while let Ok(action) = self.rx.try_recv() {
                self.dispatch(action);
            }

            // Handle events
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match input::handle_key(key, &self.session, &mut self.ui) {
                            KeyOutcome::Quit => break,
                            KeyOutcome::Action(action) => self.dispatch(action),
                            KeyOutcome::Handled => {}
                        }
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Apply an action and start whatever request it asks for
    fn dispatch(&mut self, action: Action) {
        let effect = self.session.apply(action);
        self.ui.sync(&self.session);
        self.run_effect(effect);
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Generate { request, mut seen } => {
                let service = Arc::clone(&self.service);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = service.generate(&request, &mut seen).await;
                    if tx.send(Action::SentencesGenerated { seen, result }).await.is_err() {
                        tracing::debug!("App closed before generation finished");
                    }
                });
            }
            Effect::Review { original_sentence, user_answer } => {
                let service = Arc::clone(&self.service);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let outcome = service.review(&original_sentence, &user_answer).await;
                    if tx.send(Action::ReviewReceived(outcome)).await.is_err() {
                        tracing::debug!("App closed before review finished");
                    }
                });
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
