use std::{
    io::{self, stdout},
    path::Path,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flume::Receiver;
use marksearch_search::{Debouncer, SearchState};
use ratatui::prelude::*;

use crate::config::AppConfig;
use crate::render;

const POLL_INTERVAL_MS: u64 = 30;

pub struct Viewer {
    pub title: String,
    pub input: String,
    pub state: SearchState,
    debouncer: Debouncer<String>,
    queries: Receiver<String>,
    should_quit: bool,
}

impl Viewer {
    pub fn new(title: String, text: Arc<str>, query: String, config: &AppConfig) -> Self {
        let mut state = SearchState::new(config.options);
        state.set_document(text);
        state.set_query(&query);

        let (debouncer, queries) = Debouncer::new(Duration::from_millis(config.debounce_ms));

        Self {
            title,
            input: query,
            state,
            debouncer,
            queries,
            should_quit: false,
        }
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn handle_input_changed(&mut self) {
        if self.input.trim().is_empty() {
            // Drop stale results right away instead of waiting out the timer.
            self.debouncer.cancel();
            self.queries.drain().for_each(drop);
            self.state.set_query(&self.input);
            return;
        }

        self.debouncer.schedule(self.input.clone());
    }

    /// Apply the newest debounced query, if one arrived.
    fn apply_pending_query(&mut self) {
        let Some(query) = self.queries.try_iter().last() else {
            return;
        };
        // The input may have moved on after the timer fired.
        if query != self.input {
            log::trace!("Ignoring stale query {:?}", query);
            return;
        }
        log::debug!("Searching for {:?}", query);
        self.state.set_query(&query);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.handle_input_changed();
            }
            KeyCode::Char('c') if alt => self.state.toggle_case_sensitive(),
            KeyCode::Char('w') if alt => self.state.toggle_whole_word(),
            KeyCode::Char('r') if alt => self.state.toggle_regex(),
            KeyCode::PageDown => self.state.next_page(),
            KeyCode::PageUp => self.state.previous_page(),
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.handle_input_changed();
                }
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                self.input.push(c);
                self.handle_input_changed();
            }
            _ => {}
        }
    }
}

pub fn run(path: &Path, text: Arc<str>, query: String, config: AppConfig) -> Result<()> {
    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut viewer = Viewer::new(title, text, query, &config);

    enable_raw_mode().context("Failed to enable raw mode")?;
    stdout()
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;

    let result = run_loop(&mut viewer);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result.context("Viewer terminated")
}

fn run_loop(viewer: &mut Viewer) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    loop {
        viewer.apply_pending_query();
        terminal.draw(|f| render::ui(f, viewer))?;

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    viewer.handle_key(key);
                }
            }
        }

        if viewer.should_quit {
            break;
        }
    }

    Ok(())
}
