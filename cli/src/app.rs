use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

use netcam::Dispatcher;

use crate::state::store::Store;
use crate::views::control::ControlView;
use crate::views::View;

/// How long to wait for a key before redrawing. Completions arrive from
/// worker threads, so the loop must not block on input forever.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    exit: bool,
    store: Arc<Store>,
    view: ControlView,
}

impl App {
    pub fn new(store: Arc<Store>, dispatcher: Dispatcher) -> Self {
        let view = ControlView::new(Arc::clone(&store), dispatcher);
        Self {
            exit: false,
            store,
            view,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.view.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    pub fn is_exiting(&self) -> bool {
        self.exit
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }

        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                self.handle_key(key_event)?;
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) -> io::Result<()> {
        if self.handle_shared_event(key_event) {
            return Ok(());
        }
        self.view.handle_input(key_event, &self.store)
    }

    fn handle_shared_event(&mut self, key_event: KeyEvent) -> bool {
        let idle = self.store.with_state(|state| !state.is_editing() && state.current_alert().is_none());

        match key_event.code {
            KeyCode::Char('q') if idle => {
                self.exit();
                true
            },
            _ => false,
        }
    }

    fn exit(&mut self) {
        self.exit = true;
    }
}
