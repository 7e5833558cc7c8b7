//! Trigger pad TUI
//!
//! Space strikes the voice, the list edits its controls and the scope shows
//! what the audio thread just rendered.

mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use saavy_perc::binding::NamedBinding;

use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

pub struct UiApp<V> {
    title: &'static str,
    voice: V,
    bindings: Vec<NamedBinding<V>>,
    trigger: fn(&mut V),
    list_state: ListState,
    audio_buffer: Vec<f32>,
    hits: u64,
    status: String,
    should_quit: bool,
}

impl<V> UiApp<V> {
    pub fn new(
        title: &'static str,
        voice: V,
        bindings: Vec<NamedBinding<V>>,
        trigger: fn(&mut V),
    ) -> Self {
        let mut list_state = ListState::default();
        if !bindings.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            title,
            voice,
            bindings,
            trigger,
            list_state,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            hits: 0,
            status: String::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal, mut audio_rx: Consumer<f32>) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio(&mut audio_rx);

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self, audio_rx: &mut Consumer<f32>) {
        while let Ok(sample) = audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                (self.trigger)(&mut self.voice);
                self.hits += 1;
                tracing::debug!(hits = self.hits, "strike");
            }
            KeyCode::Up | KeyCode::Char('k') => self.list_state.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.list_state.select_next(),
            KeyCode::Left | KeyCode::Char('h') => self.nudge(-1),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(1),
            _ => {}
        }
    }

    fn nudge(&mut self, steps: i32) {
        let Some(binding) = self.list_state.selected().and_then(|i| self.bindings.get(i)) else {
            return;
        };

        self.status = match binding.nudge(&mut self.voice, steps) {
            Ok(()) => format!("{} = {}", binding.label, binding.read(&self.voice)),
            Err(err) => {
                tracing::warn!(%err, label = %binding.label, "binding rejected change");
                err.to_string()
            }
        };
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(6),    // Controls
                Constraint::Length(8), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let header = Paragraph::new(Line::from(format!(
            " hits: {}   {}",
            self.hits, self.status
        )))
        .block(
            Block::default()
                .title(format!(" {} ", self.title))
                .borders(Borders::ALL),
        );
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = self
            .bindings
            .iter()
            .map(|binding| ListItem::new(format!("{:<36} {}", binding.label, binding.read(&self.voice))))
            .collect();
        let list = List::new(items)
            .block(Block::default().title(" Controls ").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = Paragraph::new(" [Space] Strike  [Up/Down] Select  [Left/Right] Adjust  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
