//! Reading helper: sends text to the backend and shows it with emphasis.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{debug, instrument, warn};

use crate::tui::markup;
use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::ui;

/// Input box plus the processed result.
#[derive(Debug, Default)]
pub struct TextProcessorScreen {
    input: String,
    result: Option<String>,
    error: Option<String>,
}

impl TextProcessorScreen {
    /// Creates an empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self, ctx), fields(len = self.input.len()))]
    async fn submit(&mut self, ctx: &mut AppContext) {
        self.error = None;
        let result = ctx.api().process_text(&self.input).await;
        match result {
            Ok(html) => {
                debug!("Showing processed text");
                self.result = Some(html);
            }
            Err(e) => {
                warn!(error = %e, "Text processing failed");
                ctx.note_error(&e);
                self.error = Some(e.message());
            }
        }
    }
}

#[async_trait(?Send)]
impl Screen for TextProcessorScreen {
    fn render(&self, frame: &mut Frame, _ctx: &AppContext) {
        let [title, body, status, help] = ui::frame_layout(frame.area());
        ui::draw_title(frame, title, "RapidRead - Reading helper");

        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(body);

        let input = Paragraph::new(self.input.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title("Your text"),
            );
        frame.render_widget(input, panes[0]);

        let output = match &self.result {
            Some(html) => Paragraph::new(markup::to_text(html, Style::default().fg(Color::Cyan))),
            None => Paragraph::new("The processed text appears here.")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(
            output
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Result")),
            panes[1],
        );

        match &self.error {
            Some(err) => ui::draw_status(frame, status, err, true),
            None => ui::draw_status(frame, status, "Type or paste text, then press Enter", false),
        }

        ui::draw_help(
            frame,
            help,
            "Enter: Process | Alt+Enter: New line | Ctrl+U: Clear | Esc: Home",
        );
    }

    #[instrument(skip(self, key, ctx))]
    async fn handle_key(&mut self, key: KeyEvent, ctx: &mut AppContext) -> ScreenTransition {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => ScreenTransition::GoToHome,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.push('\n');
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                self.submit(ctx).await;
                ScreenTransition::Stay
            }
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.result = None;
                self.error = None;
                ScreenTransition::Stay
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.input.pop();
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }
}
