//! Home menu, reachable only when signed in.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{info, instrument};

use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::ui;

/// Menu options on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    TextProcessor,
    TicTacToe,
    HigherLower,
    LogOut,
    Quit,
}

impl MenuOption {
    const ALL: [MenuOption; 5] = [
        Self::TextProcessor,
        Self::TicTacToe,
        Self::HigherLower,
        Self::LogOut,
        Self::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::TextProcessor => "Reading helper",
            Self::TicTacToe => "Tic-tac-toe",
            Self::HigherLower => "Higher or lower",
            Self::LogOut => "Log out",
            Self::Quit => "Quit",
        }
    }

    fn transition(self) -> ScreenTransition {
        match self {
            Self::TextProcessor => ScreenTransition::GoToTextProcessor,
            Self::TicTacToe => ScreenTransition::GoToTicTacToe,
            Self::HigherLower => ScreenTransition::GoToHigherLower,
            Self::LogOut => ScreenTransition::LogOut,
            Self::Quit => ScreenTransition::Quit,
        }
    }
}

/// State for the home screen.
#[derive(Debug)]
pub struct HomeScreen {
    list_state: ListState,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    /// Creates the menu with the first entry selected.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn selected_option(&self) -> MenuOption {
        let idx = self.list_state.selected().unwrap_or(0);
        MenuOption::ALL[idx.min(MenuOption::ALL.len() - 1)]
    }

    fn step(&mut self, forward: bool) {
        let count = MenuOption::ALL.len();
        let i = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (i + 1) % count
        } else {
            (i + count - 1) % count
        };
        self.list_state.select(Some(next));
    }
}

#[async_trait(?Send)]
impl Screen for HomeScreen {
    fn render(&self, frame: &mut Frame, ctx: &AppContext) {
        let [title, body, status, help] = ui::frame_layout(frame.area());
        ui::draw_title(frame, title, "RapidRead - Home");

        let items: Vec<ListItem> = MenuOption::ALL
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, ui::center_rect(body, 40, 7), &mut list_state);

        let greeting = match ctx.session().user() {
            Some(user) => format!("Signed in as {} ({})", user.username(), user.email()),
            None => "Not signed in".to_string(),
        };
        let bar = Paragraph::new(greeting)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(bar, status);

        ui::draw_help(frame, help, "↑↓: Navigate | Enter: Select | l: Log out | q: Quit");
    }

    #[instrument(skip(self, key, _ctx))]
    async fn handle_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.step(false);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.step(true);
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                option.transition()
            }
            KeyCode::Char('l') => ScreenTransition::LogOut,
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut screen = HomeScreen::new();
        screen.step(false);
        assert_eq!(screen.selected_option(), MenuOption::Quit);
        screen.step(true);
        assert_eq!(screen.selected_option(), MenuOption::TextProcessor);
        screen.step(true);
        assert_eq!(screen.selected_option().transition(), ScreenTransition::GoToTicTacToe);
    }
}
