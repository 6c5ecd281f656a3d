//! Tic-tac-toe against the CPU.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::games::tictactoe::{Effect, Event, Phase, Position, TicTacToeController};
use crate::schedule::Scheduler;
use crate::tui::input::{digit_position, move_cursor};
use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::ui;

/// Board view plus the CPU reply timer.
#[derive(Debug)]
pub struct TicTacToeScreen {
    game: TicTacToeController,
    scheduler: Scheduler<Event>,
    deferred: mpsc::UnboundedReceiver<Event>,
    cursor: Position,
    history_window: usize,
}

impl TicTacToeScreen {
    /// Starts a fresh game with the configured delays.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_controller(
            TicTacToeController::new(config.opponent_delay()),
            *config.history_window(),
        )
    }

    /// Wraps an existing controller.
    pub fn with_controller(game: TicTacToeController, history_window: usize) -> Self {
        let (scheduler, deferred) = Scheduler::channel();
        Self {
            game,
            scheduler,
            deferred,
            cursor: Position::Center,
            history_window,
        }
    }

    /// The game being shown.
    pub fn game(&self) -> &TicTacToeController {
        &self.game
    }

    /// Applies `event` and carries out the resulting effect.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: Event) {
        match self.game.apply(event) {
            Effect::ScheduleOpponent { round, after } => {
                self.scheduler.schedule(after, Event::OpponentDue(round));
            }
            Effect::Reset { round } => {
                self.scheduler.cancel();
                debug!(round = %round, "Board reset");
            }
            Effect::Finished(outcome) => info!(outcome = outcome.as_str(), "Game over"),
            Effect::OpponentMoved(pos) => debug!(position = %pos, "CPU moved"),
            Effect::Ignored => {}
        }
    }

    fn status_text(&self) -> String {
        if let Some(status) = self.game.status() {
            return status.to_string();
        }
        match self.game.phase() {
            Phase::AwaitingUser => format!("Your turn ({})", self.game.user()),
            Phase::AwaitingOpponent => "CPU is thinking...".to_string(),
            Phase::Terminal(outcome) => outcome.as_str().to_string(),
        }
    }
}

#[async_trait(?Send)]
impl Screen for TicTacToeScreen {
    fn render(&self, frame: &mut Frame, _ctx: &AppContext) {
        let [title, body, status, help] = ui::frame_layout(frame.area());
        ui::draw_title(frame, title, "RapidRead - Tic-tac-toe");

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(42), Constraint::Length(30)])
            .split(body);

        let cursor = (self.game.phase() == Phase::AwaitingUser).then_some(self.cursor);
        ui::draw_board(frame, panes[0], self.game.board(), cursor);

        let recent = self.game.history().recent(self.history_window);
        let side = Paragraph::new(vec![
            Line::from(format!("You: {}   CPU: {}", self.game.user(), self.game.user().other())),
            Line::from(""),
            Line::from(format!("Last {} games:", self.history_window)),
            ui::history_line(recent),
            Line::from(""),
            Line::from(format!("Played: {}", self.game.history().len())),
        ])
        .block(Block::default().borders(Borders::ALL).title("History"))
        .style(Style::default().fg(Color::White));
        frame.render_widget(side, panes[1]);

        ui::draw_status(frame, status, &self.status_text(), false);
        ui::draw_help(
            frame,
            help,
            "Arrows/1-9: Move | Enter: Place | r: Reset | h: Higher/Lower | l: Log out | Esc: Home",
        );
    }

    #[instrument(skip(self, key, _ctx))]
    async fn handle_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) -> ScreenTransition {
        if let Some(pos) = digit_position(key.code) {
            self.cursor = pos;
            self.dispatch(Event::CellSelected(pos));
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.dispatch(Event::CellSelected(self.cursor));
                ScreenTransition::Stay
            }
            KeyCode::Char('r') => {
                self.dispatch(Event::Reset);
                ScreenTransition::Stay
            }
            KeyCode::Char('h') => ScreenTransition::GoToHigherLower,
            KeyCode::Char('l') => ScreenTransition::LogOut,
            KeyCode::Esc | KeyCode::Char('q') => ScreenTransition::GoToHome,
            _ => ScreenTransition::Stay,
        }
    }

    fn tick(&mut self, _ctx: &mut AppContext) -> ScreenTransition {
        while let Ok(event) = self.deferred.try_recv() {
            self.dispatch(event);
        }
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::games::tictactoe::Mark;
    use std::time::Duration;

    fn context() -> AppContext {
        let api = ApiClient::new("http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
        AppContext::new(api, AppConfig::default())
    }

    fn screen() -> TicTacToeScreen {
        TicTacToeScreen::with_controller(
            TicTacToeController::seeded(Duration::from_millis(500), 3),
            3,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_cpu_replies_after_delay() {
        let mut ctx = context();
        let mut screen = screen();

        screen
            .handle_key(KeyEvent::from(KeyCode::Char('1')), &mut ctx)
            .await;
        assert_eq!(screen.game().phase(), Phase::AwaitingOpponent);
        assert_eq!(screen.game().board().occupied(), 1);

        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        screen.tick(&mut ctx);

        assert_eq!(screen.game().phase(), Phase::AwaitingUser);
        assert_eq!(screen.game().board().occupied(), 2);
        assert_eq!(screen.game().to_move(), Some(Mark::X));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_drops_pending_reply() {
        let mut ctx = context();
        let mut screen = screen();

        screen.dispatch(Event::CellSelected(Position::TopLeft));
        screen
            .handle_key(KeyEvent::from(KeyCode::Char('r')), &mut ctx)
            .await;

        tokio::time::sleep(Duration::from_secs(2)).await;
        screen.tick(&mut ctx);

        assert_eq!(screen.game().board().occupied(), 0);
        assert_eq!(screen.game().phase(), Phase::AwaitingUser);
    }

    #[tokio::test]
    async fn test_navigation_keys() {
        let mut ctx = context();
        let mut screen = screen();
        let key = |c| KeyEvent::from(KeyCode::Char(c));

        assert_eq!(
            screen.handle_key(key('h'), &mut ctx).await,
            ScreenTransition::GoToHigherLower
        );
        assert_eq!(screen.handle_key(key('l'), &mut ctx).await, ScreenTransition::LogOut);
        assert_eq!(
            screen.handle_key(KeyEvent::from(KeyCode::Esc), &mut ctx).await,
            ScreenTransition::GoToHome
        );
    }
}
