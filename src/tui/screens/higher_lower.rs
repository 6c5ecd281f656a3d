//! Higher/lower guessing game.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::games::higher_lower::{
    Effect, Event, Guess, HigherLowerController, MAX_NUMBER, MIN_NUMBER, Phase, ROUNDS,
};
use crate::schedule::Scheduler;
use crate::tui::screen::{AppContext, Screen, ScreenTransition};
use crate::tui::ui;

/// Number cards plus the reveal timer.
#[derive(Debug)]
pub struct HigherLowerScreen {
    game: HigherLowerController,
    scheduler: Scheduler<Event>,
    deferred: mpsc::UnboundedReceiver<Event>,
}

impl HigherLowerScreen {
    /// Starts a fresh session with the configured reveal delay.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_controller(HigherLowerController::new(config.reveal_delay()))
    }

    /// Wraps an existing controller.
    pub fn with_controller(game: HigherLowerController) -> Self {
        let (scheduler, deferred) = Scheduler::channel();
        Self {
            game,
            scheduler,
            deferred,
        }
    }

    /// The session being shown.
    pub fn game(&self) -> &HigherLowerController {
        &self.game
    }

    /// Applies `event` and carries out the resulting effect.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: Event) {
        match self.game.apply(event) {
            Effect::ScheduleReveal { round, after, correct } => {
                debug!(correct, "Revealing next number");
                self.scheduler.schedule(after, Event::RevealElapsed(round));
            }
            Effect::Replayed { round } => {
                self.scheduler.cancel();
                debug!(round = %round, "New session");
            }
            Effect::Finished(outcome) => info!(outcome = outcome.as_str(), "Session over"),
            Effect::NextRound { played } => debug!(played, "Next round"),
            Effect::Ignored => {}
        }
    }

    fn status_text(&self) -> String {
        if let Some(status) = self.game.status() {
            return format!("{} Score: {}/{}", status, self.game.score(), ROUNDS);
        }
        match self.game.phase() {
            Phase::AwaitingGuess => format!(
                "Will the next number ({}-{}) be higher or lower?",
                MIN_NUMBER, MAX_NUMBER
            ),
            Phase::RevealDelay { correct: true, .. } => "Correct!".to_string(),
            Phase::RevealDelay { correct: false, .. } => "Wrong!".to_string(),
            Phase::RoundOver(outcome) => outcome.as_str().to_string(),
        }
    }
}

fn card(value: Option<u8>, title: &'static str) -> Paragraph<'static> {
    let text = value.map_or_else(|| "?".to_string(), |v| v.to_string());
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(title))
}

#[async_trait(?Send)]
impl Screen for HigherLowerScreen {
    fn render(&self, frame: &mut Frame, _ctx: &AppContext) {
        let [title, body, status, help] = ui::frame_layout(frame.area());
        ui::draw_title(frame, title, "RapidRead - Higher or lower");

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(4)])
            .split(body);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        frame.render_widget(card(Some(self.game.current()), "Current"), cards[0]);
        frame.render_widget(card(self.game.revealed(), "Next"), cards[1]);

        let round = (self.game.played() + 1).min(ROUNDS);
        let info = Paragraph::new(vec![
            Line::from(format!(
                "Round {} of {}   Score: {}",
                round,
                ROUNDS,
                self.game.score()
            )),
            Line::from(""),
            Line::from("Results:"),
            ui::history_line(self.game.history().entries()),
        ])
        .block(Block::default().borders(Borders::ALL).title("Session"));
        frame.render_widget(info, rows[1]);

        ui::draw_status(frame, status, &self.status_text(), false);
        ui::draw_help(
            frame,
            help,
            "↑: Higher | ↓: Lower | r: Play again | t: Tic-tac-toe | l: Log out | Esc: Home",
        );
    }

    #[instrument(skip(self, key, _ctx))]
    async fn handle_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Char('+') => {
                self.dispatch(Event::Guess(Guess::Higher));
                ScreenTransition::Stay
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.dispatch(Event::Guess(Guess::Lower));
                ScreenTransition::Stay
            }
            KeyCode::Char('r') => {
                self.dispatch(Event::Replay);
                ScreenTransition::Stay
            }
            KeyCode::Char('t') => ScreenTransition::GoToTicTacToe,
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
