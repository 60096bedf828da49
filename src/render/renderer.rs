use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, Direction, GameState, GameStatus, Position};
use crate::gesture::Fingers;
use crate::input::InputSource;
use crate::metrics::GameMetrics;

/// Input status shown next to the score
#[derive(Debug, Clone, Copy)]
pub struct InputStatus {
    pub source: InputSource,
    /// Direction the gesture classifier is holding
    pub gesture: Option<Direction>,
    /// Raised fingers in the latest landmark frame
    pub fingers: Option<Fingers>,
    /// The landmark tracker closed its stream
    pub feed_ended: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        input: &InputStatus,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, input), chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let over = match state.status {
            GameStatus::Running => None,
            GameStatus::BoardCleared => Some(("BOARD CLEARED", "No room left for food")),
            GameStatus::Crashed(CollisionType::Wall) => Some(("GAME OVER", "Hit the wall")),
            GameStatus::Crashed(CollisionType::SelfCollision) => {
                Some(("GAME OVER", "Bit your own tail"))
            }
        };

        match over {
            None => frame.render_widget(self.render_grid(state), game_area),
            Some((title, reason)) => frame.render_widget(
                self.render_game_over(state, title, reason, input),
                game_area,
            ),
        }

        frame.render_widget(self.render_controls(input), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        input: &InputStatus,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Input: ", label),
            Span::styled(input.source.as_str(), value),
        ];

        if input.source != InputSource::Keyboard {
            let gesture = input.gesture.map_or("-", |dir| dir.as_str());
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Swipe: ", label));
            spans.push(Span::styled(gesture, Style::default().fg(Color::Cyan)));
        }

        if let Some(fingers) = input.fingers {
            let names: Vec<&str> = fingers.iter_names().map(|(name, _)| name).collect();
            let shown = if names.is_empty() {
                "FIST".to_string()
            } else {
                names.join(" ")
            };
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Hand: ", label));
            spans.push(Span::styled(shown, value));
        }

        if input.feed_ended {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Tracker: ", label));
            spans.push(Span::styled("ended", Style::default().fg(Color::Red)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        state: &GameState,
        title: &'static str,
        reason: &'static str,
        input: &InputStatus,
    ) -> Paragraph<'_> {
        let mut prompt = vec![Span::styled("Press ", Style::default().fg(Color::Gray))];
        prompt.extend(command_spans());

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(prompt),
        ];

        if input.source == InputSource::Landmarks {
            text.push(Line::from(Span::styled(
                "Make a fist to restart",
                Style::default().fg(Color::Gray),
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, input: &InputStatus) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
        ];

        match input.source {
            InputSource::Mouse => {
                spans.push(Span::styled("Swipe the mouse", Style::default().fg(Color::Cyan)));
                spans.push(Span::raw(" to steer | "));
            }
            InputSource::Landmarks => {
                spans.push(Span::styled("Swipe a finger", Style::default().fg(Color::Cyan)));
                spans.push(Span::raw(" to steer | "));
            }
            InputSource::Keyboard => {}
        }

        spans.extend(command_spans());

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

/// Restart and quit keys, active whether or not the game is over
fn command_spans() -> Vec<Span<'static>> {
    vec![
        Span::styled(
            "R",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to restart | "),
        Span::styled(
            "Q",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to quit"),
    ]
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
