use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::config::SessionConfig;
use crate::game::Direction;
use crate::gesture::{Fingers, HandFrame, LandmarkFeed, fingers_up};
use crate::input::{InputHandler, InputSource, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{InputStatus, Renderer};
use crate::session::{PointerSample, Session, TickInput};

/// Interactive game: keyboard always, plus an optional gesture source.
pub struct PlayMode {
    session: Session,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    source: InputSource,
    feed: Option<LandmarkFeed>,
    tick_interval: Duration,
    should_quit: bool,
    pending_key: Option<Direction>,
    pending_pointer: Option<PointerSample>,
    fingers: Option<Fingers>,
}

impl PlayMode {
    pub fn new(
        config: &SessionConfig,
        source: InputSource,
        feed: Option<LandmarkFeed>,
    ) -> Result<Self> {
        config.validate().context("Invalid session configuration")?;
        let session = Session::new(config).context("Failed to start game")?;

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            source,
            feed,
            tick_interval: config.tick_interval(),
            should_quit: false,
            pending_key: None,
            pending_pointer: None,
            fingers: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        if self.source == InputSource::Mouse {
            execute!(stderr, EnableMouseCapture).context("Failed to enable mouse capture")?;
        }
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        log::info!(
            "starting game with {} input, tick {:?}",
            self.source.as_str(),
            self.tick_interval
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.session.state());
                    let status = self.input_status();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.session.state(), &self.metrics, &status);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(dir) => self.pending_key = Some(dir),
                    KeyAction::Restart => self.reset_game()?,
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) if self.source == InputSource::Mouse => {
                if let Some(pos) = self.input_handler.handle_mouse_event(mouse) {
                    self.pending_pointer = Some(PointerSample::Hand(pos));
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        if let Some(feed) = self.feed.as_mut() {
            if let Some(frame) = feed.poll_latest().context("Landmark feed failed")? {
                self.handle_hand_frame(frame)?;
            }
        }

        if self.session.state().is_terminal() {
            self.pending_key = None;
            self.pending_pointer = None;
            return Ok(());
        }

        let input = TickInput {
            pointer: self.pending_pointer.take(),
            key: self.pending_key.take(),
        };
        let result = self.session.tick(input);

        if result.terminated {
            self.metrics.on_game_over(self.session.state());
        }

        Ok(())
    }

    /// Landmark frame for this tick; a fist after game over restarts.
    fn handle_hand_frame(&mut self, frame: HandFrame) -> Result<()> {
        self.fingers = frame.hand.as_ref().map(fingers_up);

        if self.session.state().is_terminal() && self.fingers == Some(Fingers::empty()) {
            log::info!("fist detected, restarting");
            return self.reset_game();
        }

        self.pending_pointer = Some(match frame.hand {
            Some(hand) => PointerSample::Hand(hand.index_tip()),
            None => PointerSample::NoHand,
        });
        Ok(())
    }

    fn input_status(&self) -> InputStatus {
        InputStatus {
            source: self.source,
            gesture: self.session.gesture_direction(),
            fingers: self.fingers,
            feed_ended: self.feed.as_ref().is_some_and(LandmarkFeed::has_ended),
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.session.restart().context("Failed to restart game")?;
        self.metrics.on_game_start();
        self.pending_key = None;
        self.pending_pointer = None;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        if self.source == InputSource::Mouse {
            execute!(terminal.backend_mut(), DisableMouseCapture)
                .context("Failed to disable mouse capture")?;
        }
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
