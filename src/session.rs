//! One play session: the game state plus the classifier memory feeding it.
//!
//! [`Session::tick`] runs a single tick of the loop without touching the
//! terminal, so the input precedence rules can be exercised directly.

use crate::config::SessionConfig;
use crate::game::{Direction, GameEngine, GameError, GameState, Position, StepResult};
use crate::gesture::{ClassifierConfig, DirectionClassifier};

/// A pointer observation delivered this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSample {
    /// Reference point of the tracked hand (or mouse pointer)
    Hand(Position),
    /// A frame arrived but contained no hand
    NoHand,
}

impl PointerSample {
    fn position(self) -> Option<Position> {
        match self {
            PointerSample::Hand(pos) => Some(pos),
            PointerSample::NoHand => None,
        }
    }
}

/// Inputs gathered since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub pointer: Option<PointerSample>,
    pub key: Option<Direction>,
}

pub struct Session {
    engine: GameEngine,
    state: GameState,
    classifier: DirectionClassifier,
    classifier_config: ClassifierConfig,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self, GameError> {
        Self::from_engine(GameEngine::new(config.game)?, config.classifier)
    }

    /// Session with reproducible food placement
    pub fn with_seed(config: &SessionConfig, seed: u64) -> Result<Self, GameError> {
        Self::from_engine(GameEngine::with_seed(config.game, seed)?, config.classifier)
    }

    fn from_engine(
        mut engine: GameEngine,
        classifier_config: ClassifierConfig,
    ) -> Result<Self, GameError> {
        let state = engine.reset()?;
        Ok(Self {
            engine,
            state,
            classifier: DirectionClassifier::new(classifier_config),
            classifier_config,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Direction the classifier is currently holding
    pub fn gesture_direction(&self) -> Option<Direction> {
        self.classifier.last_direction()
    }

    /// Run one tick: gesture request, then key request, then a step.
    ///
    /// Only a swipe made this tick is requested; a held gesture never
    /// overrides a later key press. Both requests go through the reversal
    /// guard; when both are present the key is applied last and wins.
    pub fn tick(&mut self, input: TickInput) -> StepResult {
        let swipe = input
            .pointer
            .and_then(|sample| self.classifier.next_swipe(sample.position()));
        if let Some(direction) = swipe {
            self.engine.request_direction(&mut self.state, direction);
        }

        if let Some(direction) = input.key {
            self.engine.request_direction(&mut self.state, direction);
        }

        self.engine.step(&mut self.state)
    }

    /// Fresh game and fresh classifier memory
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.state = self.engine.reset()?;
        self.classifier = DirectionClassifier::new(self.classifier_config);
        Ok(())
    }
}
