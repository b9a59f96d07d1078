#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that runs one level at a time.
//!
//! [`Game`] is the top-level state machine. It gates ticks, the countdown and
//! player actions on its [`GameState`] and derives the next state from the
//! level's completion and loss flags after each of them.

use dopo_core::{Direction, EntityId, Event, GameState, Position};
use dopo_levels::LevelConfiguration;
use dopo_world::{GameObject, IceCream, Level};

/// Top-level game session.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    level: Option<Level>,
    level_number: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            state: GameState::NotStarted,
            level: None,
            level_number: 1,
        }
    }
}

impl Game {
    /// Creates a session that has not started a level yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any running level and starts a fresh one from `configuration`.
    pub fn start_game(&mut self, configuration: &LevelConfiguration, out_events: &mut Vec<Event>) {
        let level = Level::new(configuration);
        self.level_number = level.level_number();
        self.level = Some(level);
        log::info!("starting level {}", self.level_number);
        self.enter(GameState::Playing, out_events);
    }

    /// Restarts the level from `configuration`; identical to [`Game::start_game`].
    pub fn restart_level(
        &mut self,
        configuration: &LevelConfiguration,
        out_events: &mut Vec<Event>,
    ) {
        self.start_game(configuration, out_events);
    }

    /// Freezes a running level. Returns whether the state changed.
    pub fn pause(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.enter(GameState::Paused, out_events);
        true
    }

    /// Unfreezes a paused level. Returns whether the state changed.
    pub fn resume(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.enter(GameState::Playing, out_events);
        true
    }

    /// Runs one simulation tick while playing.
    pub fn update(&mut self, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(level) = self.level.as_mut() {
            level.update(out_events);
        }
        self.refresh_state(out_events);
    }

    /// Removes one second from the countdown while playing.
    pub fn tick_clock(&mut self, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(level) = self.level.as_mut() {
            level.decrement_time(out_events);
        }
        self.refresh_state(out_events);
    }

    /// Steps an alive ice cream one cell while playing.
    pub fn move_ice_cream(
        &mut self,
        ice_cream: EntityId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(level) = self.playable_level(ice_cream) else {
            return false;
        };
        let moved = level.move_ice_cream(ice_cream, direction, out_events);
        self.refresh_state(out_events);
        moved
    }

    /// Lays a run of ice in front of an alive ice cream while playing.
    pub fn create_ice_blocks(
        &mut self,
        ice_cream: EntityId,
        out_events: &mut Vec<Event>,
    ) -> Vec<Position> {
        self.playable_level(ice_cream)
            .map(|level| level.create_ice_blocks(ice_cream, out_events))
            .unwrap_or_default()
    }

    /// Lays one block in front of an alive ice cream while playing.
    pub fn create_ice_block(
        &mut self,
        ice_cream: EntityId,
        out_events: &mut Vec<Event>,
    ) -> Option<Position> {
        self.playable_level(ice_cream)
            .and_then(|level| level.create_ice_block(ice_cream, out_events))
    }

    /// Shatters player-made ice next to an alive ice cream in `direction` while playing.
    pub fn break_ice_blocks(
        &mut self,
        ice_cream: EntityId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Vec<Position> {
        self.playable_level(ice_cream)
            .map(|level| level.break_ice_blocks(ice_cream, direction, out_events))
            .unwrap_or_default()
    }

    /// Shatters player-made ice in the direction the ice cream faces while playing.
    pub fn break_ice_blocks_ahead(
        &mut self,
        ice_cream: EntityId,
        out_events: &mut Vec<Event>,
    ) -> Vec<Position> {
        self.playable_level(ice_cream)
            .map(|level| level.break_ice_blocks_ahead(ice_cream, out_events))
            .unwrap_or_default()
    }

    /// Ends the session; any started state moves to game over.
    pub fn end_game(&mut self, out_events: &mut Vec<Event>) {
        if matches!(self.state, GameState::NotStarted | GameState::GameOver) {
            return;
        }
        self.enter(GameState::GameOver, out_events);
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Level being played, if one was started.
    #[must_use]
    pub const fn current_level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Number of the current level; 1 before any level starts.
    #[must_use]
    pub const fn current_level_number(&self) -> u32 {
        self.level_number
    }

    /// Sum of every ice cream's score, 0 without a level.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.level.as_ref().map_or(0, Level::total_score)
    }

    fn playable_level(&mut self, ice_cream: EntityId) -> Option<&mut Level> {
        if self.state != GameState::Playing {
            return None;
        }
        let level = self.level.as_mut()?;
        let alive = level
            .board()
            .get(ice_cream)
            .and_then(GameObject::as_ice_cream)
            .is_some_and(IceCream::is_alive);
        alive.then_some(level)
    }

    fn refresh_state(&mut self, out_events: &mut Vec<Event>) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(level) = self.level.as_ref() else {
            return;
        };

        if level.is_completed() {
            self.enter(GameState::LevelCompleted, out_events);
        } else if level.has_lost() {
            self.enter(GameState::GameOver, out_events);
        }
    }

    fn enter(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        log::info!("session {:?} -> {:?}", self.state, state);
        self.state = state;
        out_events.push(Event::GameStateChanged { state });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dopo_levels::LevelBuilder;

    fn config() -> LevelConfiguration {
        LevelBuilder::new()
            .add_vanilla_ice_cream(12, 7)
            .add_grape(3, 3)
            .build()
    }

    #[test]
    fn state_changes_are_announced() {
        let mut game = Game::new();
        let mut events = Vec::new();

        game.start_game(&config(), &mut events);
        assert!(game.pause(&mut events));
        assert!(!game.pause(&mut events));
        assert!(game.resume(&mut events));
        game.end_game(&mut events);

        let states: Vec<GameState> = events
            .iter()
            .filter_map(|event| match event {
                Event::GameStateChanged { state } => Some(*state),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                GameState::Playing,
                GameState::Paused,
                GameState::Playing,
                GameState::GameOver,
            ]
        );
    }

    #[test]
    fn end_game_before_start_is_ignored() {
        let mut game = Game::new();
        let mut events = Vec::new();
        game.end_game(&mut events);
        assert_eq!(game.state(), GameState::NotStarted);
        assert!(events.is_empty());
    }
}
