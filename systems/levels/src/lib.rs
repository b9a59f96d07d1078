#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Declarative level assembly for Dopo Cream.
//!
//! A [`LevelConfiguration`] lists everything a level starts with: the board
//! dimensions, the countdown, the seed feeding every random decision, the
//! ice creams, the fruit waves, the enemies and the obstacles. Configurations
//! are assembled through [`LevelBuilder`], produced by a [`LevelTemplate`], or
//! deserialized by adapters; they are never mutated once built.

use dopo_core::{Direction, EnemyKind, Flavor, FruitKind, ObstacleKind, Position, Tuning};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod templates;

pub use templates::{
    configuration_for, template, templates, Difficulty, Level1Template, Level2Template,
    Level3Template, Level4Template, LevelTemplate,
};

/// Default board width used by the bundled levels.
pub const DEFAULT_WIDTH: u32 = 25;
/// Default board height used by the bundled levels.
pub const DEFAULT_HEIGHT: u32 = 15;
/// Default countdown, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 180;
/// Seed used when a configuration does not provide one.
pub const DEFAULT_SEED: u64 = 0x5eed_d0b0_c4ea_3001;

/// Starting placement of a player-controlled ice cream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCreamPlacement {
    /// Flavor of the ice cream.
    pub flavor: Flavor,
    /// Starting cell.
    pub position: Position,
}

/// Placement of a fruit objective inside a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitPlacement {
    /// Species of the fruit.
    pub kind: FruitKind,
    /// Cell the fruit appears on when its wave activates.
    pub position: Position,
    /// Whether a cactus starts with its spikes out. Ignored by other fruits.
    #[serde(default)]
    pub spiked: bool,
}

/// Starting placement of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    /// Species of the enemy.
    pub kind: EnemyKind,
    /// Starting cell.
    pub position: Position,
    /// Initial facing; drawn from the level's seeded generator when absent.
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// Placement of a level-authored obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// Kind of obstacle.
    pub kind: ObstacleKind,
    /// Cell the obstacle occupies.
    pub position: Position,
}

/// Reasons a configuration may be rejected by [`LevelConfiguration::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board has no cells.
    #[error("board must have at least one cell, got {width}x{height}")]
    EmptyBoard {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// A placement lies outside the board.
    #[error("{entity} placement at {position} lies outside the board")]
    OutOfBounds {
        /// Kind of entity that was misplaced.
        entity: &'static str,
        /// Offending position.
        position: Position,
    },
    /// The level has nobody to play with.
    #[error("level must contain at least one ice cream")]
    NoIceCreams,
}

/// Immutable description of a level's starting state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfiguration {
    level_number: u32,
    width: u32,
    height: u32,
    time_limit_secs: u32,
    seed: u64,
    tuning: Tuning,
    ice_creams: Vec<IceCreamPlacement>,
    fruit_waves: Vec<Vec<FruitPlacement>>,
    enemies: Vec<EnemyPlacement>,
    obstacles: Vec<ObstaclePlacement>,
}

impl Default for LevelConfiguration {
    fn default() -> Self {
        Self {
            level_number: 1,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            seed: DEFAULT_SEED,
            tuning: Tuning::default(),
            ice_creams: Vec::new(),
            fruit_waves: Vec::new(),
            enemies: Vec::new(),
            obstacles: Vec::new(),
        }
    }
}

impl LevelConfiguration {
    /// Number reported by the session for this level.
    #[must_use]
    pub const fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Width of the board in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the board in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Countdown granted to the players, in seconds.
    #[must_use]
    pub const fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Seed of the level's random generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Timed behaviour knobs.
    #[must_use]
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Ice creams in placement order.
    #[must_use]
    pub fn ice_creams(&self) -> &[IceCreamPlacement] {
        &self.ice_creams
    }

    /// Fruit waves in activation order.
    #[must_use]
    pub fn fruit_waves(&self) -> &[Vec<FruitPlacement>] {
        &self.fruit_waves
    }

    /// Fruits of the wave at `index`, or an empty slice for unknown indices.
    #[must_use]
    pub fn wave(&self, index: usize) -> &[FruitPlacement] {
        self.fruit_waves.get(index).map_or(&[], Vec::as_slice)
    }

    /// Every fruit across all waves, in activation order.
    pub fn fruits(&self) -> impl Iterator<Item = &FruitPlacement> {
        self.fruit_waves.iter().flatten()
    }

    /// Enemies in placement order.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyPlacement] {
        &self.enemies
    }

    /// Obstacles in placement order.
    #[must_use]
    pub fn obstacles(&self) -> &[ObstaclePlacement] {
        &self.obstacles
    }

    /// Reports whether the position lies on the configured board.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x() >= 0
            && position.y() >= 0
            && position.x().unsigned_abs() < self.width
            && position.y().unsigned_abs() < self.height
    }

    /// Returns the same layout driven by a different random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that the configuration describes a playable level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }

        if self.ice_creams.is_empty() {
            return Err(ConfigError::NoIceCreams);
        }

        let placements = self
            .ice_creams
            .iter()
            .map(|placement| ("ice cream", placement.position))
            .chain(self.fruits().map(|placement| ("fruit", placement.position)))
            .chain(
                self.enemies
                    .iter()
                    .map(|placement| ("enemy", placement.position)),
            )
            .chain(
                self.obstacles
                    .iter()
                    .map(|placement| ("obstacle", placement.position)),
            );

        for (entity, position) in placements {
            if !self.contains(position) {
                return Err(ConfigError::OutOfBounds { entity, position });
            }
        }

        Ok(())
    }
}

/// Fluent assembler for [`LevelConfiguration`] values.
#[derive(Clone, Debug, Default)]
pub struct LevelBuilder {
    config: LevelConfiguration,
}

impl LevelBuilder {
    /// Creates a builder for a 25×15 board with a three minute countdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level number reported by the session.
    #[must_use]
    pub fn with_level_number(mut self, level_number: u32) -> Self {
        self.config.level_number = level_number;
        self
    }

    /// Sets the board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Sets the countdown, in seconds.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.config.time_limit_secs = seconds;
        self
    }

    /// Sets the seed of the level's random generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replaces the timed behaviour knobs.
    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.config.tuning = tuning;
        self
    }

    /// Places an ice cream of the given flavor.
    #[must_use]
    pub fn add_ice_cream(mut self, flavor: Flavor, x: i32, y: i32) -> Self {
        self.config.ice_creams.push(IceCreamPlacement {
            flavor,
            position: Position::new(x, y),
        });
        self
    }

    /// Places a vanilla ice cream.
    #[must_use]
    pub fn add_vanilla_ice_cream(self, x: i32, y: i32) -> Self {
        self.add_ice_cream(Flavor::Vanilla, x, y)
    }

    /// Places a strawberry ice cream.
    #[must_use]
    pub fn add_strawberry_ice_cream(self, x: i32, y: i32) -> Self {
        self.add_ice_cream(Flavor::Strawberry, x, y)
    }

    /// Places a chocolate ice cream.
    #[must_use]
    pub fn add_chocolate_ice_cream(self, x: i32, y: i32) -> Self {
        self.add_ice_cream(Flavor::Chocolate, x, y)
    }

    /// Closes the current wave so subsequent fruits land in a new one.
    ///
    /// Calling this while the current wave is still empty has no effect.
    #[must_use]
    pub fn start_new_wave(mut self) -> Self {
        let current_is_empty = self
            .config
            .fruit_waves
            .last()
            .is_some_and(|wave| wave.is_empty());
        if !current_is_empty {
            self.config.fruit_waves.push(Vec::new());
        }
        self
    }

    fn push_fruit(mut self, placement: FruitPlacement) -> Self {
        if self.config.fruit_waves.is_empty() {
            self.config.fruit_waves.push(Vec::new());
        }
        if let Some(wave) = self.config.fruit_waves.last_mut() {
            wave.push(placement);
        }
        self
    }

    /// Adds a fruit of the given kind to the current wave.
    #[must_use]
    pub fn add_fruit(self, kind: FruitKind, x: i32, y: i32) -> Self {
        self.push_fruit(FruitPlacement {
            kind,
            position: Position::new(x, y),
            spiked: false,
        })
    }

    /// Adds a grape to the current wave.
    #[must_use]
    pub fn add_grape(self, x: i32, y: i32) -> Self {
        self.add_fruit(FruitKind::Grape, x, y)
    }

    /// Adds a banana to the current wave.
    #[must_use]
    pub fn add_banana(self, x: i32, y: i32) -> Self {
        self.add_fruit(FruitKind::Banana, x, y)
    }

    /// Adds a cherry to the current wave.
    #[must_use]
    pub fn add_cherry(self, x: i32, y: i32) -> Self {
        self.add_fruit(FruitKind::Cherry, x, y)
    }

    /// Adds a pineapple to the current wave.
    #[must_use]
    pub fn add_pineapple(self, x: i32, y: i32) -> Self {
        self.add_fruit(FruitKind::Pineapple, x, y)
    }

    /// Adds an unspiked cactus to the current wave.
    #[must_use]
    pub fn add_cactus(self, x: i32, y: i32) -> Self {
        self.add_fruit(FruitKind::Cactus, x, y)
    }

    /// Adds a cactus that starts with its spikes out.
    #[must_use]
    pub fn add_spiked_cactus(self, x: i32, y: i32) -> Self {
        self.push_fruit(FruitPlacement {
            kind: FruitKind::Cactus,
            position: Position::new(x, y),
            spiked: true,
        })
    }

    /// Places an enemy whose facing is drawn from the level's generator.
    #[must_use]
    pub fn add_enemy(mut self, kind: EnemyKind, x: i32, y: i32) -> Self {
        self.config.enemies.push(EnemyPlacement {
            kind,
            position: Position::new(x, y),
            direction: None,
        });
        self
    }

    /// Places an enemy with an explicit initial facing.
    #[must_use]
    pub fn add_enemy_facing(mut self, kind: EnemyKind, x: i32, y: i32, direction: Direction) -> Self {
        self.config.enemies.push(EnemyPlacement {
            kind,
            position: Position::new(x, y),
            direction: Some(direction),
        });
        self
    }

    /// Places a troll.
    #[must_use]
    pub fn add_troll(self, x: i32, y: i32) -> Self {
        self.add_enemy(EnemyKind::Troll, x, y)
    }

    /// Places a pot.
    #[must_use]
    pub fn add_pot(self, x: i32, y: i32) -> Self {
        self.add_enemy(EnemyKind::Pot, x, y)
    }

    /// Places a squid.
    #[must_use]
    pub fn add_squid(self, x: i32, y: i32) -> Self {
        self.add_enemy(EnemyKind::Squid, x, y)
    }

    /// Places a narwhal.
    #[must_use]
    pub fn add_narwhal(self, x: i32, y: i32) -> Self {
        self.add_enemy(EnemyKind::Narwhal, x, y)
    }

    /// Places a level-authored obstacle.
    #[must_use]
    pub fn add_obstacle(mut self, kind: ObstacleKind, x: i32, y: i32) -> Self {
        self.config.obstacles.push(ObstaclePlacement {
            kind,
            position: Position::new(x, y),
        });
        self
    }

    /// Places a level-authored ice block, which players cannot break.
    #[must_use]
    pub fn add_ice_block(self, x: i32, y: i32) -> Self {
        self.add_obstacle(ObstacleKind::IceBlock, x, y)
    }

    /// Places a bonfire.
    #[must_use]
    pub fn add_bonfire(self, x: i32, y: i32) -> Self {
        self.add_obstacle(ObstacleKind::Bonfire, x, y)
    }

    /// Places a hot tile.
    #[must_use]
    pub fn add_hot_tile(self, x: i32, y: i32) -> Self {
        self.add_obstacle(ObstacleKind::HotTile, x, y)
    }

    /// Places obstacles on every cell from `start_x` to `end_x` inclusive in row `y`.
    #[must_use]
    pub fn add_horizontal_obstacles(self, kind: ObstacleKind, start_x: i32, end_x: i32, y: i32) -> Self {
        (start_x..=end_x).fold(self, |builder, x| builder.add_obstacle(kind, x, y))
    }

    /// Places obstacles on every cell from `start_y` to `end_y` inclusive in column `x`.
    #[must_use]
    pub fn add_vertical_obstacles(self, kind: ObstacleKind, x: i32, start_y: i32, end_y: i32) -> Self {
        (start_y..=end_y).fold(self, |builder, y| builder.add_obstacle(kind, x, y))
    }

    /// Places a horizontal run of ice blocks.
    #[must_use]
    pub fn add_horizontal_ice_blocks(self, start_x: i32, end_x: i32, y: i32) -> Self {
        self.add_horizontal_obstacles(ObstacleKind::IceBlock, start_x, end_x, y)
    }

    /// Places a vertical run of ice blocks.
    #[must_use]
    pub fn add_vertical_ice_blocks(self, x: i32, start_y: i32, end_y: i32) -> Self {
        self.add_vertical_obstacles(ObstacleKind::IceBlock, x, start_y, end_y)
    }

    /// Places a horizontal run of bonfires.
    #[must_use]
    pub fn add_horizontal_bonfires(self, start_x: i32, end_x: i32, y: i32) -> Self {
        self.add_horizontal_obstacles(ObstacleKind::Bonfire, start_x, end_x, y)
    }

    /// Places a horizontal run of hot tiles.
    #[must_use]
    pub fn add_horizontal_hot_tiles(self, start_x: i32, end_x: i32, y: i32) -> Self {
        self.add_horizontal_obstacles(ObstacleKind::HotTile, start_x, end_x, y)
    }

    /// Finalises the configuration without validating it.
    ///
    /// Levels skip placements that fall outside the board, so an unvalidated
    /// configuration is still safe to play.
    #[must_use]
    pub fn build(self) -> LevelConfiguration {
        self.config
    }

    /// Finalises the configuration, rejecting unplayable ones.
    pub fn build_validated(self) -> Result<LevelConfiguration, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
