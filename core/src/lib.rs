#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dopo Cream engine.
//!
//! This crate defines the value types and the message surface that connect
//! adapters, the authoritative world, and the pure movement systems. Adapters
//! submit [`Command`] values describing player actions and clock signals, the
//! world executes them through its `apply` entry point, and broadcasts
//! [`Event`] values describing every observable change. Systems never hold on
//! to the board; they query it through the [`BoardView`] trait.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single board cell expressed as signed column and row coordinates.
///
/// Coordinates are signed so that probes stepping off the board remain
/// representable; the board decides whether a position is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the position. Rows grow towards the south.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions available to every mover on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the fixed order used when probing neighbours.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit vector of the direction as `(dx, dy)`.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Direction obtained by a clockwise quarter turn.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Direction obtained by a counter-clockwise quarter turn.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }
}

/// Unique identifier assigned to an object placed on a board.
///
/// Identifiers are allocated in increasing order, so they double as the
/// insertion order of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Flavors available to player-controlled ice creams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    /// Default player flavor.
    Vanilla,
    /// Second player flavor.
    Strawberry,
    /// Third player flavor.
    Chocolate,
}

/// Enemy species, each driven by its own AI state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Patrols in straight lines and rebounds off obstacles.
    Troll,
    /// Chases the nearest ice cream without breaking ice.
    Pot,
    /// Chases the nearest ice cream and spends a few ticks breaking ice in its way.
    Squid,
    /// Patrols until aligned with an ice cream, then charges through ice.
    Narwhal,
}

/// Fruit species placed as level objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    /// Static fruit.
    Grape,
    /// Static fruit.
    Banana,
    /// Teleports to a random free cell periodically.
    Cherry,
    /// Pushed along by ice creams walking into it.
    Pineapple,
    /// Periodically grows lethal spikes.
    Cactus,
}

impl FruitKind {
    /// Points credited to the ice cream collecting the fruit.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Grape => 50,
            Self::Banana => 100,
            Self::Cherry => 150,
            Self::Pineapple => 200,
            Self::Cactus => 250,
        }
    }
}

/// Static obstacles authored by levels or created by players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Solid block of ice.
    IceBlock,
    /// Lethal, non-solid fire.
    Bonfire,
    /// Lethal, non-solid heated floor.
    HotTile,
}

/// Top-level state of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No level has been started yet.
    #[default]
    NotStarted,
    /// A level is running and accepts ticks and player actions.
    Playing,
    /// A level is loaded but frozen.
    Paused,
    /// Every fruit of the level has been collected.
    LevelCompleted,
    /// The level was lost or the session was ended.
    GameOver,
}

impl GameState {
    /// Reports whether no further transition can leave this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::LevelCompleted | Self::GameOver)
    }
}

/// Reasons a level may be lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// The countdown reached zero.
    TimeExpired,
    /// Every ice cream was eliminated.
    AllEliminated,
}

/// Aggregated tuning knobs controlling timed behaviours of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ticks between two spike toggles of a cactus.
    pub spike_cycle_ticks: u32,
    /// Ticks between two teleport attempts of a cherry.
    pub teleport_cycle_ticks: u32,
    /// Random cells drawn per teleport before the cherry gives up for the cycle.
    pub teleport_attempts: u32,
    /// Ticks a squid spends breaking an ice block before entering its cell.
    pub break_ticks: u32,
    /// Cells a charging narwhal covers per tick.
    pub charge_speed: u32,
    /// Maximum row or column distance at which a narwhal notices an ice cream.
    pub detection_radius: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spike_cycle_ticks: 1_800,
            teleport_cycle_ticks: 1_200,
            teleport_attempts: 100,
            break_ticks: 2,
            charge_speed: 2,
            detection_radius: 15,
        }
    }
}

/// Commands that express all permissible level mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advances the simulation by one tick.
    Tick,
    /// Removes one second from the level countdown.
    CountdownSecond,
    /// Requests that an ice cream step one cell in the given direction.
    MoveIceCream {
        /// Identifier of the ice cream attempting to move.
        ice_cream: EntityId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests a run of ice blocks in front of an ice cream.
    CreateIceBlocks {
        /// Identifier of the acting ice cream.
        ice_cream: EntityId,
    },
    /// Requests a single ice block directly in front of an ice cream.
    CreateIceBlock {
        /// Identifier of the acting ice cream.
        ice_cream: EntityId,
    },
    /// Requests that an ice cream shatter the run of ice blocks in `direction`.
    BreakIceBlocks {
        /// Identifier of the acting ice cream.
        ice_cream: EntityId,
        /// Direction in which the run is broken.
        direction: Direction,
    },
}

/// Events broadcast after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation advanced by one tick.
    TimeAdvanced {
        /// Index of the tick that just completed, starting at one.
        tick: u64,
    },
    /// Reports the countdown after a second elapsed.
    CountdownChanged {
        /// Seconds left before the level is lost.
        remaining: i32,
    },
    /// Confirms that an ice cream moved between two cells.
    IceCreamMoved {
        /// Identifier of the ice cream that moved.
        ice_cream: EntityId,
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Reports that an ice cream was eliminated by a dangerous object.
    IceCreamEliminated {
        /// Identifier of the eliminated ice cream.
        ice_cream: EntityId,
        /// Cell where the elimination happened.
        at: Position,
    },
    /// Confirms that an enemy moved between two cells.
    EnemyMoved {
        /// Identifier of the enemy.
        enemy: EntityId,
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Reports that an enemy destroyed an ice block.
    IceBlockSmashed {
        /// Identifier of the enemy responsible.
        enemy: EntityId,
        /// Cell the block occupied.
        at: Position,
    },
    /// Confirms that a player created ice blocks.
    IceBlocksCreated {
        /// Identifier of the acting ice cream.
        ice_cream: EntityId,
        /// Cells that received a block, ordered outward from the actor.
        cells: Vec<Position>,
    },
    /// Confirms that a player shattered ice blocks.
    IceBlocksBroken {
        /// Identifier of the acting ice cream.
        ice_cream: EntityId,
        /// Cells whose block was removed, ordered outward from the actor.
        cells: Vec<Position>,
    },
    /// Confirms that an ice cream collected a fruit.
    FruitCollected {
        /// Identifier of the collected fruit.
        fruit: EntityId,
        /// Identifier of the collecting ice cream.
        collector: EntityId,
        /// Points credited to the collector.
        points: u32,
    },
    /// Reports that a pineapple was pushed by an ice cream.
    FruitPushed {
        /// Identifier of the pushed fruit.
        fruit: EntityId,
        /// Cell occupied before the push.
        from: Position,
        /// Cell occupied after the push.
        to: Position,
    },
    /// Reports that a cherry teleported.
    FruitTeleported {
        /// Identifier of the fruit.
        fruit: EntityId,
        /// Cell occupied before the teleport.
        from: Position,
        /// Cell occupied after the teleport.
        to: Position,
    },
    /// Reports that a cactus grew or lost its spikes.
    FruitSpikesToggled {
        /// Identifier of the fruit.
        fruit: EntityId,
        /// Whether the fruit is now spiked.
        spiked: bool,
    },
    /// Announces that the next wave of fruits was placed on the board.
    WaveActivated {
        /// Zero-based index of the activated wave.
        wave: usize,
        /// Number of fruits added by the wave.
        fruits: usize,
    },
    /// Announces that every fruit of the level was collected.
    LevelCompleted,
    /// Announces that the level was lost.
    LevelLost {
        /// Why the level was lost.
        reason: LossReason,
    },
    /// Announces that the session entered a new state.
    GameStateChanged {
        /// State that became active.
        state: GameState,
    },
}

/// Read-only queries movement systems may issue against a board.
pub trait BoardView {
    /// Width and height of the board measured in cells.
    fn dimensions(&self) -> (u32, u32);

    /// Reports whether the position lies on the board.
    fn is_valid_position(&self, position: Position) -> bool {
        let (width, height) = self.dimensions();
        position.x() >= 0
            && position.y() >= 0
            && position.x().unsigned_abs() < width
            && position.y().unsigned_abs() < height
    }

    /// Reports whether any object at the position blocks movement.
    fn is_solid_at(&self, position: Position) -> bool;

    /// Reports whether an ice block occupies the position.
    fn has_ice_block_at(&self, position: Position) -> bool;

    /// Reports whether an enemy occupies the position.
    fn has_enemy_at(&self, position: Position) -> bool;

    /// Positions of every alive ice cream in insertion order.
    fn ice_cream_positions(&self) -> Vec<Position>;

    /// Position of the alive ice cream closest to `from`.
    ///
    /// Ties are resolved in favour of the ice cream inserted first.
    fn nearest_ice_cream_position(&self, from: Position) -> Option<Position> {
        let mut best: Option<(u32, Position)> = None;
        for candidate in self.ice_cream_positions() {
            let distance = from.manhattan_distance(candidate);
            if best.map_or(true, |(closest, _)| distance < closest) {
                best = Some((distance, candidate));
            }
        }
        best.map(|(_, position)| position)
    }
}
