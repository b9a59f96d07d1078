#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement strategies and enemy brains.
//!
//! Nothing in this crate mutates a board. Strategies pick directions and
//! brains turn those directions into [`Plan`] values that the world applies.

pub mod brain;

pub use brain::{Brain, Plan, Step};

use dopo_core::{BoardView, Direction, Position};
use rand::{Rng, RngCore};

/// Reports whether an enemy may enter `position`.
///
/// The cell must lie on the board and must not hold another enemy. Solid cells
/// are only enterable when `tunnels_ice` is set and the solid object is ice.
#[must_use]
pub fn is_passable(board: &dyn BoardView, position: Position, tunnels_ice: bool) -> bool {
    if !board.is_valid_position(position) || board.has_enemy_at(position) {
        return false;
    }

    !board.is_solid_at(position) || (tunnels_ice && board.has_ice_block_at(position))
}

/// Pluggable policy that decides where an enemy heads next.
pub trait MovementStrategy {
    /// Chooses the direction an enemy standing on `from` and facing `facing` should take.
    fn next_direction(
        &self,
        from: Position,
        facing: Direction,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Direction;

    /// Reports whether the strategy lets its enemy enter `position`.
    fn can_move_to(&self, position: Position, board: &dyn BoardView) -> bool;
}

/// Walks straight ahead and rebounds off obstacles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinearMovement {
    tunnels_ice: bool,
}

impl LinearMovement {
    /// Creates a strategy that treats ice as a wall.
    #[must_use]
    pub const fn new() -> Self {
        Self { tunnels_ice: false }
    }

    /// Creates a strategy that walks through ice.
    #[must_use]
    pub const fn tunneling() -> Self {
        Self { tunnels_ice: true }
    }

    /// Whether ice blocks count as passable.
    #[must_use]
    pub const fn tunnels_ice(&self) -> bool {
        self.tunnels_ice
    }
}

impl MovementStrategy for LinearMovement {
    fn next_direction(
        &self,
        from: Position,
        facing: Direction,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Direction {
        let probes = [
            facing,
            facing.turn_right(),
            facing.turn_left(),
            facing.opposite(),
        ];
        if let Some(direction) = probes
            .into_iter()
            .find(|direction| self.can_move_to(from.step(*direction), board))
        {
            return direction;
        }

        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }

    fn can_move_to(&self, position: Position, board: &dyn BoardView) -> bool {
        is_passable(board, position, self.tunnels_ice)
    }
}

/// Greedily closes the distance to the nearest alive ice cream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChaseMovement {
    can_break_ice: bool,
}

impl ChaseMovement {
    /// Creates a chaser that walks around ice.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            can_break_ice: false,
        }
    }

    /// Creates a chaser that walks through ice.
    #[must_use]
    pub const fn breaking_ice() -> Self {
        Self {
            can_break_ice: true,
        }
    }

    /// Whether ice blocks count as passable.
    #[must_use]
    pub const fn can_break_ice(&self) -> bool {
        self.can_break_ice
    }
}

impl MovementStrategy for ChaseMovement {
    fn next_direction(
        &self,
        from: Position,
        facing: Direction,
        board: &dyn BoardView,
        _rng: &mut dyn RngCore,
    ) -> Direction {
        let Some(target) = board.nearest_ice_cream_position(from) else {
            return facing;
        };

        let dx = target.x() - from.x();
        let dy = target.y() - from.y();
        let horizontal = match dx.signum() {
            1 => Some(Direction::East),
            -1 => Some(Direction::West),
            _ => None,
        };
        let vertical = match dy.signum() {
            1 => Some(Direction::South),
            -1 => Some(Direction::North),
            _ => None,
        };
        let (primary, secondary) = if dx.unsigned_abs() > dy.unsigned_abs() {
            (horizontal, vertical)
        } else {
            (vertical, horizontal)
        };

        primary
            .into_iter()
            .chain(secondary)
            .chain(Direction::ALL)
            .find(|direction| self.can_move_to(from.step(*direction), board))
            .unwrap_or(facing)
    }

    fn can_move_to(&self, position: Position, board: &dyn BoardView) -> bool {
        is_passable(board, position, self.can_break_ice)
    }
}

/// Closed set of strategies an enemy can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Straight-line patrol.
    Linear(LinearMovement),
    /// Greedy pursuit.
    Chase(ChaseMovement),
}

impl Strategy {
    /// Whether the strategy walks through ice.
    #[must_use]
    pub const fn passes_ice(&self) -> bool {
        match self {
            Self::Linear(linear) => linear.tunnels_ice(),
            Self::Chase(chase) => chase.can_break_ice(),
        }
    }
}

impl From<LinearMovement> for Strategy {
    fn from(value: LinearMovement) -> Self {
        Self::Linear(value)
    }
}

impl From<ChaseMovement> for Strategy {
    fn from(value: ChaseMovement) -> Self {
        Self::Chase(value)
    }
}

impl MovementStrategy for Strategy {
    fn next_direction(
        &self,
        from: Position,
        facing: Direction,
        board: &dyn BoardView,
        rng: &mut dyn RngCore,
    ) -> Direction {
        match self {
            Self::Linear(linear) => linear.next_direction(from, facing, board, rng),
            Self::Chase(chase) => chase.next_direction(from, facing, board, rng),
        }
    }

    fn can_move_to(&self, position: Position, board: &dyn BoardView) -> bool {
        match self {
            Self::Linear(linear) => linear.can_move_to(position, board),
            Self::Chase(chase) => chase.can_move_to(position, board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[derive(Default)]
    struct GridStub {
        width: u32,
        height: u32,
        ice: HashSet<Position>,
        enemies: HashSet<Position>,
        ice_creams: Vec<Position>,
    }

    impl GridStub {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                ..Self::default()
            }
        }
    }

    impl BoardView for GridStub {
        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn is_solid_at(&self, position: Position) -> bool {
            self.ice.contains(&position)
        }

        fn has_ice_block_at(&self, position: Position) -> bool {
            self.ice.contains(&position)
        }

        fn has_enemy_at(&self, position: Position) -> bool {
            self.enemies.contains(&position)
        }

        fn ice_cream_positions(&self) -> Vec<Position> {
            self.ice_creams.clone()
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn passability_respects_edges_enemies_and_ice() {
        let mut grid = GridStub::new(3, 3);
        let _ = grid.ice.insert(Position::new(1, 1));
        let _ = grid.enemies.insert(Position::new(2, 2));

        assert!(is_passable(&grid, Position::new(0, 0), false));
        assert!(!is_passable(&grid, Position::new(-1, 0), true));
        assert!(!is_passable(&grid, Position::new(3, 0), true));
        assert!(!is_passable(&grid, Position::new(2, 2), true));
        assert!(!is_passable(&grid, Position::new(1, 1), false));
        assert!(is_passable(&grid, Position::new(1, 1), true));
    }

    #[test]
    fn linear_keeps_heading_when_clear() {
        let grid = GridStub::new(5, 5);
        let direction = LinearMovement::new().next_direction(
            Position::new(2, 2),
            Direction::East,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::East);
    }

    #[test]
    fn linear_probes_right_then_left_then_behind() {
        let mut grid = GridStub::new(5, 5);
        let origin = Position::new(2, 2);
        let linear = LinearMovement::new();

        let _ = grid.ice.insert(Position::new(3, 2));
        assert_eq!(
            linear.next_direction(origin, Direction::East, &grid, &mut rng()),
            Direction::South
        );

        let _ = grid.ice.insert(Position::new(2, 3));
        assert_eq!(
            linear.next_direction(origin, Direction::East, &grid, &mut rng()),
            Direction::North
        );

        let _ = grid.ice.insert(Position::new(2, 1));
        assert_eq!(
            linear.next_direction(origin, Direction::East, &grid, &mut rng()),
            Direction::West
        );
    }

    #[test]
    fn linear_rebounds_off_the_board_edge() {
        let grid = GridStub::new(1, 4);
        let direction = LinearMovement::new().next_direction(
            Position::new(0, 3),
            Direction::South,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::North);
    }

    #[test]
    fn boxed_in_linear_still_returns_a_direction() {
        let grid = GridStub::new(1, 1);
        let direction = LinearMovement::new().next_direction(
            Position::new(0, 0),
            Direction::North,
            &grid,
            &mut rng(),
        );
        assert!(Direction::ALL.contains(&direction));
    }

    #[test]
    fn tunneling_linear_walks_into_ice() {
        let mut grid = GridStub::new(5, 5);
        let _ = grid.ice.insert(Position::new(3, 2));
        let direction = LinearMovement::tunneling().next_direction(
            Position::new(2, 2),
            Direction::East,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::East);
    }

    #[test]
    fn chase_prefers_the_larger_axis() {
        let mut grid = GridStub::new(10, 10);
        grid.ice_creams.push(Position::new(8, 3));
        let direction = ChaseMovement::new().next_direction(
            Position::new(2, 2),
            Direction::North,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::East);
    }

    #[test]
    fn chase_breaks_axis_ties_vertically() {
        let mut grid = GridStub::new(10, 10);
        grid.ice_creams.push(Position::new(5, 5));
        let direction = ChaseMovement::new().next_direction(
            Position::new(2, 2),
            Direction::West,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::South);
    }

    #[test]
    fn chase_falls_back_to_secondary_axis() {
        let mut grid = GridStub::new(10, 10);
        grid.ice_creams.push(Position::new(8, 4));
        let _ = grid.ice.insert(Position::new(3, 2));
        let direction = ChaseMovement::new().next_direction(
            Position::new(2, 2),
            Direction::North,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::South);
    }

    #[test]
    fn ice_breaking_chaser_ignores_ice() {
        let mut grid = GridStub::new(10, 10);
        grid.ice_creams.push(Position::new(8, 2));
        let _ = grid.ice.insert(Position::new(3, 2));
        let direction = ChaseMovement::breaking_ice().next_direction(
            Position::new(2, 2),
            Direction::North,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::East);
    }

    #[test]
    fn chase_without_target_keeps_facing() {
        let grid = GridStub::new(4, 4);
        let direction = ChaseMovement::new().next_direction(
            Position::new(1, 1),
            Direction::West,
            &grid,
            &mut rng(),
        );
        assert_eq!(direction, Direction::West);
    }

    #[test]
    fn strategy_enum_delegates() {
        let grid = GridStub::new(4, 4);
        let strategy = Strategy::from(LinearMovement::new());
        assert!(!strategy.passes_ice());
        assert_eq!(
            strategy.next_direction(Position::new(1, 1), Direction::South, &grid, &mut rng()),
            Direction::South
        );
        assert!(Strategy::from(ChaseMovement::breaking_ice()).passes_ice());
    }
}
