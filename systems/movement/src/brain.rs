//! Per-kind enemy state machines layered on top of movement strategies.

use dopo_core::{BoardView, Direction, EnemyKind, Position, Tuning};
use rand::RngCore;

use crate::{is_passable, ChaseMovement, LinearMovement, MovementStrategy, Strategy};

/// Single cell transition requested by a brain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Enter an empty neighbouring cell.
    Move(Position),
    /// Destroy the ice block occupying the cell, then enter it.
    Smash(Position),
}

impl Step {
    /// Cell the enemy ends up on after the step.
    #[must_use]
    pub const fn destination(&self) -> Position {
        match self {
            Self::Move(position) | Self::Smash(position) => *position,
        }
    }
}

/// Outcome of one brain update that the world applies to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Facing the enemy holds after the update.
    pub facing: Direction,
    /// Steps executed in order; empty when the enemy stays put.
    pub steps: Vec<Step>,
}

impl Plan {
    fn stay(facing: Direction) -> Self {
        Self {
            facing,
            steps: Vec::new(),
        }
    }

    fn single(facing: Direction, step: Step) -> Self {
        Self {
            facing,
            steps: vec![step],
        }
    }
}

/// Progress of a squid between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquidState {
    /// Chasing through open cells.
    Moving,
    /// Chewing through the ice block on `target`.
    Breaking {
        /// Cell of the ice block under attack.
        target: Position,
        /// Ticks left before the block gives way.
        remaining: u32,
    },
}

/// Behaviour mode of a narwhal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NarwhalState {
    /// Walking a straight line and watching its row and column.
    Patrol,
    /// Rushing along its facing towards an aligned ice cream.
    Charge,
}

/// AI state carried by an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brain {
    /// Follows the strategy one cell per tick.
    Wander,
    /// Chases with the strategy and stalls on ice until it breaks.
    Squid(SquidState),
    /// Patrols with the strategy and charges at aligned ice creams.
    Narwhal {
        /// Current mode.
        state: NarwhalState,
        /// Direction restored when a charge ends.
        patrol_direction: Direction,
    },
}

impl Brain {
    /// Initial brain for an enemy of `kind` spawned facing `facing`.
    #[must_use]
    pub const fn for_kind(kind: EnemyKind, facing: Direction) -> Self {
        match kind {
            EnemyKind::Troll | EnemyKind::Pot => Self::Wander,
            EnemyKind::Squid => Self::Squid(SquidState::Moving),
            EnemyKind::Narwhal => Self::Narwhal {
                state: NarwhalState::Patrol,
                patrol_direction: facing,
            },
        }
    }

    /// Strategy an enemy of `kind` starts with.
    #[must_use]
    pub const fn default_strategy(kind: EnemyKind) -> Strategy {
        match kind {
            EnemyKind::Troll | EnemyKind::Narwhal => Strategy::Linear(LinearMovement::new()),
            EnemyKind::Pot => Strategy::Chase(ChaseMovement::new()),
            EnemyKind::Squid => Strategy::Chase(ChaseMovement::breaking_ice()),
        }
    }

    /// Whether a narwhal is mid-charge.
    #[must_use]
    pub const fn is_charging(&self) -> bool {
        matches!(
            self,
            Self::Narwhal {
                state: NarwhalState::Charge,
                ..
            }
        )
    }

    /// Whether a squid is busy breaking a block.
    #[must_use]
    pub const fn is_breaking(&self) -> bool {
        matches!(self, Self::Squid(SquidState::Breaking { .. }))
    }

    /// Advances the state machine by one tick and returns the resulting plan.
    pub fn think(
        &mut self,
        strategy: &Strategy,
        from: Position,
        facing: Direction,
        board: &dyn BoardView,
        tuning: &Tuning,
        rng: &mut dyn RngCore,
    ) -> Plan {
        match self {
            Self::Wander => follow(strategy, from, facing, board, rng),
            Self::Squid(state) => think_squid(state, strategy, from, facing, board, tuning, rng),
            Self::Narwhal {
                state,
                patrol_direction,
            } => think_narwhal(state, patrol_direction, strategy, from, board, tuning, rng),
        }
    }
}

fn follow(
    strategy: &Strategy,
    from: Position,
    facing: Direction,
    board: &dyn BoardView,
    rng: &mut dyn RngCore,
) -> Plan {
    let direction = strategy.next_direction(from, facing, board, rng);
    let next = from.step(direction);
    if !strategy.can_move_to(next, board) {
        return Plan::stay(direction);
    }

    if board.has_ice_block_at(next) {
        Plan::single(direction, Step::Smash(next))
    } else {
        Plan::single(direction, Step::Move(next))
    }
}

fn think_squid(
    state: &mut SquidState,
    strategy: &Strategy,
    from: Position,
    facing: Direction,
    board: &dyn BoardView,
    tuning: &Tuning,
    rng: &mut dyn RngCore,
) -> Plan {
    if let SquidState::Breaking { target, remaining } = *state {
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            *state = SquidState::Breaking { target, remaining };
            return Plan::stay(facing);
        }

        *state = SquidState::Moving;
        if board.has_ice_block_at(target) && !board.has_enemy_at(target) {
            return Plan::single(facing, Step::Smash(target));
        }
        if is_passable(board, target, false) {
            return Plan::single(facing, Step::Move(target));
        }
        return Plan::stay(facing);
    }

    if board.nearest_ice_cream_position(from).is_none() {
        return Plan::stay(facing);
    }

    let direction = strategy.next_direction(from, facing, board, rng);
    let next = from.step(direction);
    if !strategy.can_move_to(next, board) {
        return Plan::stay(direction);
    }

    if !board.has_ice_block_at(next) {
        return Plan::single(direction, Step::Move(next));
    }

    if tuning.break_ticks == 0 {
        return Plan::single(direction, Step::Smash(next));
    }

    *state = SquidState::Breaking {
        target: next,
        remaining: tuning.break_ticks,
    };
    Plan::stay(direction)
}

fn think_narwhal(
    state: &mut NarwhalState,
    patrol_direction: &mut Direction,
    strategy: &Strategy,
    from: Position,
    board: &dyn BoardView,
    tuning: &Tuning,
    rng: &mut dyn RngCore,
) -> Plan {
    let mut charge_direction = None;
    if *state == NarwhalState::Charge {
        charge_direction = aligned_target(from, board, tuning.detection_radius);
    } else if let Some(direction) = aligned_target(from, board, tuning.detection_radius) {
        *state = NarwhalState::Charge;
        charge_direction = Some(direction);
    }

    let Some(direction) = charge_direction else {
        *state = NarwhalState::Patrol;
        let plan = follow(strategy, from, *patrol_direction, board, rng);
        *patrol_direction = plan.facing;
        return plan;
    };

    let targets = board.ice_cream_positions();
    let mut plan = Plan::stay(direction);
    let mut cursor = from;
    for _ in 0..tuning.charge_speed {
        let next = cursor.step(direction);
        if !board.is_valid_position(next) || board.has_enemy_at(next) {
            *state = NarwhalState::Patrol;
            break;
        }

        let step = if board.has_ice_block_at(next) {
            Step::Smash(next)
        } else if !board.is_solid_at(next) {
            Step::Move(next)
        } else {
            *state = NarwhalState::Patrol;
            break;
        };
        plan.steps.push(step);
        cursor = next;

        // The charge ends on the ice cream it hits.
        if targets.contains(&next) {
            *state = NarwhalState::Patrol;
            break;
        }
    }

    if *state == NarwhalState::Charge
        && aligned_target(cursor, board, tuning.detection_radius) != Some(direction)
    {
        *state = NarwhalState::Patrol;
    }

    if *state == NarwhalState::Patrol {
        plan.facing = *patrol_direction;
    }

    plan
}

/// Direction towards the nearest alive ice cream sharing a row or column with
/// `from` within `radius` cells, first-seen on ties.
#[must_use]
pub fn aligned_target(from: Position, board: &dyn BoardView, radius: u32) -> Option<Direction> {
    let mut best: Option<(u32, Direction)> = None;
    for candidate in board.ice_cream_positions() {
        let direction = if candidate.y() == from.y() && candidate.x() != from.x() {
            if candidate.x() > from.x() {
                Direction::East
            } else {
                Direction::West
            }
        } else if candidate.x() == from.x() && candidate.y() != from.y() {
            if candidate.y() > from.y() {
                Direction::South
            } else {
                Direction::North
            }
        } else {
            continue;
        };

        let distance = from.manhattan_distance(candidate);
        if distance > radius {
            continue;
        }
        if best.map_or(true, |(closest, _)| distance < closest) {
            best = Some((distance, direction));
        }
    }
    best.map(|(_, direction)| direction)
}
