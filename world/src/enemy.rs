//! Hostile actors.

use dopo_core::{Direction, EnemyKind, EntityId, Event, Tuning};
use dopo_system_movement::{Brain, Step, Strategy};
use rand_chacha::ChaCha8Rng;

use crate::{Board, ObjectKind};

/// Enemy composed of a movement strategy and a kind-specific brain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    kind: EnemyKind,
    facing: Direction,
    strategy: Strategy,
    brain: Brain,
}

impl Enemy {
    /// Creates an enemy with the default strategy and brain of its kind.
    #[must_use]
    pub const fn new(kind: EnemyKind, facing: Direction) -> Self {
        Self {
            kind,
            facing,
            strategy: Brain::default_strategy(kind),
            brain: Brain::for_kind(kind, facing),
        }
    }

    /// Species of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Direction the enemy is heading.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Strategy currently steering the enemy.
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Replaces the strategy steering the enemy.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Current AI state.
    #[must_use]
    pub const fn brain(&self) -> &Brain {
        &self.brain
    }
}

/// Runs the enemy's brain for one tick and applies the resulting plan.
pub(crate) fn update_enemy(
    board: &mut Board,
    id: EntityId,
    tuning: &Tuning,
    rng: &mut ChaCha8Rng,
    out_events: &mut Vec<Event>,
) {
    let Some(object) = board.get(id) else {
        return;
    };
    let Some(mut enemy) = object.as_enemy().copied() else {
        return;
    };
    let mut cursor = object.position();

    let was_charging = enemy.brain.is_charging();
    let plan = enemy
        .brain
        .think(&enemy.strategy, cursor, enemy.facing, &*board, tuning, rng);
    enemy.facing = plan.facing;
    if !was_charging && enemy.brain.is_charging() {
        log::debug!("enemy {} charges {:?} from {cursor}", id.get(), enemy.facing);
    }
    if let Some(object) = board.object_mut(id) {
        *object.kind_mut() = ObjectKind::Enemy(enemy);
    }

    for step in plan.steps {
        let to = step.destination();
        if let Step::Smash(cell) = step {
            if let Some(block) = board.ice_block_at(cell) {
                if board.remove(block).is_some() {
                    out_events.push(Event::IceBlockSmashed { enemy: id, at: cell });
                }
            }
        }
        if !board.move_object(id, to) {
            break;
        }
        out_events.push(Event::EnemyMoved {
            enemy: id,
            from: cursor,
            to,
        });
        cursor = to;
    }
}
