#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for Dopo Cream.
//!
//! A [`Level`] owns a [`Board`] holding every placed object. Adapters either
//! call the level's methods directly or route [`Command`] values through
//! [`apply`]; both append [`Event`] values describing what changed.

mod board;
mod enemy;
mod fruit;
mod ice_cream;
mod level;
mod obstacle;

pub use board::{Board, GameObject, ObjectKind};
pub use enemy::Enemy;
pub use fruit::Fruit;
pub use ice_cream::IceCream;
pub use level::Level;
pub use obstacle::Obstacle;

use dopo_core::{Command, Event};

/// Applies the provided command to the level, mutating state deterministically.
pub fn apply(level: &mut Level, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => level.update(out_events),
        Command::CountdownSecond => level.decrement_time(out_events),
        Command::MoveIceCream {
            ice_cream,
            direction,
        } => {
            let _ = level.move_ice_cream(ice_cream, direction, out_events);
        }
        Command::CreateIceBlocks { ice_cream } => {
            let _ = level.create_ice_blocks(ice_cream, out_events);
        }
        Command::CreateIceBlock { ice_cream } => {
            let _ = level.create_ice_block(ice_cream, out_events);
        }
        Command::BreakIceBlocks {
            ice_cream,
            direction,
        } => {
            let _ = level.break_ice_blocks(ice_cream, direction, out_events);
        }
    }
}

/// Query functions that provide read-only snapshots of a level.
pub mod query {
    use dopo_core::{
        Direction, EnemyKind, EntityId, Flavor, FruitKind, ObstacleKind, Position,
    };

    use super::{GameObject, Level, ObjectKind};

    /// Identifiers of every ice cream in insertion order.
    #[must_use]
    pub fn ice_cream_ids(level: &Level) -> Vec<EntityId> {
        level.board().ice_creams().map(GameObject::id).collect()
    }

    /// Identifier of the first ice cream that is still alive.
    #[must_use]
    pub fn first_alive_ice_cream(level: &Level) -> Option<EntityId> {
        level
            .board()
            .ice_creams()
            .find(|object| object.as_ice_cream().is_some_and(|ice_cream| ice_cream.is_alive()))
            .map(GameObject::id)
    }

    /// Captures every object on the board in insertion order.
    #[must_use]
    pub fn snapshots(level: &Level) -> Vec<ObjectSnapshot> {
        level
            .board()
            .all_objects()
            .map(ObjectSnapshot::from_object)
            .collect()
    }

    /// Fruits still waiting on the board.
    #[must_use]
    pub fn remaining_fruits(level: &Level) -> usize {
        level
            .board()
            .all_objects()
            .filter(|object| object.as_fruit().is_some())
            .count()
    }

    /// Plain description of one placed object.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObjectSnapshot {
        /// Identifier of the object.
        pub id: EntityId,
        /// Cell the object occupies.
        pub position: Position,
        /// Variant-specific state.
        pub details: SnapshotDetails,
    }

    /// Variant-specific part of an [`ObjectSnapshot`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum SnapshotDetails {
        /// Player actor.
        IceCream {
            /// Flavor of the actor.
            flavor: Flavor,
            /// Facing of the actor.
            facing: Direction,
            /// Whether the actor is alive.
            alive: bool,
            /// Points collected.
            score: u32,
        },
        /// Hostile actor.
        Enemy {
            /// Species of the enemy.
            kind: EnemyKind,
            /// Facing of the enemy.
            facing: Direction,
            /// Whether a narwhal is charging.
            charging: bool,
            /// Whether a squid is breaking ice.
            breaking: bool,
        },
        /// Collectable.
        Fruit {
            /// Kind of fruit.
            kind: FruitKind,
            /// Whether a cactus is spiked.
            spiked: bool,
        },
        /// Static obstacle.
        Obstacle {
            /// Kind of obstacle.
            kind: ObstacleKind,
            /// Whether an ice cream laid the block.
            player_made: bool,
        },
    }

    impl ObjectSnapshot {
        fn from_object(object: &GameObject) -> Self {
            let details = match object.kind() {
                ObjectKind::IceCream(ice_cream) => SnapshotDetails::IceCream {
                    flavor: ice_cream.flavor(),
                    facing: ice_cream.facing(),
                    alive: ice_cream.is_alive(),
                    score: ice_cream.score(),
                },
                ObjectKind::Enemy(enemy) => SnapshotDetails::Enemy {
                    kind: enemy.kind(),
                    facing: enemy.facing(),
                    charging: enemy.brain().is_charging(),
                    breaking: enemy.brain().is_breaking(),
                },
                ObjectKind::Fruit(fruit) => SnapshotDetails::Fruit {
                    kind: fruit.kind(),
                    spiked: fruit.has_spikes(),
                },
                ObjectKind::Obstacle(obstacle) => SnapshotDetails::Obstacle {
                    kind: obstacle.kind(),
                    player_made: obstacle.is_player_made(),
                },
            };
            Self {
                id: object.id(),
                position: object.position(),
                details,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dopo_core::{Direction, Position};
    use dopo_levels::LevelBuilder;

    #[test]
    fn commands_route_to_level_operations() {
        let config = LevelBuilder::new()
            .add_vanilla_ice_cream(2, 2)
            .add_grape(2, 3)
            .add_grape(9, 9)
            .build();
        let mut level = Level::new(&config);
        let ice_cream = query::ice_cream_ids(&level)[0];
        let mut events = Vec::new();

        apply(
            &mut level,
            Command::MoveIceCream {
                ice_cream,
                direction: Direction::South,
            },
            &mut events,
        );
        apply(&mut level, Command::Tick, &mut events);
        apply(&mut level, Command::CountdownSecond, &mut events);

        assert_eq!(level.collected_fruits(), 1);
        assert_eq!(level.tick_index(), 1);
        assert_eq!(level.time_remaining(), 179);
        assert_eq!(query::remaining_fruits(&level), 1);
        assert_eq!(
            events.first(),
            Some(&Event::IceCreamMoved {
                ice_cream,
                from: Position::new(2, 2),
                to: Position::new(2, 3),
            })
        );
    }

    #[test]
    fn snapshots_describe_every_object() {
        let config = LevelBuilder::new()
            .add_strawberry_ice_cream(0, 0)
            .add_spiked_cactus(4, 4)
            .add_hot_tile(1, 0)
            .build();
        let level = Level::new(&config);
        let snapshots = query::snapshots(&level);

        assert_eq!(snapshots.len(), 3);
        assert!(matches!(
            snapshots[0].details,
            query::SnapshotDetails::IceCream { alive: true, .. }
        ));
        assert!(matches!(
            snapshots[2].details,
            query::SnapshotDetails::Fruit { spiked: true, .. }
        ));
    }
}
