use dopo_core::{
    BoardView, Command, Direction, EnemyKind, EntityId, Event, LossReason, Position, Tuning,
};
use dopo_levels::LevelBuilder;
use dopo_world::{self as world, query, GameObject, IceCream, Level};

fn lone_ice_cream() -> (Level, EntityId) {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(12, 7)
        .add_grape(0, 0)
        .build();
    let level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    (level, id)
}

fn column_below(x: i32, from_y: i32, to_y: i32) -> Vec<Position> {
    (from_y..=to_y).map(|y| Position::new(x, y)).collect()
}

#[test]
fn creation_runs_to_the_board_edge() {
    let (mut level, id) = lone_ice_cream();
    let mut events = Vec::new();

    let created = level.create_ice_blocks(id, &mut events);

    assert_eq!(created, column_below(12, 8, 14));
    for cell in &created {
        assert!(level.board().has_ice_block_at(*cell));
    }
    assert_eq!(
        events,
        vec![Event::IceBlocksCreated {
            ice_cream: id,
            cells: created.clone(),
        }]
    );
}

#[test]
fn breaking_clears_the_whole_player_run() {
    let (mut level, id) = lone_ice_cream();
    let mut events = Vec::new();
    let created = level.create_ice_blocks(id, &mut events);

    let broken = level.break_ice_blocks(id, Direction::South, &mut events);

    assert_eq!(broken, created);
    for cell in column_below(12, 8, 14) {
        assert!(!level.board().has_ice_block_at(cell));
    }
}

#[test]
fn creation_never_overwrites_an_occupant() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(12, 7)
        .add_grape(12, 10)
        .add_ice_block(12, 13)
        .build();
    let mut level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    let mut events = Vec::new();

    let created = level.create_ice_blocks(id, &mut events);

    assert_eq!(created, column_below(12, 8, 9));
    assert_eq!(level.board().objects_at(Position::new(12, 10)).count(), 1);
}

#[test]
fn cactus_grows_spikes_after_one_cycle() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(0, 0)
        .add_cactus(10, 10)
        .build();
    let mut level = Level::new(&config);
    let cycle = Tuning::default().spike_cycle_ticks;
    let mut events = Vec::new();

    let cactus = |level: &Level| {
        level
            .board()
            .objects_at(Position::new(10, 10))
            .find_map(GameObject::as_fruit)
            .copied()
            .expect("cactus on the board")
    };

    for _ in 1..cycle {
        level.update(&mut events);
    }
    assert!(!cactus(&level).has_spikes());

    level.update(&mut events);
    let mut spiked = cactus(&level);
    assert!(spiked.has_spikes());
    assert!(spiked.is_dangerous());
    assert_eq!(spiked.on_collect(), None);
}

#[test]
fn second_wave_appears_once_the_first_is_collected() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(5, 5)
        .add_strawberry_ice_cream(15, 5)
        .add_grape(5, 6)
        .add_banana(15, 6)
        .start_new_wave()
        .add_grape(1, 1)
        .add_grape(2, 1)
        .add_grape(3, 1)
        .build();
    let mut level = Level::new(&config);
    let ids = query::ice_cream_ids(&level);
    let mut events = Vec::new();

    assert_eq!(level.total_fruits(), 5);
    assert_eq!(query::remaining_fruits(&level), 2);
    assert!(level.board().is_empty(Position::new(1, 1)));

    assert!(level.move_ice_cream(ids[0], Direction::South, &mut events));
    assert!(level.move_ice_cream(ids[1], Direction::South, &mut events));
    level.update(&mut events);

    assert_eq!(level.collected_fruits(), 2);
    assert_eq!(level.current_wave(), 1);
    assert_eq!(query::remaining_fruits(&level), 3);
    assert!(!level.is_completed());
    assert!(events.contains(&Event::WaveActivated { wave: 1, fruits: 3 }));
}

#[test]
fn completion_requires_every_wave() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(0, 0)
        .add_grape(1, 0)
        .start_new_wave()
        .add_grape(2, 0)
        .build();
    let mut level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    let mut events = Vec::new();

    let _ = level.move_ice_cream(id, Direction::East, &mut events);
    level.update(&mut events);
    assert!(!level.is_completed());

    let _ = level.move_ice_cream(id, Direction::East, &mut events);
    level.update(&mut events);
    assert!(level.is_completed());
    assert_eq!(level.total_score(), 100);

    level.update(&mut events);
    assert!(level.is_completed());
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::LevelCompleted))
            .count(),
        1
    );
}

#[test]
fn invalid_placements_do_not_stall_waves() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(0, 0)
        .add_grape(1, 0)
        .add_grape(20, 20)
        .start_new_wave()
        .add_grape(3, 3)
        .build();
    let mut level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    let mut events = Vec::new();

    assert_eq!(level.total_fruits(), 2);
    let _ = level.move_ice_cream(id, Direction::East, &mut events);
    level.update(&mut events);

    assert_eq!(level.current_wave(), 1);
    assert!(!level.board().is_empty(Position::new(3, 3)));
}

#[test]
fn walking_into_an_enemy_is_fatal() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(4, 4)
        .add_grape(0, 0)
        .add_enemy_facing(dopo_core::EnemyKind::Troll, 5, 4, Direction::East)
        .build();
    let mut level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    let mut events = Vec::new();

    assert!(level.move_ice_cream(id, Direction::East, &mut events));

    let alive = level
        .board()
        .get(id)
        .and_then(GameObject::as_ice_cream)
        .map(IceCream::is_alive);
    assert_eq!(alive, Some(false));
    assert!(level.has_lost());
    assert_eq!(level.loss_reason(), Some(LossReason::AllEliminated));
    assert!(!level.move_ice_cream(id, Direction::West, &mut events));
}

#[test]
fn enemy_walking_onto_an_ice_cream_eliminates_it() {
    let config = LevelBuilder::new()
        .add_vanilla_ice_cream(6, 4)
        .add_grape(0, 0)
        .add_enemy_facing(dopo_core::EnemyKind::Troll, 5, 4, Direction::East)
        .build();
    let mut level = Level::new(&config);
    let mut events = Vec::new();

    world::apply(&mut level, Command::Tick, &mut events);

    assert!(level.has_lost());
    assert!(events.contains(&Event::LevelLost {
        reason: LossReason::AllEliminated,
    }));
}

#[test]
fn cell_membership_tracks_positions_every_tick() {
    let config = dopo_levels::configuration_for(&dopo_levels::Level4Template);
    let mut level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    let script = [
        Direction::West,
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    for tick in 0..300 {
        let mut events = Vec::new();
        let direction = script[tick % script.len()];
        let _ = level.move_ice_cream(id, direction, &mut events);
        level.update(&mut events);

        for object in level.board().all_objects() {
            let residents: Vec<EntityId> = level
                .board()
                .objects_at(object.position())
                .map(GameObject::id)
                .collect();
            assert!(residents.contains(&object.id()));
        }
        let enemy_cells: Vec<Position> = level
            .board()
            .all_objects()
            .filter(|object| object.as_enemy().is_some())
            .map(GameObject::position)
            .collect();
        for (index, cell) in enemy_cells.iter().enumerate() {
            assert!(!enemy_cells[index + 1..].contains(cell), "enemies stacked at {cell}");
        }
    }
}

fn narwhal_lane(ice_cream_x: i32) -> (Level, EntityId) {
    let config = LevelBuilder::new()
        .with_size(12, 3)
        .add_vanilla_ice_cream(ice_cream_x, 1)
        .add_grape(11, 0)
        .add_enemy_facing(EnemyKind::Narwhal, 0, 1, Direction::North)
        .build();
    let level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    (level, id)
}

fn enemy_state(level: &Level) -> (Position, query::SnapshotDetails) {
    query::snapshots(level)
        .into_iter()
        .find(|snapshot| matches!(snapshot.details, query::SnapshotDetails::Enemy { .. }))
        .map(|snapshot| (snapshot.position, snapshot.details))
        .expect("enemy on the board")
}

fn is_alive(level: &Level, id: EntityId) -> bool {
    level
        .board()
        .get(id)
        .and_then(GameObject::as_ice_cream)
        .is_some_and(IceCream::is_alive)
}

#[test]
fn narwhal_charge_eliminates_a_target_an_odd_distance_away() {
    let (mut level, id) = narwhal_lane(3);
    let mut events = Vec::new();

    level.update(&mut events);
    assert_eq!(enemy_state(&level).0, Position::new(2, 1));
    assert!(is_alive(&level, id));

    level.update(&mut events);
    assert_eq!(enemy_state(&level).0, Position::new(3, 1));
    assert!(!is_alive(&level, id));
    assert!(level.has_lost());
    assert!(events.contains(&Event::IceCreamEliminated {
        ice_cream: id,
        at: Position::new(3, 1),
    }));
}

#[test]
fn narwhal_charge_eliminates_a_target_an_even_distance_away() {
    let (mut level, id) = narwhal_lane(4);
    let mut events = Vec::new();

    level.update(&mut events);
    level.update(&mut events);

    assert_eq!(enemy_state(&level).0, Position::new(4, 1));
    assert!(!is_alive(&level, id));
    assert_eq!(level.loss_reason(), Some(LossReason::AllEliminated));
}

#[test]
fn narwhal_returns_to_patrol_when_the_target_leaves_its_lane() {
    let (mut level, id) = narwhal_lane(6);
    let mut events = Vec::new();

    level.update(&mut events);
    assert!(matches!(
        enemy_state(&level),
        (_, query::SnapshotDetails::Enemy { charging: true, facing: Direction::East, .. })
    ));

    assert!(level.move_ice_cream(id, Direction::North, &mut events));
    level.update(&mut events);

    let (position, details) = enemy_state(&level);
    assert_eq!(position, Position::new(2, 0));
    assert!(matches!(
        details,
        query::SnapshotDetails::Enemy { charging: false, facing: Direction::North, .. }
    ));
    assert!(is_alive(&level, id));
}

#[test]
fn squid_chase_eliminates_the_ice_cream_it_reaches() {
    let config = LevelBuilder::new()
        .with_size(12, 3)
        .add_vanilla_ice_cream(3, 1)
        .add_grape(11, 0)
        .add_enemy_facing(EnemyKind::Squid, 0, 1, Direction::East)
        .build();
    let mut level = Level::new(&config);
    let id = query::ice_cream_ids(&level)[0];
    let mut events = Vec::new();

    for _ in 0..3 {
        level.update(&mut events);
    }

    assert_eq!(enemy_state(&level).0, Position::new(3, 1));
    assert!(!is_alive(&level, id));
    assert!(level.has_lost());
}
