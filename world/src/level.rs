//! Per-tick orchestration of a single level.

use dopo_core::{BoardView, Direction, EntityId, Event, LossReason, Position, Tuning};
use dopo_levels::{FruitPlacement, LevelConfiguration};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    enemy, fruit, ice_cream, Board, Enemy, Fruit, GameObject, IceCream, ObjectKind, Obstacle,
};

/// Running level: a board plus the objective, countdown and outcome bookkeeping.
#[derive(Clone, Debug)]
pub struct Level {
    level_number: u32,
    board: Board,
    tuning: Tuning,
    time_limit: i32,
    time_remaining: i32,
    waves: Vec<Vec<FruitPlacement>>,
    current_wave: usize,
    wave_outstanding: usize,
    total_fruits: usize,
    collected_fruits: usize,
    completed: bool,
    outcome_reported: bool,
    tick_index: u64,
    rng: ChaCha8Rng,
}

impl Level {
    /// Builds the board described by `configuration` and places the first wave.
    ///
    /// Placements outside the board are skipped and do not count towards the
    /// fruit objective.
    #[must_use]
    pub fn new(configuration: &LevelConfiguration) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(configuration.seed());
        let mut board = Board::new(configuration.width(), configuration.height());

        for placement in configuration.ice_creams() {
            let _ = place(
                &mut board,
                placement.position,
                ObjectKind::IceCream(IceCream::new(placement.flavor)),
                "ice cream",
            );
        }
        for placement in configuration.obstacles() {
            let _ = place(
                &mut board,
                placement.position,
                ObjectKind::Obstacle(Obstacle::new(placement.kind)),
                "obstacle",
            );
        }
        for placement in configuration.enemies() {
            let facing = placement
                .direction
                .unwrap_or_else(|| Direction::ALL[rng.gen_range(0..Direction::ALL.len())]);
            let _ = place(
                &mut board,
                placement.position,
                ObjectKind::Enemy(Enemy::new(placement.kind, facing)),
                "enemy",
            );
        }

        let total_fruits = configuration
            .fruits()
            .filter(|placement| board.is_valid_position(placement.position))
            .count();
        let time_limit = i32::try_from(configuration.time_limit_secs()).unwrap_or(i32::MAX);

        let mut level = Self {
            level_number: configuration.level_number(),
            board,
            tuning: *configuration.tuning(),
            time_limit,
            time_remaining: time_limit,
            waves: configuration.fruit_waves().to_vec(),
            current_wave: 0,
            wave_outstanding: 0,
            total_fruits,
            collected_fruits: 0,
            completed: false,
            outcome_reported: false,
            tick_index: 0,
            rng,
        };
        level.wave_outstanding = level.place_wave(0);
        log::info!(
            "level {} ready: {} fruits over {} waves, {}s on the clock",
            level.level_number,
            level.total_fruits,
            level.waves.len(),
            level.time_limit
        );
        level
    }

    /// Advances the simulation by one tick.
    ///
    /// Does nothing once the level is completed or lost.
    pub fn update(&mut self, out_events: &mut Vec<Event>) {
        if self.is_finished() {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        self.update_objects(out_events);
        self.resolve_contacts(out_events);
        self.resolve_pickups(out_events);
        self.advance_waves(out_events);
        self.evaluate(out_events);
    }

    /// Removes one second from the countdown.
    ///
    /// Does nothing once the level is completed or lost.
    pub fn decrement_time(&mut self, out_events: &mut Vec<Event>) {
        if self.is_finished() {
            return;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        out_events.push(Event::CountdownChanged {
            remaining: self.time_remaining,
        });
        self.evaluate(out_events);
    }

    /// Steps an ice cream one cell, pushing pineapples and resolving contact.
    pub fn move_ice_cream(
        &mut self,
        ice_cream: EntityId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        if self.is_finished() {
            return false;
        }
        let moved = ice_cream::move_ice_cream(&mut self.board, ice_cream, direction, out_events);
        self.evaluate(out_events);
        moved
    }

    /// Lays a run of ice in front of an ice cream and returns the filled cells.
    pub fn create_ice_blocks(
        &mut self,
        ice_cream: EntityId,
        out_events: &mut Vec<Event>,
    ) -> Vec<Position> {
        if self.is_finished() {
            return Vec::new();
        }
        ice_cream::create_ice_blocks(&mut self.board, ice_cream, out_events)
    }

    /// Lays a single block in front of an ice cream.
    pub fn create_ice_block(
        &mut self,
        ice_cream: EntityId,
        out_events: &mut Vec<Event>,
    ) -> Option<Position> {
        if self.is_finished() {
            return None;
        }
        ice_cream::create_ice_block(&mut self.board, ice_cream, out_events)
    }

    /// Shatters the run of player-made ice next to an ice cream in `direction`.
    pub fn break_ice_blocks(
        &mut self,
        ice_cream: EntityId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Vec<Position> {
        if self.is_finished() {
            return Vec::new();
        }
        ice_cream::break_ice_blocks(&mut self.board, ice_cream, direction, out_events)
    }

    /// Shatters the run of player-made ice in the direction the ice cream faces.
    pub fn break_ice_blocks_ahead(
        &mut self,
        ice_cream: EntityId,
        out_events: &mut Vec<Event>,
    ) -> Vec<Position> {
        let facing = self
            .board
            .get(ice_cream)
            .and_then(GameObject::as_ice_cream)
            .map(IceCream::facing);
        match facing {
            Some(direction) => self.break_ice_blocks(ice_cream, direction, out_events),
            None => Vec::new(),
        }
    }

    /// Board holding every object of the level.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Number reported for the level.
    #[must_use]
    pub const fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Timing knobs in effect.
    #[must_use]
    pub const fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn time_remaining(&self) -> i32 {
        self.time_remaining
    }

    /// Seconds the level started with.
    #[must_use]
    pub const fn time_limit(&self) -> i32 {
        self.time_limit
    }

    /// Fruits collected across every activated wave.
    #[must_use]
    pub const fn collected_fruits(&self) -> usize {
        self.collected_fruits
    }

    /// Fruits the level must collect to complete.
    #[must_use]
    pub const fn total_fruits(&self) -> usize {
        self.total_fruits
    }

    /// Zero-based index of the active wave.
    #[must_use]
    pub const fn current_wave(&self) -> usize {
        self.current_wave
    }

    /// Number of configured waves.
    #[must_use]
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Ticks simulated so far.
    #[must_use]
    pub const fn tick_index(&self) -> u64 {
        self.tick_index
    }

    /// Whether every fruit has been collected. Never reverts once set.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the countdown ran out or no ice cream is alive.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.loss_reason().is_some()
    }

    /// Why the level is lost, if it is.
    #[must_use]
    pub fn loss_reason(&self) -> Option<LossReason> {
        if self.time_remaining <= 0 {
            Some(LossReason::TimeExpired)
        } else if self
            .board
            .ice_creams()
            .all(|object| !object.as_ice_cream().is_some_and(IceCream::is_alive))
        {
            Some(LossReason::AllEliminated)
        } else {
            None
        }
    }

    /// Sum of every ice cream's score.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.board
            .ice_creams()
            .filter_map(GameObject::as_ice_cream)
            .map(IceCream::score)
            .sum()
    }

    fn is_finished(&self) -> bool {
        self.completed || self.has_lost()
    }

    fn update_objects(&mut self, out_events: &mut Vec<Event>) {
        for id in self.board.ids() {
            let Some(object) = self.board.get(id) else {
                continue;
            };
            if !object.is_active() {
                continue;
            }
            let is_enemy = matches!(object.kind(), ObjectKind::Enemy(_));
            let is_fruit = matches!(object.kind(), ObjectKind::Fruit(_));
            if is_enemy {
                enemy::update_enemy(&mut self.board, id, &self.tuning, &mut self.rng, out_events);
            } else if is_fruit {
                fruit::update_fruit(&mut self.board, id, &self.tuning, &mut self.rng, out_events);
            }
        }
    }

    fn resolve_contacts(&mut self, out_events: &mut Vec<Event>) {
        let ice_creams: Vec<EntityId> = self.board.ice_creams().map(GameObject::id).collect();
        for id in ice_creams {
            let _ = ice_cream::resolve_contact(&mut self.board, id, out_events);
        }
    }

    fn resolve_pickups(&mut self, out_events: &mut Vec<Event>) {
        let collectors: Vec<(EntityId, Position)> = self
            .board
            .ice_creams()
            .filter(|object| object.as_ice_cream().is_some_and(IceCream::is_alive))
            .map(|object| (object.id(), object.position()))
            .collect();

        for (collector, position) in collectors {
            let fruits: Vec<EntityId> = self
                .board
                .objects_at(position)
                .filter(|object| object.is_collectable())
                .map(GameObject::id)
                .collect();
            for fruit in fruits {
                let points = self
                    .board
                    .object_mut(fruit)
                    .and_then(|object| match object.kind_mut() {
                        ObjectKind::Fruit(payload) => payload.on_collect(),
                        _ => None,
                    });
                let Some(points) = points else {
                    continue;
                };

                ice_cream::credit(&mut self.board, collector, points);
                let _ = self.board.remove(fruit);
                self.collected_fruits += 1;
                self.wave_outstanding = self.wave_outstanding.saturating_sub(1);
                out_events.push(Event::FruitCollected {
                    fruit,
                    collector,
                    points,
                });
            }
        }
    }

    fn advance_waves(&mut self, out_events: &mut Vec<Event>) {
        while self.wave_outstanding == 0 && self.current_wave + 1 < self.waves.len() {
            self.current_wave += 1;
            let placed = self.place_wave(self.current_wave);
            self.wave_outstanding = placed;
            log::debug!("wave {} activated with {placed} fruits", self.current_wave);
            out_events.push(Event::WaveActivated {
                wave: self.current_wave,
                fruits: placed,
            });
        }
    }

    fn evaluate(&mut self, out_events: &mut Vec<Event>) {
        if !self.completed && self.collected_fruits >= self.total_fruits {
            self.completed = true;
        }
        if self.outcome_reported {
            return;
        }

        if self.completed {
            self.outcome_reported = true;
            log::info!(
                "level {} completed with {} points",
                self.level_number,
                self.total_score()
            );
            out_events.push(Event::LevelCompleted);
        } else if let Some(reason) = self.loss_reason() {
            self.outcome_reported = true;
            log::info!("level {} lost: {reason:?}", self.level_number);
            out_events.push(Event::LevelLost { reason });
        }
    }

    fn place_wave(&mut self, index: usize) -> usize {
        let Some(wave) = self.waves.get(index) else {
            return 0;
        };
        wave.iter()
            .filter(|placement| {
                place(
                    &mut self.board,
                    placement.position,
                    ObjectKind::Fruit(Fruit::new(placement.kind, placement.spiked)),
                    "fruit",
                )
            })
            .count()
    }
}

fn place(board: &mut Board, position: Position, kind: ObjectKind, label: &str) -> bool {
    if board.add(position, kind).is_some() {
        return true;
    }
    log::warn!("skipping {label} placed outside the board at {position}");
    false
}
