//! Collectable objectives and their timed behaviours.

use dopo_core::{BoardView, EntityId, Event, FruitKind, Position, Tuning};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{Board, ObjectKind};

/// Fruit waiting to be collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fruit {
    kind: FruitKind,
    collected: bool,
    spiked: bool,
    ticks: u32,
}

impl Fruit {
    /// Creates an uncollected fruit; only a cactus honours `spiked`.
    #[must_use]
    pub const fn new(kind: FruitKind, spiked: bool) -> Self {
        Self {
            kind,
            collected: false,
            spiked: spiked && matches!(kind, FruitKind::Cactus),
            ticks: 0,
        }
    }

    /// Kind of fruit.
    #[must_use]
    pub const fn kind(&self) -> FruitKind {
        self.kind
    }

    /// Points awarded on collection.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Whether the fruit has been collected.
    #[must_use]
    pub const fn is_collected(&self) -> bool {
        self.collected
    }

    /// Whether a cactus currently shows its spikes.
    #[must_use]
    pub const fn has_spikes(&self) -> bool {
        self.spiked
    }

    /// Spiked cacti eliminate ice creams sharing their cell.
    #[must_use]
    pub const fn is_dangerous(&self) -> bool {
        self.spiked && !self.collected
    }

    /// Whether an ice cream may collect the fruit now.
    #[must_use]
    pub const fn is_collectable(&self) -> bool {
        !self.collected && !self.spiked
    }

    /// Whether ice creams walking into the fruit shove it along.
    #[must_use]
    pub const fn is_pushable(&self) -> bool {
        !self.collected && matches!(self.kind, FruitKind::Pineapple)
    }

    /// Marks the fruit collected and returns its points.
    ///
    /// Returns `None` when the fruit was already collected or is spiked.
    pub fn on_collect(&mut self) -> Option<u32> {
        if !self.is_collectable() {
            return None;
        }
        self.collected = true;
        Some(self.points())
    }

    fn advance(&mut self, tuning: &Tuning) -> Timer {
        let cycle = match self.kind {
            FruitKind::Cactus => tuning.spike_cycle_ticks,
            FruitKind::Cherry => tuning.teleport_cycle_ticks,
            FruitKind::Grape | FruitKind::Banana | FruitKind::Pineapple => return Timer::Idle,
        };
        if cycle == 0 {
            return Timer::Idle;
        }

        self.ticks = self.ticks.saturating_add(1);
        if self.ticks < cycle {
            return Timer::Idle;
        }
        self.ticks = 0;

        if matches!(self.kind, FruitKind::Cactus) {
            self.spiked = !self.spiked;
            Timer::SpikesToggled(self.spiked)
        } else {
            Timer::TeleportDue
        }
    }
}

enum Timer {
    Idle,
    SpikesToggled(bool),
    TeleportDue,
}

/// Runs one tick of the fruit's timed behaviour.
pub(crate) fn update_fruit(
    board: &mut Board,
    id: EntityId,
    tuning: &Tuning,
    rng: &mut ChaCha8Rng,
    out_events: &mut Vec<Event>,
) {
    let Some(object) = board.object_mut(id) else {
        return;
    };
    let ObjectKind::Fruit(fruit) = object.kind_mut() else {
        return;
    };
    if fruit.is_collected() {
        return;
    }

    let timer = fruit.advance(tuning);
    match timer {
        Timer::Idle => {}
        Timer::SpikesToggled(spiked) => {
            out_events.push(Event::FruitSpikesToggled { fruit: id, spiked });
        }
        Timer::TeleportDue => teleport(board, id, tuning.teleport_attempts, rng, out_events),
    }
}

fn teleport(
    board: &mut Board,
    id: EntityId,
    attempts: u32,
    rng: &mut ChaCha8Rng,
    out_events: &mut Vec<Event>,
) {
    let Some(from) = board.get(id).map(|object| object.position()) else {
        return;
    };
    let (width, height) = board.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    for _ in 0..attempts {
        let x = i32::try_from(rng.gen_range(0..width)).unwrap_or(i32::MAX);
        let y = i32::try_from(rng.gen_range(0..height)).unwrap_or(i32::MAX);
        let candidate = Position::new(x, y);
        if board.is_empty(candidate) && board.move_object(id, candidate) {
            log::debug!("fruit {} teleported from {from} to {candidate}", id.get());
            out_events.push(Event::FruitTeleported {
                fruit: id,
                from,
                to: candidate,
            });
            return;
        }
    }
    log::debug!("fruit {} found no free cell to teleport to", id.get());
}
