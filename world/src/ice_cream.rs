//! Player-controlled actors.

use dopo_core::{BoardView, Direction, EntityId, Event, Flavor, Position};

use crate::{Board, GameObject, ObjectKind, Obstacle};

/// Player actor that moves, builds and breaks ice, and collects fruit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IceCream {
    flavor: Flavor,
    facing: Direction,
    alive: bool,
    score: u32,
}

impl IceCream {
    /// Creates an alive ice cream facing south with no score.
    #[must_use]
    pub const fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            facing: Direction::South,
            alive: true,
            score: 0,
        }
    }

    /// Flavor chosen for the actor.
    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Direction of the last move request.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether the actor has not been eliminated.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Points collected so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn eliminate(&mut self) {
        self.alive = false;
    }
}

fn alive_ice_cream(board: &Board, id: EntityId) -> Option<(Position, IceCream)> {
    let object = board.get(id)?;
    let ice_cream = object.as_ice_cream()?;
    ice_cream
        .is_alive()
        .then(|| (object.position(), ice_cream.clone()))
}

fn write_back(board: &mut Board, id: EntityId, ice_cream: IceCream) {
    if let Some(object) = board.object_mut(id) {
        *object.kind_mut() = ObjectKind::IceCream(ice_cream);
    }
}

pub(crate) fn credit(board: &mut Board, id: EntityId, points: u32) {
    if let Some((_, mut ice_cream)) = alive_ice_cream(board, id) {
        ice_cream.score = ice_cream.score.saturating_add(points);
        write_back(board, id, ice_cream);
    }
}

/// Eliminates the ice cream when a dangerous object shares its cell.
pub(crate) fn resolve_contact(board: &mut Board, id: EntityId, out_events: &mut Vec<Event>) -> bool {
    let Some((position, _)) = alive_ice_cream(board, id) else {
        return false;
    };
    let endangered = board
        .objects_at(position)
        .any(|object| object.id() != id && object.is_dangerous());
    if !endangered || !board.eliminate(id) {
        return false;
    }

    log::debug!("ice cream {} eliminated at {position}", id.get());
    out_events.push(Event::IceCreamEliminated {
        ice_cream: id,
        at: position,
    });
    true
}

/// Turns the ice cream towards `direction` and steps into the next cell if it is open.
pub(crate) fn move_ice_cream(
    board: &mut Board,
    id: EntityId,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> bool {
    let Some((from, mut ice_cream)) = alive_ice_cream(board, id) else {
        return false;
    };
    ice_cream.facing = direction;
    write_back(board, id, ice_cream);

    let destination = from.step(direction);
    if !board.is_valid_position(destination) || board.is_solid_at(destination) {
        return false;
    }

    let push_target = destination.step(direction);
    let pineapples: Vec<EntityId> = board
        .objects_at(destination)
        .filter(|object| {
            object
                .as_fruit()
                .is_some_and(|fruit| fruit.is_pushable())
        })
        .map(GameObject::id)
        .collect();
    for pineapple in pineapples {
        if board.is_empty(push_target) && board.move_object(pineapple, push_target) {
            out_events.push(Event::FruitPushed {
                fruit: pineapple,
                from: destination,
                to: push_target,
            });
        }
    }

    if !board.move_object(id, destination) {
        return false;
    }
    out_events.push(Event::IceCreamMoved {
        ice_cream: id,
        from,
        to: destination,
    });
    let _ = resolve_contact(board, id, out_events);
    true
}

/// Fills empty cells in front of the ice cream with player-made ice.
pub(crate) fn create_ice_blocks(
    board: &mut Board,
    id: EntityId,
    out_events: &mut Vec<Event>,
) -> Vec<Position> {
    lay_ice(board, id, usize::MAX, out_events)
}

/// Places one player-made block directly in front of the ice cream.
pub(crate) fn create_ice_block(
    board: &mut Board,
    id: EntityId,
    out_events: &mut Vec<Event>,
) -> Option<Position> {
    lay_ice(board, id, 1, out_events).first().copied()
}

fn lay_ice(
    board: &mut Board,
    id: EntityId,
    limit: usize,
    out_events: &mut Vec<Event>,
) -> Vec<Position> {
    let Some((origin, ice_cream)) = alive_ice_cream(board, id) else {
        return Vec::new();
    };

    let mut created = Vec::new();
    let mut cursor = origin.step(ice_cream.facing());
    while created.len() < limit && board.is_empty(cursor) {
        if board
            .add(cursor, ObjectKind::Obstacle(Obstacle::player_ice()))
            .is_none()
        {
            break;
        }
        created.push(cursor);
        cursor = cursor.step(ice_cream.facing());
    }

    if !created.is_empty() {
        out_events.push(Event::IceBlocksCreated {
            ice_cream: id,
            cells: created.clone(),
        });
    }
    created
}

/// Shatters the contiguous run of player-made ice starting next to the ice cream.
pub(crate) fn break_ice_blocks(
    board: &mut Board,
    id: EntityId,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> Vec<Position> {
    let Some((origin, _)) = alive_ice_cream(board, id) else {
        return Vec::new();
    };

    let mut run = Vec::new();
    let mut cursor = origin.step(direction);
    while let Some(block) = board.ice_block_at(cursor) {
        let destructible = board
            .get(block)
            .and_then(GameObject::as_obstacle)
            .is_some_and(Obstacle::is_destructible);
        if !destructible {
            break;
        }
        run.push((block, cursor));
        cursor = cursor.step(direction);
    }

    let broken: Vec<Position> = run
        .into_iter()
        .filter_map(|(block, cell)| board.remove(block).map(|_| cell))
        .collect();
    if !broken.is_empty() {
        out_events.push(Event::IceBlocksBroken {
            ice_cream: id,
            cells: broken.clone(),
        });
    }
    broken
}
