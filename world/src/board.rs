//! Spatial container owning every object placed in a level.

use dopo_core::{BoardView, EntityId, Position};

use crate::{Enemy, Fruit, IceCream, Obstacle};

/// Variant payload carried by a [`GameObject`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Player-controlled actor.
    IceCream(IceCream),
    /// Hostile actor driven by a strategy and a brain.
    Enemy(Enemy),
    /// Collectable objective.
    Fruit(Fruit),
    /// Ice block or lethal tile.
    Obstacle(Obstacle),
}

/// Object placed on a [`Board`].
///
/// The position is owned by the board; it only changes through
/// [`Board::move_object`], which keeps the cell index in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    id: EntityId,
    position: Position,
    active: bool,
    kind: ObjectKind,
}

impl GameObject {
    /// Identifier allocated by the board.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Current cell of the object.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the object still takes part in the simulation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Variant payload of the object.
    #[must_use]
    pub const fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ObjectKind {
        &mut self.kind
    }

    /// Whether the object blocks movement into its cell.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        match &self.kind {
            ObjectKind::Obstacle(obstacle) => obstacle.is_solid(),
            _ => false,
        }
    }

    /// Whether an alive ice cream sharing the cell is eliminated.
    #[must_use]
    pub fn is_dangerous(&self) -> bool {
        if !self.active {
            return false;
        }

        match &self.kind {
            ObjectKind::Enemy(_) => true,
            ObjectKind::Fruit(fruit) => fruit.is_dangerous(),
            ObjectKind::Obstacle(obstacle) => obstacle.is_lethal(),
            ObjectKind::IceCream(_) => false,
        }
    }

    /// Whether an ice cream on the cell may collect the object right now.
    #[must_use]
    pub fn is_collectable(&self) -> bool {
        match &self.kind {
            ObjectKind::Fruit(fruit) => self.active && fruit.is_collectable(),
            _ => false,
        }
    }

    /// Ice cream payload, if any.
    #[must_use]
    pub const fn as_ice_cream(&self) -> Option<&IceCream> {
        match &self.kind {
            ObjectKind::IceCream(ice_cream) => Some(ice_cream),
            _ => None,
        }
    }

    /// Enemy payload, if any.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&Enemy> {
        match &self.kind {
            ObjectKind::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    /// Fruit payload, if any.
    #[must_use]
    pub const fn as_fruit(&self) -> Option<&Fruit> {
        match &self.kind {
            ObjectKind::Fruit(fruit) => Some(fruit),
            _ => None,
        }
    }

    /// Obstacle payload, if any.
    #[must_use]
    pub const fn as_obstacle(&self) -> Option<&Obstacle> {
        match &self.kind {
            ObjectKind::Obstacle(obstacle) => Some(obstacle),
            _ => None,
        }
    }
}

/// Grid of cells holding every object of a level.
///
/// Objects live in an arena indexed by their identifier, so iterating the
/// arena yields insertion order. Each cell lists the identifiers residing on
/// it; several non-solid objects may share a cell.
#[derive(Clone, Debug)]
pub struct Board {
    width: u32,
    height: u32,
    objects: Vec<Option<GameObject>>,
    cells: Vec<Vec<EntityId>>,
    ice_creams: Vec<EntityId>,
}

impl Board {
    /// Creates an empty board of `width` by `height` cells.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            width,
            height,
            objects: Vec::new(),
            cells: vec![Vec::new(); capacity],
            ice_creams: Vec::new(),
        }
    }

    /// Places a new active object and returns its identifier.
    ///
    /// Nothing is placed when `position` lies outside the board.
    pub fn add(&mut self, position: Position, kind: ObjectKind) -> Option<EntityId> {
        let index = self.index(position)?;
        let id = EntityId::new(u32::try_from(self.objects.len()).ok()?);
        if matches!(kind, ObjectKind::IceCream(_)) {
            self.ice_creams.push(id);
        }
        self.cells[index].push(id);
        self.objects.push(Some(GameObject {
            id,
            position,
            active: true,
            kind,
        }));
        Some(id)
    }

    /// Removes an object from the board and hands it back.
    pub fn remove(&mut self, id: EntityId) -> Option<GameObject> {
        let slot = self.slot_index(id)?;
        let object = self.objects.get_mut(slot)?.take()?;
        if let Some(index) = self.index(object.position) {
            self.cells[index].retain(|resident| *resident != id);
        }
        self.ice_creams.retain(|resident| *resident != id);
        Some(object)
    }

    /// Moves an object to `to`, updating its position and the cell index together.
    ///
    /// Returns `false` without changes when the object is unknown or `to` lies
    /// outside the board.
    pub fn move_object(&mut self, id: EntityId, to: Position) -> bool {
        let Some(target) = self.index(to) else {
            return false;
        };
        let Some(from) = self.get(id).map(GameObject::position) else {
            return false;
        };
        if let Some(source) = self.index(from) {
            self.cells[source].retain(|resident| *resident != id);
        }
        self.cells[target].push(id);
        if let Some(object) = self.object_mut(id) {
            object.position = to;
        }
        true
    }

    /// Looks up an object by identifier.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&GameObject> {
        self.objects.get(self.slot_index(id)?)?.as_ref()
    }

    pub(crate) fn object_mut(&mut self, id: EntityId) -> Option<&mut GameObject> {
        let slot = self.slot_index(id)?;
        self.objects.get_mut(slot)?.as_mut()
    }

    /// Marks an ice cream as eliminated; it stays on the board, inert.
    ///
    /// Returns `false` when `id` is not an alive ice cream.
    pub fn eliminate(&mut self, id: EntityId) -> bool {
        let Some(object) = self.object_mut(id) else {
            return false;
        };
        let ObjectKind::IceCream(ice_cream) = &mut object.kind else {
            return false;
        };
        if !ice_cream.is_alive() {
            return false;
        }
        ice_cream.eliminate();
        object.active = false;
        true
    }

    /// Objects residing on `position`; empty for positions off the board.
    pub fn objects_at(&self, position: Position) -> impl Iterator<Item = &GameObject> + '_ {
        self.index(position)
            .map(|index| self.cells[index].as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.get(*id))
    }

    /// Every object in insertion order.
    pub fn all_objects(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.objects.iter().flatten()
    }

    /// Identifiers of every object in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.all_objects().map(GameObject::id).collect()
    }

    /// Every ice cream, alive or not, in insertion order.
    pub fn ice_creams(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.ice_creams.iter().filter_map(|id| self.get(*id))
    }

    /// Number of objects currently placed.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.iter().flatten().count()
    }

    /// Reports whether `position` is on the board and holds no object.
    #[must_use]
    pub fn is_empty(&self, position: Position) -> bool {
        self.index(position)
            .is_some_and(|index| self.cells[index].is_empty())
    }

    /// Identifier of the ice block on `position`, if any.
    #[must_use]
    pub fn ice_block_at(&self, position: Position) -> Option<EntityId> {
        self.objects_at(position)
            .find(|object| {
                object
                    .as_obstacle()
                    .is_some_and(|obstacle| obstacle.is_ice_block())
            })
            .map(GameObject::id)
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.is_valid_position(position) {
            return None;
        }
        let x = usize::try_from(position.x()).ok()?;
        let y = usize::try_from(position.y()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(y * width + x)
    }

    fn slot_index(&self, id: EntityId) -> Option<usize> {
        usize::try_from(id.get()).ok()
    }
}

impl BoardView for Board {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_solid_at(&self, position: Position) -> bool {
        self.objects_at(position).any(GameObject::is_solid)
    }

    fn has_ice_block_at(&self, position: Position) -> bool {
        self.ice_block_at(position).is_some()
    }

    fn has_enemy_at(&self, position: Position) -> bool {
        self.objects_at(position)
            .any(|object| object.as_enemy().is_some())
    }

    fn ice_cream_positions(&self) -> Vec<Position> {
        self.ice_creams()
            .filter(|object| object.as_ice_cream().is_some_and(IceCream::is_alive))
            .map(GameObject::position)
            .collect()
    }
}
