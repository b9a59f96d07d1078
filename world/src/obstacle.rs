//! Ice blocks and lethal tiles.

use dopo_core::ObstacleKind;

/// Static object that either blocks movement or burns ice creams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    kind: ObstacleKind,
    player_made: bool,
}

impl Obstacle {
    /// Creates a level-authored obstacle.
    #[must_use]
    pub const fn new(kind: ObstacleKind) -> Self {
        Self {
            kind,
            player_made: false,
        }
    }

    /// Creates an ice block laid by an ice cream.
    #[must_use]
    pub const fn player_ice() -> Self {
        Self {
            kind: ObstacleKind::IceBlock,
            player_made: true,
        }
    }

    /// Kind of obstacle.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Whether the obstacle is a block of ice.
    #[must_use]
    pub const fn is_ice_block(&self) -> bool {
        matches!(self.kind, ObstacleKind::IceBlock)
    }

    /// Whether an ice cream created the obstacle.
    #[must_use]
    pub const fn is_player_made(&self) -> bool {
        self.player_made
    }

    /// Ice blocks are solid; lethal tiles can be walked on.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        self.is_ice_block()
    }

    /// Whether stepping on the obstacle eliminates an ice cream.
    #[must_use]
    pub const fn is_lethal(&self) -> bool {
        matches!(self.kind, ObstacleKind::Bonfire | ObstacleKind::HotTile)
    }

    /// Whether the player's break action may remove the obstacle.
    #[must_use]
    pub const fn is_destructible(&self) -> bool {
        self.is_ice_block() && self.player_made
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_player_ice_is_destructible() {
        assert!(Obstacle::player_ice().is_destructible());
        assert!(!Obstacle::new(ObstacleKind::IceBlock).is_destructible());
        assert!(!Obstacle::new(ObstacleKind::Bonfire).is_destructible());
    }

    #[test]
    fn lethal_tiles_are_not_solid() {
        for kind in [ObstacleKind::Bonfire, ObstacleKind::HotTile] {
            let tile = Obstacle::new(kind);
            assert!(tile.is_lethal());
            assert!(!tile.is_solid());
        }
        assert!(Obstacle::new(ObstacleKind::IceBlock).is_solid());
    }
}
