use dopo_core::{BoardView, EnemyKind, Flavor, FruitKind, ObstacleKind};
use dopo_world::{
    query::{self, SnapshotDetails},
    Level,
};

/// Draws the board as one string per row.
///
/// When several objects share a cell the ice cream wins, then enemies, then
/// fruit, then obstacles.
pub(crate) fn rows(level: &Level) -> Vec<String> {
    let (width, height) = level.board().dimensions();
    let width = usize::try_from(width).unwrap_or(0);
    let height = usize::try_from(height).unwrap_or(0);
    let mut cells = vec![vec![('.', 0_u8); width]; height];

    for snapshot in query::snapshots(level) {
        let (Ok(x), Ok(y)) = (
            usize::try_from(snapshot.position.x()),
            usize::try_from(snapshot.position.y()),
        ) else {
            continue;
        };
        let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) else {
            continue;
        };
        let candidate = glyph(&snapshot.details);
        if candidate.1 > cell.1 {
            *cell = candidate;
        }
    }

    cells
        .into_iter()
        .map(|row| row.into_iter().map(|(symbol, _)| symbol).collect())
        .collect()
}

fn glyph(details: &SnapshotDetails) -> (char, u8) {
    match *details {
        SnapshotDetails::IceCream { alive: false, .. } => ('x', 4),
        SnapshotDetails::IceCream { flavor, .. } => {
            let symbol = match flavor {
                Flavor::Vanilla => 'V',
                Flavor::Strawberry => 'S',
                Flavor::Chocolate => 'C',
            };
            (symbol, 4)
        }
        SnapshotDetails::Enemy { kind, .. } => {
            let symbol = match kind {
                EnemyKind::Troll => 'T',
                EnemyKind::Pot => 'P',
                EnemyKind::Squid => 'Q',
                EnemyKind::Narwhal => 'N',
            };
            (symbol, 3)
        }
        SnapshotDetails::Fruit { spiked: true, .. } => ('*', 2),
        SnapshotDetails::Fruit { kind, .. } => {
            let symbol = match kind {
                FruitKind::Grape => 'g',
                FruitKind::Banana => 'b',
                FruitKind::Cherry => 'c',
                FruitKind::Pineapple => 'p',
                FruitKind::Cactus => 'k',
            };
            (symbol, 2)
        }
        SnapshotDetails::Obstacle { kind, player_made } => {
            let symbol = match kind {
                ObstacleKind::IceBlock if player_made => '=',
                ObstacleKind::IceBlock => '#',
                ObstacleKind::Bonfire => '^',
                ObstacleKind::HotTile => '~',
            };
            (symbol, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dopo_levels::LevelBuilder;

    #[test]
    fn draws_every_layer() {
        let config = LevelBuilder::new()
            .with_size(5, 2)
            .add_vanilla_ice_cream(0, 0)
            .add_banana(1, 0)
            .add_troll(2, 0)
            .add_ice_block(3, 0)
            .add_bonfire(4, 0)
            .add_hot_tile(0, 1)
            .add_spiked_cactus(1, 1)
            .build();
        let level = Level::new(&config);
        assert_eq!(rows(&level), vec!["VbT#^".to_owned(), "~*...".to_owned()]);
    }

    #[test]
    fn ice_cream_is_drawn_over_a_fruit() {
        let config = LevelBuilder::new()
            .with_size(2, 1)
            .add_chocolate_ice_cream(0, 0)
            .add_grape(0, 0)
            .build();
        let level = Level::new(&config);
        assert_eq!(rows(&level), vec!["C.".to_owned()]);
    }
}
