//! Bundled level layouts.

use dopo_core::{Direction, EnemyKind};

use crate::{LevelBuilder, LevelConfiguration};

/// Relative difficulty advertised by a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Introductory layouts.
    Easy,
    /// Layouts with a chasing enemy.
    Medium,
    /// Layouts with hazards and several chasers.
    Hard,
}

impl Difficulty {
    /// Human readable label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Recipe that fills a [`LevelBuilder`] with a specific layout.
pub trait LevelTemplate {
    /// Adds the template's entities to the builder.
    fn configure(&self, builder: LevelBuilder) -> LevelBuilder;

    /// Short title of the level.
    fn name(&self) -> &'static str;

    /// Longer description listing waves, enemies and obstacles.
    fn description(&self) -> &'static str;

    /// Number the session reports for this level.
    fn level_number(&self) -> u32;

    /// Advertised difficulty.
    fn difficulty(&self) -> Difficulty;
}

/// Builds the configuration described by `template` on a default-sized board.
#[must_use]
pub fn configuration_for(template: &dyn LevelTemplate) -> LevelConfiguration {
    template
        .configure(LevelBuilder::new().with_level_number(template.level_number()))
        .build()
}

/// Looks up a bundled template by level number.
#[must_use]
pub fn template(level_number: u32) -> Option<Box<dyn LevelTemplate>> {
    match level_number {
        1 => Some(Box::new(Level1Template)),
        2 => Some(Box::new(Level2Template)),
        3 => Some(Box::new(Level3Template)),
        4 => Some(Box::new(Level4Template)),
        _ => None,
    }
}

/// Every bundled template in level order.
#[must_use]
pub fn templates() -> Vec<Box<dyn LevelTemplate>> {
    (1..).map_while(template).collect()
}

/// Two trolls guarding bananas and grapes between two ice walls.
#[derive(Clone, Copy, Debug, Default)]
pub struct Level1Template;

impl LevelTemplate for Level1Template {
    fn configure(&self, builder: LevelBuilder) -> LevelBuilder {
        builder
            .add_vanilla_ice_cream(12, 7)
            .add_banana(12, 3)
            .add_banana(6, 7)
            .add_banana(18, 7)
            .add_banana(12, 11)
            .start_new_wave()
            .add_grape(3, 3)
            .add_grape(21, 3)
            .add_grape(3, 11)
            .add_grape(21, 11)
            .add_troll(5, 5)
            .add_troll(19, 9)
            .add_horizontal_ice_blocks(10, 14, 5)
            .add_horizontal_ice_blocks(10, 14, 9)
    }

    fn name(&self) -> &'static str {
        "Level 1 - Easy"
    }

    fn description(&self) -> &'static str {
        "Waves: 4 bananas (400 pts), then 4 grapes (200 pts). \
         Enemies: 2 trolls patrolling in straight lines. \
         Obstacles: two short ice walls."
    }

    fn level_number(&self) -> u32 {
        1
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }
}

/// An ice maze patrolled by trolls with a pot chasing the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct Level2Template;

impl LevelTemplate for Level2Template {
    fn configure(&self, builder: LevelBuilder) -> LevelBuilder {
        builder
            .add_vanilla_ice_cream(12, 7)
            .add_banana(6, 7)
            .add_banana(18, 7)
            .add_banana(12, 4)
            .add_banana(12, 10)
            .start_new_wave()
            .add_grape(2, 2)
            .add_grape(22, 2)
            .add_grape(2, 12)
            .add_grape(22, 12)
            .add_grape(12, 2)
            .add_grape(12, 12)
            .add_troll(4, 4)
            .add_troll(20, 10)
            .add_pot(12, 1)
            .add_horizontal_ice_blocks(8, 16, 5)
            .add_horizontal_ice_blocks(8, 16, 9)
            .add_vertical_ice_blocks(10, 3, 4)
            .add_vertical_ice_blocks(10, 10, 11)
            .add_vertical_ice_blocks(14, 3, 4)
            .add_vertical_ice_blocks(14, 10, 11)
    }

    fn name(&self) -> &'static str {
        "Level 2 - Medium"
    }

    fn description(&self) -> &'static str {
        "Waves: 4 bananas (400 pts), then 6 grapes (300 pts). \
         Enemies: 2 trolls and 1 pot chasing the nearest ice cream. \
         Obstacles: an ice maze around the centre."
    }

    fn level_number(&self) -> u32 {
        2
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }
}

/// A complex maze with bonfires, hot tiles and two pots.
#[derive(Clone, Copy, Debug, Default)]
pub struct Level3Template;

impl LevelTemplate for Level3Template {
    fn configure(&self, builder: LevelBuilder) -> LevelBuilder {
        builder
            .add_vanilla_ice_cream(12, 7)
            .add_banana(12, 1)
            .add_banana(12, 13)
            .add_banana(1, 7)
            .add_banana(23, 7)
            .start_new_wave()
            .add_grape(1, 1)
            .add_grape(23, 1)
            .add_grape(1, 13)
            .add_grape(23, 13)
            .add_grape(6, 3)
            .add_grape(18, 3)
            .add_grape(6, 11)
            .add_grape(18, 11)
            .add_troll(3, 3)
            .add_troll(21, 11)
            .add_pot(8, 7)
            .add_pot(16, 7)
            .add_horizontal_ice_blocks(5, 8, 4)
            .add_horizontal_bonfires(16, 19, 4)
            .add_horizontal_hot_tiles(5, 8, 10)
            .add_horizontal_ice_blocks(16, 19, 10)
            .add_vertical_ice_blocks(10, 2, 5)
            .add_vertical_ice_blocks(14, 2, 5)
            .add_vertical_ice_blocks(10, 9, 12)
            .add_vertical_ice_blocks(14, 9, 12)
    }

    fn name(&self) -> &'static str {
        "Level 3 - Hard"
    }

    fn description(&self) -> &'static str {
        "Waves: 4 bananas (400 pts), then 8 grapes (400 pts). \
         Enemies: 2 trolls and 2 pots. \
         Obstacles: a complex ice maze with bonfires and hot tiles."
    }

    fn level_number(&self) -> u32 {
        3
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }
}

/// Moving fruit guarded by an ice-breaking squid and a charging narwhal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Level4Template;

impl LevelTemplate for Level4Template {
    fn configure(&self, builder: LevelBuilder) -> LevelBuilder {
        builder
            .add_vanilla_ice_cream(12, 7)
            .add_pineapple(6, 7)
            .add_pineapple(18, 7)
            .add_cactus(12, 3)
            .add_cactus(12, 11)
            .start_new_wave()
            .add_cherry(3, 3)
            .add_cherry(21, 3)
            .add_cherry(3, 11)
            .add_cherry(21, 11)
            .add_squid(2, 2)
            .add_enemy_facing(EnemyKind::Narwhal, 22, 12, Direction::West)
            .add_enemy_facing(EnemyKind::Troll, 12, 1, Direction::East)
            .add_vertical_ice_blocks(9, 5, 9)
            .add_vertical_ice_blocks(15, 5, 9)
            .add_horizontal_hot_tiles(11, 13, 13)
    }

    fn name(&self) -> &'static str {
        "Level 4 - Glacier"
    }

    fn description(&self) -> &'static str {
        "Waves: 2 pineapples and 2 cacti (900 pts), then 4 teleporting cherries (600 pts). \
         Enemies: a squid that breaks ice, a narwhal that charges when aligned, and a troll. \
         Obstacles: two ice pillars and a strip of hot tiles."
    }

    fn level_number(&self) -> u32 {
        4
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }
}
