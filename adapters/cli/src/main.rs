#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Dopo Cream level headlessly.

mod render;
mod script;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dopo_core::Event;
use dopo_levels::{configuration_for, template, LevelConfiguration};
use dopo_system_session::Game;
use dopo_world::query;

use crate::script::Action;

/// Command-line arguments accepted by the `dopo` binary.
#[derive(Debug, Parser)]
#[command(name = "dopo", about = "Plays a Dopo Cream level without a window")]
struct CliArgs {
    /// Bundled level to play.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// TOML level configuration to play instead of a bundled level.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overrides the seed of the level's random generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Ticks simulated per second of countdown.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    ticks_per_second: u32,
    /// One action per tick: N, S, E, W move, C creates ice, B breaks ice, `.` idles.
    #[arg(long, default_value = "")]
    actions: String,
    /// Prints only the summary, without the final board.
    #[arg(long)]
    quiet: bool,
}

/// Entry point for the Dopo Cream command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let configuration = load_configuration(&args)?;
    configuration
        .validate()
        .context("level configuration is not playable")?;
    let actions = script::parse(&args.actions).context("invalid --actions script")?;

    let game = play(&configuration, &actions, &args);
    let level = game
        .current_level()
        .context("session ended without a level")?;

    if !args.quiet {
        for row in render::rows(level) {
            println!("{row}");
        }
        println!();
    }
    println!("level: {}", game.current_level_number());
    println!("state: {:?}", game.state());
    println!("ticks: {}", level.tick_index());
    println!("score: {}", game.total_score());
    println!(
        "fruits: {}/{}",
        level.collected_fruits(),
        level.total_fruits()
    );
    println!("time remaining: {}s", level.time_remaining());
    Ok(())
}

fn load_configuration(args: &CliArgs) -> Result<LevelConfiguration> {
    let configuration = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&source)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => {
            let template = template(args.level)
                .with_context(|| format!("no bundled level numbered {}", args.level))?;
            log::info!(
                "loading {} ({})",
                template.name(),
                template.difficulty().display_name()
            );
            configuration_for(template.as_ref())
        }
    };

    Ok(match args.seed {
        Some(seed) => configuration.with_seed(seed),
        None => configuration,
    })
}

fn play(configuration: &LevelConfiguration, actions: &[Action], args: &CliArgs) -> Game {
    let mut game = Game::new();
    let mut events = Vec::new();
    game.start_game(configuration, &mut events);
    report(&mut events);

    let mut scripted = actions.iter().copied();
    for tick in 1..=args.ticks {
        if game.state().is_terminal() {
            break;
        }

        let action = scripted.next().unwrap_or(Action::Idle);
        perform(&mut game, action, &mut events);
        game.update(&mut events);
        if tick % u64::from(args.ticks_per_second) == 0 {
            game.tick_clock(&mut events);
        }
        report(&mut events);
    }
    game
}

fn perform(game: &mut Game, action: Action, events: &mut Vec<Event>) {
    let Some(ice_cream) = game.current_level().and_then(query::first_alive_ice_cream) else {
        return;
    };

    match action {
        Action::Move(direction) => {
            let _ = game.move_ice_cream(ice_cream, direction, events);
        }
        Action::Create => {
            let _ = game.create_ice_blocks(ice_cream, events);
        }
        Action::Break => {
            let _ = game.break_ice_blocks_ahead(ice_cream, events);
        }
        Action::Idle => {}
    }
}

fn report(events: &mut Vec<Event>) {
    for event in events.drain(..) {
        match event {
            Event::GameStateChanged { state } => log::info!("session is now {state:?}"),
            Event::TimeAdvanced { .. } => {}
            other => log::debug!("{other:?}"),
        }
    }
}
