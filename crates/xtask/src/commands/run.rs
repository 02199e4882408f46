//! Run ticks over a world document
//!
//! Loads a document, advances it a number of ticks and prints what happened
//! in each one. Input given on the command line is applied to the first tick
//! only, together with any input already pending on the world.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use world_content::{ConfigLoader, WorldDocument, WorldLoader};
use world_core::{ActorId, EngineConfig, Env, Input, PcgRng, World, WorldOperator};

use crate::utils::{fired_rules, frame_count};

/// Advance a world document by one or more ticks
#[derive(Parser)]
pub struct Run {
    /// World document to load (.json or .ron)
    #[arg(short, long, value_name = "FILE")]
    world: PathBuf,

    /// Engine configuration (TOML); WORLD_* environment variables override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 1)]
    ticks: u64,

    /// Key held during the first tick (repeatable)
    #[arg(short, long = "key", value_name = "CODE")]
    keys: Vec<String>,

    /// Actor clicked during the first tick (repeatable)
    #[arg(long = "click", value_name = "ACTOR_ID")]
    clicks: Vec<u32>,

    /// Write the resulting document here (.json or .ron)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let WorldDocument { world, characters } = WorldLoader::load(&self.world)
            .with_context(|| format!("Failed to load world: {}", self.world.display()))?;

        let base = match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => EngineConfig::default(),
        };
        let config = ConfigLoader::from_env(base)?;

        let operator = WorldOperator::new(Env::new(&characters, &PcgRng).into_world_env(), &config);

        let mut input = world.input.clone();
        input.keys.extend(self.keys.iter().cloned());
        input.clicks.extend(self.clicks.iter().copied().map(ActorId));

        println!(
            "{} {} ({} ticks, seed {})",
            style("World:").bold().cyan(),
            self.world.display(),
            self.ticks,
            config.seed
        );

        let mut world = world;
        for index in 0..self.ticks {
            let tick_input = if index == 0 {
                std::mem::take(&mut input)
            } else {
                Input::default()
            };
            world = match operator.tick(&world, &tick_input) {
                Ok(next) => next,
                Err(error) => {
                    let severity = error.severity().as_str();
                    return Err(anyhow::Error::new(error)
                        .context(format!("Tick {} failed ({severity} error)", world.tick)));
                }
            };
            print_tick(&world);
        }

        if let Some(path) = &self.output {
            WorldLoader::save(path, &WorldDocument::new(world, characters))
                .with_context(|| format!("Failed to write world: {}", path.display()))?;
            println!("{} {}", style("Saved:").bold().green(), path.display());
        }

        Ok(())
    }
}

fn print_tick(world: &World) {
    let fired = fired_rules(world);
    let stage = world.globals.selected_stage().unwrap_or_default();
    println!(
        "{} {:>4}  stage {}  rules fired {}  frames {}",
        style("tick").bold().yellow(),
        world.tick,
        stage,
        fired.len(),
        frame_count(world)
    );
    for (actor, rule) in fired {
        println!("    actor {actor}: {rule}");
    }
}
