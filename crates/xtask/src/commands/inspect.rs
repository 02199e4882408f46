//! Inspect a world document
//!
//! Prints stages, actors, globals and characters, or the whole document as
//! JSON.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use world_content::{WorldDocument, WorldLoader};

use crate::utils::count_rules;

/// Inspect a world document
#[derive(Parser)]
pub struct Inspect {
    /// World document to read (.json or .ron)
    #[arg(short, long, value_name = "FILE")]
    world: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Stages, actors and characters
    Summary,
    /// Full JSON output
    Json,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let document = WorldLoader::load(&self.world)
            .with_context(|| format!("Failed to load world: {}", self.world.display()))?;

        match self.format {
            OutputFormat::Summary => print_summary(&document),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&document)
                    .context("Failed to serialize world to JSON")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

fn print_summary(document: &WorldDocument) {
    let world = &document.world;
    println!("{}", style("=== World Summary ===").bold().green());
    println!("  Id: {}", world.id);
    println!("  Tick: {}", world.tick);
    println!("  History: {} entries", world.history.len());
    println!();

    for stage in world.stages.values() {
        let current = world.globals.selected_stage() == Some(stage.id.as_str());
        println!(
            "{} {}{}",
            style("Stage:").bold().yellow(),
            stage.id,
            if current { " (current)" } else { "" }
        );
        println!(
            "  Size: {}x{}  wrap x: {}  wrap y: {}",
            stage.width, stage.height, stage.wrap_x, stage.wrap_y
        );
        for actor in stage.actors.values() {
            println!(
                "  Actor {} - {} [{}] at {}",
                actor.id, actor.character_id, actor.appearance, actor.position
            );
            for (name, value) in &actor.variable_values {
                println!("      {name} = {value}");
            }
        }
        println!();
    }

    println!("{}", style("Globals:").bold().yellow());
    for global in world.globals.iter() {
        println!("  {} = {:?}", global.id, global.value);
    }
    println!();

    println!("{}", style("Characters:").bold().yellow());
    for character in document.characters.iter() {
        println!(
            "  {} ({}) - {} rules, {} variables, {} appearances",
            character.id,
            character.name,
            count_rules(&character.rules),
            character.variables.len(),
            character.spritesheet.appearances.len()
        );
    }
}
