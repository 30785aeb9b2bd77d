#![deny(unsafe_code)]
//! Headless CLI driver for vizwave scenes.
//!
//! Subcommands:
//! - `run <scene>` — step a scene N frames, write the final frame as JSON
//! - `list` — print available scenes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use vizwave_core::{PlaybackController, Recipe, Surface, Visualization};
use vizwave_scenes::{record, SceneKind};

#[derive(Parser)]
#[command(name = "vizwave", about = "Music-visualization engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Step a scene for N frames and write the final frame snapshot.
    Run {
        /// Scene name (e.g. "alchemy"); ignored when --recipe is given.
        scene: Option<String>,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 400.0)]
        width: f64,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 800.0)]
        height: f64,

        /// Number of playing frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// Extra idle frames appended after the playing run.
        #[arg(long, default_value_t = 0)]
        idle_tail: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Scene parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Replay a recipe file instead of taking scene/params from flags.
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Write the final frame here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List available scenes.
    List,
}

fn load_recipe(path: &PathBuf) -> Result<Recipe, CliError> {
    let text = std::fs::read_to_string(path)?;
    let recipe: Recipe =
        serde_json::from_str(&text).map_err(|e| CliError::Input(format!("invalid recipe: {e}")))?;
    recipe.validate()?;
    Ok(recipe)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let scenes = SceneKind::list_scenes();
            if cli.json {
                let info = serde_json::json!({ "scenes": scenes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Scenes:");
                for name in scenes {
                    println!("  {name}");
                }
            }
        }
        Command::Run {
            scene,
            width,
            height,
            frames,
            idle_tail,
            seed,
            params,
            recipe,
            output,
        } => {
            let recipe = match recipe {
                Some(path) => load_recipe(&path)?,
                None => {
                    let scene = scene
                        .ok_or_else(|| CliError::Input("a scene name or --recipe is required".into()))?;
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    let mut r = Recipe::new(&scene, width, height, seed);
                    r.params = params;
                    r.frames = frames;
                    r
                }
            };

            let surface: Surface = recipe.surface()?;
            let mut viz = SceneKind::from_name(&recipe.scene, recipe.seed, &recipe.params)?;

            let mut playback = PlaybackController::new();
            playback.play();
            viz.run(recipe.frames, playback.is_playing(), surface)?;
            playback.pause();
            viz.run(idle_tail, playback.is_playing(), surface)?;

            let frame = viz.frame();
            match &output {
                Some(path) => record::write_frame_json(&frame, path)?,
                None => println!("{}", serde_json::to_string_pretty(&frame)?),
            }

            if cli.json {
                let info = serde_json::json!({
                    "scene": recipe.scene,
                    "width": recipe.width,
                    "height": recipe.height,
                    "frames": recipe.frames,
                    "idle_tail": idle_tail,
                    "seed": recipe.seed,
                    "particles": frame.particles.len(),
                    "clock": frame.clock,
                    "output": output.as_ref().map(|p| p.display().to_string()),
                });
                eprintln!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "ran {} ({}x{}, {} frames + {} idle, seed {}) -> {} particles, clock {:.2}",
                    recipe.scene,
                    recipe.width,
                    recipe.height,
                    recipe.frames,
                    idle_tail,
                    recipe.seed,
                    frame.particles.len(),
                    frame.clock
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
