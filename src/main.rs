use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use instance_grid::{
    AnimatorConfig, ClickOutcome, InstancingHost, SceneDescription, TickSchedule,
};

#[derive(Parser)]
#[command(name = "instance-grid", about = "Drive the instanced cube grid headless")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with animator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the animation for a number of ticks
    Run {
        /// Number of ticks to run
        #[arg(short, long, default_value = "300")]
        ticks: u64,
        /// Pace ticks on the configured interval instead of running flat out
        #[arg(long)]
        realtime: bool,
        /// Start with animation disabled
        #[arg(long)]
        paused: bool,
    },
    /// Print one instance after a number of ticks
    Inspect {
        /// Flat row-major instance index
        #[arg(short, long)]
        index: usize,
        /// Ticks to run before inspecting
        #[arg(short, long, default_value = "0")]
        ticks: u64,
    },
    /// Pause and toggle the highlight of the given instances
    Click {
        /// Flat row-major instance indices
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Try to load the material textures
    Textures {
        #[arg(long)]
        diffuse: Option<PathBuf>,
        #[arg(long)]
        normal: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AnimatorConfig> {
    let Some(path) = path else {
        return Ok(AnimatorConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AnimatorConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn run(host: &mut InstancingHost, ticks: u64, realtime: bool) {
    let started = Instant::now();
    let mut last_direction = host.animator().phase().direction;

    let mut on_tick = |host: &mut InstancingHost| {
        host.on_tick();
        let direction = host.animator().phase().direction;
        if direction != last_direction {
            tracing::info!(
                x = host.animator().phase().x,
                ?direction,
                instances = host.instance_count(),
                "grid reversed"
            );
            last_direction = direction;
        }
    };

    if realtime {
        let mut schedule = TickSchedule::new(host.animator().config().tick_interval(), started);
        while schedule.ticks() < ticks {
            let now = Instant::now();
            let due = schedule.poll(now);
            for _ in 0..due {
                on_tick(host);
            }
            if due == 0 {
                std::thread::sleep(schedule.time_until_next(now));
            }
        }
    } else {
        for _ in 0..ticks {
            on_tick(host);
        }
    }

    tracing::info!(
        ticks,
        elapsed_ms = started.elapsed().as_millis() as u64,
        revision = host.batch().revision,
        "run finished"
    );
    println!("{}", host.subtitle());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;
    let mut host = InstancingHost::with_config(SceneDescription::default(), config)
        .context("creating instancing host")?;

    match cli.command {
        Commands::Run {
            ticks,
            realtime,
            paused,
        } => {
            host.set_animation_enabled(!paused);
            run(&mut host, ticks, realtime);
        }
        Commands::Inspect { index, ticks } => {
            for _ in 0..ticks {
                host.on_tick();
            }
            let batch = host.batch();
            let cell = batch.extent.cell_at(index).with_context(|| {
                format!("index {index} out of range ({} instances)", batch.len())
            })?;
            let params = &batch.parameters[index];
            let (_, rotation, translation) = batch.transforms[index].to_scale_rotation_translation();
            println!("instance {index} at cell {cell:?}");
            println!("  translation: {translation}");
            println!("  rotation:    {rotation}");
            println!("  diffuse:     {:?}", params.diffuse.to_array());
            println!("  tex offset:  {}", params.tex_offset);
            println!("  highlighted: {}", params.is_highlighted());
        }
        Commands::Click { indices } => {
            host.set_animation_enabled(false);
            for index in indices {
                match host.on_instance_clicked(index) {
                    Ok(ClickOutcome::Toggled { index, emissive }) => {
                        println!("instance {index}: emissive {:?}", emissive.to_array());
                    }
                    Ok(ClickOutcome::IgnoredWhileAnimating) => {
                        println!("instance {index}: ignored while animating");
                    }
                    Err(e) => println!("instance {index}: {e}"),
                }
            }
            let highlighted = host
                .batch()
                .parameters
                .iter()
                .filter(|p| p.is_highlighted())
                .count();
            println!("{highlighted} of {} instances highlighted", host.instance_count());
        }
        Commands::Textures { diffuse, normal } => {
            let mut material = host.scene().material.clone();
            if let Some(diffuse) = diffuse {
                material.diffuse_map = diffuse;
            }
            if let Some(normal) = normal {
                material.normal_map = normal;
            }
            match material.load() {
                Ok(textures) => println!(
                    "diffuse {}x{}, normal {}x{}",
                    textures.diffuse.width,
                    textures.diffuse.height,
                    textures.normal.width,
                    textures.normal.height
                ),
                Err(e) => {
                    tracing::warn!(error = %e, "material textures unavailable");
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
