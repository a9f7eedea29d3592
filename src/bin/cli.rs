use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{thread, time::Duration};

use stereopan::io::jack::LiveClient;
use stereopan::io::ports::{ControlSet, Port};
use stereopan::io::wav;
use stereopan::pan::params::parse_assignment;
use stereopan::pan::{Parameter, StereoPan};
use stereopan::render::Renderer;
use stereopan::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "stereopan")]
#[command(version)]
#[command(about = "Stereo width and balance processor with smoothed controls.")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "STEREOPAN_SETTINGS",
        help = "Settings file (defaults to $XDG_CONFIG_HOME/stereopan/settings.json)"
    )]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a WAV file offline.
    Render {
        input: PathBuf,
        output: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Run as a JACK client; read `name value` lines from stdin to change controls.
    Live {
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the port table.
    Ports,
    /// Print the effective settings, optionally writing them to a file.
    Config {
        #[arg(long, help = "Write the effective settings to this path")]
        write: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args, Debug)]
struct Overrides {
    #[arg(long, allow_hyphen_values = true, help = "Target gain, 0.0 to 2.0")]
    gain: Option<f32>,
    #[arg(long, allow_hyphen_values = true, help = "Target width, -1.0 to 1.0")]
    width: Option<f32>,
    #[arg(long, allow_hyphen_values = true, help = "Target balance, -1.0 to 1.0")]
    balance: Option<f32>,
    #[arg(long, env = "STEREOPAN_BLOCK_SIZE", help = "Frames per processing block")]
    block_size: Option<usize>,
}

impl Overrides {
    fn apply(&self, settings: &mut Settings) {
        let values = [
            (Parameter::Gain, self.gain),
            (Parameter::Width, self.width),
            (Parameter::Balance, self.balance),
        ];
        for (param, value) in values {
            if let Some(value) = value {
                settings.target.set(param, value);
            }
        }
        if let Some(block_size) = self.block_size {
            settings.block_size = block_size;
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    info!("Stereopan v{}", env!("CARGO_PKG_VERSION"));

    let mut settings = Settings::load(cli.settings.as_deref()).context("failed to load settings")?;

    match cli.command {
        Command::Render {
            input,
            output,
            overrides,
        } => {
            overrides.apply(&mut settings);
            render(&settings, &input, output)
        }
        Command::Live { overrides } => {
            overrides.apply(&mut settings);
            live(&settings)
        }
        Command::Ports => {
            println!("{}", StereoPan::URI);
            for port in Port::ALL {
                println!("{port}");
            }
            Ok(())
        }
        Command::Config { write, overrides } => {
            overrides.apply(&mut settings);
            print!("{settings}");
            if let Some(path) = write {
                settings
                    .save(&path)
                    .with_context(|| format!("failed to write settings to {}", path.display()))?;
                info!("Settings written to {}", path.display());
            }
            Ok(())
        }
    }
}

fn render(settings: &Settings, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "stereopan_{}.wav",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    info!("Rendering {} -> {}", input.display(), output.display());
    info!("Settings: {settings}");

    let clip = wav::read_stereo(input)?;
    let mut renderer = Renderer::new(settings);
    let processed = renderer.render(&clip);

    wav::write_stereo(&output, &processed)
        .with_context(|| format!("failed to write '{}'", output.display()))?;
    info!("Saved {}", output.display());
    Ok(())
}

fn live(settings: &Settings) -> Result<()> {
    settings.apply_to_environment();

    let client = LiveClient::new(&settings.jack, ControlSet::new(settings.target))
        .context("failed to start JACK client")?;
    info!("Running {client:?}; type e.g. `width -0.5`, Ctrl+C to quit");

    let running = Arc::new(AtomicBool::new(true));
    let shutdown_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received, shutting down...");
        shutdown_flag.store(false, Ordering::SeqCst);
    })
    .context("error setting Ctrl+C handler")?;

    let stdin_controls = client.controls().clone();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read stdin: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_assignment(&line) {
                Ok((param, value)) => {
                    if param.clamp(value) != value {
                        let (min, max) = param.range();
                        warn!("{param} {value} is outside {min}..={max}");
                    }
                    stdin_controls.set(param, value);
                    info!("{}", stdin_controls.values());
                }
                Err(e) => warn!("Ignoring '{}': {e}", line.trim()),
            }
        }
    });

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(200));
    }

    drop(client);
    Ok(())
}
