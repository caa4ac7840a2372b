//! Terminal player for typewriter text animations.
//!
//! Plays a TOML preset (or texts given on the command line) on a single
//! terminal line. Set `RUST_LOG=debug` to trace phase changes.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use textype::render::RenderNode;
use textype::runtime::terminal::{IntervalScheduler, TerminalHost};
use textype::runtime::{RunOutcome, Session};
use textype::{Options, TextType, TextypeError};

#[derive(Parser)]
#[command(name = "textype")]
#[command(about = "Type, hold and erase text in the terminal")]
#[command(version)]
struct Cli {
    /// Preset file to play
    #[arg(short, long, value_name = "FILE")]
    preset: Option<PathBuf>,

    /// Text to type (repeatable, replaces the preset's texts)
    #[arg(short, long = "text", value_name = "TEXT")]
    texts: Vec<String>,

    /// Refresh rate of the terminal host
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for variable typing speed
    #[arg(long)]
    seed: Option<u64>,

    /// Play the sequence once instead of looping
    #[arg(long)]
    no_loop: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print the static fallback as HTML and exit
    #[arg(long)]
    html: bool,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,

    /// List presets in a directory and exit
    #[arg(long, value_name = "DIR")]
    list: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            let _ = writeln!(io::stderr(), "textype: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TextypeError> {
    let mut stdout = io::stdout().lock();

    if cli.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| TextypeError::OptionsParse(e.to_string()))?;
        writeln!(stdout, "{schema}")?;
        return Ok(());
    }
    if let Some(dir) = &cli.list {
        for name in Options::list_presets(dir) {
            writeln!(stdout, "{name}")?;
        }
        return Ok(());
    }

    let options = load_options(cli)?;
    if cli.html {
        writeln!(stdout, "{}", RenderNode::fallback(&options).to_html())?;
        return Ok(());
    }

    let mut component = TextType::new(&options)?;
    if let Some(seed) = cli.seed {
        component = component.with_seed(seed);
    }
    component.on_sentence_complete(|next, index| {
        log::debug!("next sentence {index}: {next:?}");
    });

    let mut scheduler = IntervalScheduler::new(cli.fps);
    let mut host = TerminalHost::new(stdout).with_color(!cli.no_color);
    let outcome = Session::new(&mut scheduler).run(&mut component, &mut host)?;
    host.finish()?;
    if outcome == RunOutcome::Degraded {
        log::warn!("terminal host could not animate, printed final text");
    }
    log::info!("played at {:.1} fps", scheduler.fps());
    Ok(())
}

fn load_options(cli: &Cli) -> Result<Options, TextypeError> {
    let mut options = match &cli.preset {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if !cli.texts.is_empty() {
        options.texts = cli.texts.clone().into();
    }
    if cli.no_loop {
        options.behavior.looping = false;
    }
    // Without an observer the visibility gate would never open
    options.behavior.start_on_visible = false;
    Ok(options)
}
