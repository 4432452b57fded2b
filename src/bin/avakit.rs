use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use avakit::compose::swap::{self, ExternalRig};
use avakit::{
    AnimationTimerEngine, BackendKind, Component, Configuration, compose, detail,
};

#[derive(Parser, Debug)]
#[command(name = "avakit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one frame and write the scene description as JSON.
    Scene(SceneArgs),
    /// Dump resolved detail budgets as JSON.
    Budget(BudgetArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Configuration JSON. Defaults apply for missing fields.
    #[arg(long = "config")]
    config_path: Option<PathBuf>,

    /// Option overrides in key=value form (URL-parameter names).
    #[arg(long = "set")]
    set: Vec<String>,

    /// Elapsed session time in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Seed for the animation timers.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// External replacement-mesh description (polygonal backend only);
    /// switches output to a rig drive instead of a primitive scene.
    #[arg(long)]
    rig: Option<PathBuf>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BudgetArgs {
    /// Detail level (clamped to 1..=10).
    #[arg(long)]
    level: f64,

    /// Backend table to read.
    #[arg(long, value_enum, default_value_t = BackendChoice::Vector)]
    backend: BackendChoice,

    /// Single component; all components when omitted.
    #[arg(long, value_enum)]
    component: Option<ComponentChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Vector,
    Polygonal,
}

impl From<BackendChoice> for BackendKind {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Vector => BackendKind::Vector,
            BackendChoice::Polygonal => BackendKind::Polygonal,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ComponentChoice {
    Background,
    Legs,
    Body,
    Head,
    Hair,
    Eyes,
}

impl From<ComponentChoice> for Component {
    fn from(choice: ComponentChoice) -> Self {
        match choice {
            ComponentChoice::Background => Component::Background,
            ComponentChoice::Legs => Component::Legs,
            ComponentChoice::Body => Component::Body,
            ComponentChoice::Head => Component::Head,
            ComponentChoice::Hair => Component::Hair,
            ComponentChoice::Eyes => Component::Eyes,
        }
    }
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().cmd {
        Command::Scene(args) => cmd_scene(args),
        Command::Budget(args) => cmd_budget(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {what} JSON"))
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let mut cfg: Configuration = match &args.config_path {
        Some(path) => read_json(path, "configuration")?,
        None => Configuration::default(),
    };
    for pair in &args.set {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("--set '{pair}' is not key=value"))?;
        cfg.apply_option(key, value)?;
    }
    cfg.validate()?;

    let mut engine = AnimationTimerEngine::new(&cfg, args.seed);
    engine.advance(args.at_ms);
    let state = *engine.state();

    let json = match (&args.rig, cfg.backend) {
        (Some(rig_path), BackendKind::Polygonal) => {
            let rig: ExternalRig = read_json(rig_path, "rig")?;
            serde_json::to_string_pretty(&swap::drive(&rig, &cfg, &state, args.at_ms))?
        }
        (Some(_), BackendKind::Vector) => {
            anyhow::bail!("--rig requires the polygonal backend");
        }
        (None, BackendKind::Vector) => {
            serde_json::to_string_pretty(&compose::vector::compose(&cfg, &state, args.at_ms))?
        }
        (None, BackendKind::Polygonal) => {
            serde_json::to_string_pretty(&compose::polygon::compose(&cfg, &state, args.at_ms))?
        }
    };

    write_out(args.out.as_deref(), &json)
}

fn cmd_budget(args: BudgetArgs) -> anyhow::Result<()> {
    let backend: BackendKind = args.backend.into();
    let json = match args.component {
        Some(choice) => {
            serde_json::to_string_pretty(&detail::resolve(args.level, choice.into(), backend))?
        }
        None => {
            let all: Vec<_> = Component::ALL
                .iter()
                .map(|&c| (c, detail::resolve(args.level, c, backend)))
                .collect();
            serde_json::to_string_pretty(&all)?
        }
    };
    write_out(None, &json)
}

fn write_out(out: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
