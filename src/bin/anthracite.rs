use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use anthracite::{
    Canvas, CpuSurface, ElementMetrics, InputSnapshot, Language, Locale, ParallaxConfig,
    ParticleConfig, ParticleLoop, Rng64, SiteConfig, TranslationTable, Viewport,
    parallax::layer::Axis,
};

#[derive(Parser, Debug)]
#[command(name = "anthracite", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the contact email endpoint.
    Serve(ServeArgs),
    /// Simulate the particle background and write the last frame as a PNG.
    Particles(ParticlesArgs),
    /// Print one translated string.
    Translate(TranslateArgs),
    /// Print `scroll_y,offset` samples for a section parallax layer.
    Parallax(ParallaxArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen address; overrides `SITE_BIND`.
    #[arg(long)]
    bind: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

#[derive(Parser, Debug)]
struct ParticlesArgs {
    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    /// Number of executed frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// RNG seed; defaults to the clock.
    #[arg(long)]
    seed: Option<u64>,

    /// Particle settings JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// `fr` or `en`.
    #[arg(long, default_value = "fr")]
    lang: String,

    /// Dotted key, e.g. `contactForm.submit`.
    key: String,
}

#[derive(Parser, Debug)]
struct ParallaxArgs {
    #[arg(long)]
    offset_top: f64,

    #[arg(long)]
    height: f64,

    /// Viewport height.
    #[arg(long)]
    viewport: f64,

    #[arg(long, default_value_t = 0.5)]
    speed: f64,

    /// Scroll distance between samples.
    #[arg(long, default_value_t = 50.0)]
    step: f64,

    /// Last scroll offset; defaults to the bottom of the element.
    #[arg(long)]
    max: Option<f64>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let json = matches!(&cli.cmd, Command::Serve(args) if args.log_json);
    init_tracing(json);
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Particles(args) => cmd_particles(args),
        Command::Translate(args) => cmd_translate(args),
        Command::Parallax(args) => cmd_parallax(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = SiteConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")?;
    runtime.block_on(anthracite::server::serve(config))?;
    Ok(())
}

fn read_particle_config(path: &PathBuf) -> anyhow::Result<ParticleConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: ParticleConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse particle config JSON")?;
    Ok(cfg)
}

fn cmd_particles(args: ParticlesArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => read_particle_config(path)?,
        None => ParticleConfig::default(),
    };
    let rng = args.seed.map_or_else(Rng64::from_clock, Rng64::new);
    let surface = CpuSurface::new(Canvas::new(args.width, args.height))?;
    let mut lp = ParticleLoop::start(Some(surface), cfg, rng)?
        .context("particle loop did not start")?;

    let interval = lp.task().field().config().fps()?.frame_interval_ms();
    let mut now_ms = 0.0;
    while lp.frames_run() < args.frames {
        lp.refresh(now_ms);
        now_ms += interval;
    }

    let particles = lp.task().field().particles().len();
    let surface = lp.into_task().into_surface();

    surface
        .write_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({particles} particles, {} frames)", args.out.display(), args.frames);
    Ok(())
}

fn cmd_translate(args: TranslateArgs) -> anyhow::Result<()> {
    let lang: Language = args.lang.parse()?;
    let locale = Locale::new(lang, TranslationTable::builtin());
    println!("{}", locale.translate(&args.key));
    Ok(())
}

fn cmd_parallax(args: ParallaxArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be > 0");
    }
    let metrics = ElementMetrics {
        offset_top: args.offset_top,
        height: args.height,
        viewport_height: args.viewport,
    };
    let layer = ParallaxConfig {
        section_speed: args.speed,
        ..ParallaxConfig::default()
    }
    .section_layer(Axis::Vertical, Some(metrics));

    let max = args.max.unwrap_or(args.offset_top + args.height).max(0.0);
    println!("scroll_y,offset");
    let mut scroll_y = 0.0;
    while scroll_y <= max {
        let inputs = InputSnapshot {
            scroll_y,
            pointer: None,
            viewport: Viewport::new(0.0, args.viewport),
        };
        println!("{scroll_y},{:.3}", layer.target(&inputs).y);
        scroll_y += args.step;
    }
    Ok(())
}
