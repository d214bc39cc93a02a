use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glimmer::{
    EffectParams, EffectSession, EncodedFrame, GifExporter, GlimmerConfig, NoiseTone,
    SparkleAnchor, load_image,
};

#[derive(Parser, Debug)]
#[command(name = "glimmer", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an animated GIF.
    Render(RenderArgs),
    /// Render a single preview frame as a PNG.
    Frame(FrameArgs),
    /// Write every animation frame as a PNG.
    Frames(FramesArgs),
    /// Print the default configuration as JSON.
    Defaults,
}

#[derive(Args, Debug)]
struct Common {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Configuration JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    overrides: ParamOverrides,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: Common,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: Common,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: Common,

    /// Directory receiving `frame_0.png` .. `frame_4.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AnchorArg {
    Corner,
    Center,
}

#[derive(Args, Debug, Default)]
struct ParamOverrides {
    /// Glitter density in [0, 1].
    #[arg(long)]
    glitter_density: Option<f64>,
    /// Lowest glitter gray level.
    #[arg(long)]
    lightness_min: Option<u8>,
    /// Highest glitter gray level.
    #[arg(long)]
    lightness_max: Option<u8>,
    /// Glitter opacity in [0, 1].
    #[arg(long)]
    glitter_opacity: Option<f32>,
    /// Draw each glitter channel independently.
    #[arg(long, default_value_t = false)]
    colored_noise: bool,
    /// Sparkle density, typically at most 0.01.
    #[arg(long)]
    sparkle_density: Option<f64>,
    /// Smallest sparkle edge in pixels.
    #[arg(long)]
    size_min: Option<f64>,
    /// Largest sparkle edge in pixels.
    #[arg(long)]
    size_max: Option<f64>,
    /// Lowest sparkle alpha.
    #[arg(long)]
    alpha_min: Option<f64>,
    /// Highest sparkle alpha.
    #[arg(long)]
    alpha_max: Option<f64>,
    /// Sparkle placement relative to its coordinate.
    #[arg(long, value_enum)]
    anchor: Option<AnchorArg>,
}

impl ParamOverrides {
    fn apply(&self, p: &mut EffectParams) {
        let g = &mut p.glitter;
        if let Some(v) = self.glitter_density {
            g.density = v;
        }
        if let Some(v) = self.lightness_min {
            g.lightness.min = v;
        }
        if let Some(v) = self.lightness_max {
            g.lightness.max = v;
        }
        if let Some(v) = self.glitter_opacity {
            g.opacity = v;
        }
        if self.colored_noise {
            g.tone = NoiseTone::Colored;
        }

        let s = &mut p.sparkle;
        if let Some(v) = self.sparkle_density {
            s.density = v;
        }
        if let Some(v) = self.size_min {
            s.size.min = v;
        }
        if let Some(v) = self.size_max {
            s.size.max = v;
        }
        if let Some(v) = self.alpha_min {
            s.alpha.min = v;
        }
        if let Some(v) = self.alpha_max {
            s.alpha.max = v;
        }
        if let Some(a) = self.anchor {
            s.anchor = match a {
                AnchorArg::Corner => SparkleAnchor::Corner,
                AnchorArg::Center => SparkleAnchor::Center,
            };
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(common: &Common) -> anyhow::Result<GlimmerConfig> {
    let mut cfg = match &common.config {
        Some(path) => GlimmerConfig::from_path(path)?,
        None => GlimmerConfig::default(),
    };
    if common.seed.is_some() {
        cfg.seed = common.seed;
    }
    common.overrides.apply(&mut cfg.effects);
    Ok(cfg)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let source = load_image(&args.common.in_path)?;
    let mut session = EffectSession::new(cfg.session_opts());
    let mut exporter = GifExporter::new(cfg.gif);
    let anim = session.render_animation(&source, &cfg.effects, &mut exporter)?;

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, &anim.bytes)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let source = load_image(&args.common.in_path)?;
    let mut session = EffectSession::new(cfg.session_opts());
    let frame = session.preview(&source, &cfg.effects)?;
    let png = EncodedFrame::from_frame(&frame)?;

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, png.bytes())
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let source = load_image(&args.common.in_path)?;
    let mut session = EffectSession::new(cfg.session_opts());
    let seq = session.assemble(&source, &cfg.effects)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (i, frame) in seq.frames.iter().enumerate() {
        let path = args.out_dir.join(format!("frame_{i}.png"));
        std::fs::write(&path, frame.bytes())
            .with_context(|| format!("write png '{}'", path.display()))?;
    }
    eprintln!("wrote {} frames to {}", seq.len(), args.out_dir.display());
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    println!("{}", GlimmerConfig::default().to_json_pretty()?);
    Ok(())
}
