use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "modulator", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a single image into a PNG.
    Frame(FrameArgs),
    /// Process several images into an output directory.
    Batch(BatchArgs),
    /// Print the resolved parameter set as JSON.
    Params(ParamArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image (any format the decoder supports).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    #[command(flatten)]
    process: ProcessArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory receiving `<input stem>.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Input images.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    params: ParamArgs,

    #[command(flatten)]
    process: ProcessArgs,
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// Settings JSON; flags below override its fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Luminance divisor (0.25..=100).
    #[arg(long)]
    scale: Option<f64>,

    /// Lines per bundle (1..=100).
    #[arg(long)]
    drawing_count: Option<f64>,

    /// Crossings skipped between bundles (0..=100).
    #[arg(long)]
    interval_count: Option<f64>,

    /// Line width in pixels (1..=20).
    #[arg(long)]
    line_width: Option<f64>,

    /// Ink threshold (0..=255).
    #[arg(long)]
    threshold: Option<f64>,

    /// Alpha scale for white pixels (0..=255).
    #[arg(long)]
    opacity_white: Option<f64>,

    /// Alpha scale for black pixels (0..=255).
    #[arg(long)]
    opacity_black: Option<f64>,

    /// Scan direction.
    #[arg(long, value_enum)]
    direction: Option<DirectionChoice>,

    /// Accumulate brightness instead of darkness (`--invert` alone means `true`).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    invert: Option<bool>,
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Process scanlines in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (defaults to the global pool).
    #[arg(long)]
    threads: Option<usize>,

    /// Scale white color channels by the output alpha.
    #[arg(long)]
    premultiply: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    #[value(alias = "ltr")]
    LeftToRight,
    #[value(alias = "rtl")]
    RightToLeft,
    #[value(alias = "ttb")]
    TopToBottom,
    #[value(alias = "btt")]
    BottomToTop,
}

impl From<DirectionChoice> for modulator::Direction {
    fn from(d: DirectionChoice) -> Self {
        match d {
            DirectionChoice::LeftToRight => Self::LeftToRight,
            DirectionChoice::RightToLeft => Self::RightToLeft,
            DirectionChoice::TopToBottom => Self::TopToBottom,
            DirectionChoice::BottomToTop => Self::BottomToTop,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Params(args) => cmd_params(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_params(args: &ParamArgs) -> anyhow::Result<modulator::ParameterSet> {
    let mut settings = match &args.params {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read settings '{}'", path.display()))?;
            modulator::ModulatorSettings::from_json(&json)
                .with_context(|| format!("parse settings '{}'", path.display()))?
        }
        None => modulator::ModulatorSettings::default(),
    };

    let overrides = [
        (&mut settings.scale, args.scale),
        (&mut settings.drawing_count, args.drawing_count),
        (&mut settings.interval_count, args.interval_count),
        (&mut settings.line_width, args.line_width),
        (&mut settings.threshold, args.threshold),
        (&mut settings.opacity_white, args.opacity_white),
        (&mut settings.opacity_black, args.opacity_black),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            *field = v;
        }
    }
    if let Some(d) = args.direction {
        settings.direction = d.into();
    }
    if let Some(invert) = args.invert {
        settings.invert = invert;
    }

    Ok(settings.resolve()?)
}

fn make_session(args: &ProcessArgs) -> anyhow::Result<modulator::ModulatorSession> {
    let opts = modulator::ProcessOptions {
        parallel: args.parallel,
        threads: args.threads,
        premultiply_output: args.premultiply,
    };
    Ok(modulator::ModulatorSession::new(opts)?)
}

fn read_frame(path: &Path) -> anyhow::Result<modulator::Framebuffer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    modulator::decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))
}

fn write_png(path: &Path, frame: &modulator::Framebuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let png = modulator::encode_png(frame)?;
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    let mut session = make_session(&args.process)?;

    let input = read_frame(&args.in_path)?;
    let out = session
        .render(&input, &params)
        .with_context(|| format!("process '{}'", args.in_path.display()))?;
    write_png(&args.out, out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;
    let mut session = make_session(&args.process)?;

    let mut failed = 0usize;
    for in_path in &args.inputs {
        let stem = in_path
            .file_stem()
            .with_context(|| format!("input '{}' has no file name", in_path.display()))?;
        let out_path = args.out_dir.join(stem).with_extension("png");

        let result = read_frame(in_path).and_then(|input| {
            let out = session
                .render(&input, &params)
                .with_context(|| format!("process '{}'", in_path.display()))?;
            write_png(&out_path, out)
        });
        match result {
            Ok(()) => eprintln!("wrote {}", out_path.display()),
            Err(err) => {
                tracing::error!("{err:#}");
                failed += 1;
            }
        }
    }

    tracing::info!(
        rendered = session.frames_rendered(),
        failed,
        "batch finished"
    );
    if failed > 0 {
        anyhow::bail!("{failed} of {} inputs failed", args.inputs.len());
    }
    Ok(())
}

fn cmd_params(args: ParamArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args)?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
