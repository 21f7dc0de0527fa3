use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use glitchmask::{GlitchSpec, PixelBuffer, Rgb8, StageWriter};

#[derive(Parser, Debug)]
#[command(name = "glitchmask", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Glitch a photograph: generate a mask at its size and composite it on top.
    Apply(ApplyArgs),
    /// Generate a distorted bar mask on its own (no photograph).
    Mask(MaskArgs),
    /// Composite an existing mask image over a photograph.
    Overlay(OverlayArgs),
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input photograph (any format the codec can decode).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Also write each stage as a PNG into this directory.
    #[arg(long)]
    dump_stages: Option<PathBuf>,

    #[command(flatten)]
    knobs: SpecArgs,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Mask width in pixels.
    #[arg(long)]
    width: u32,

    /// Mask height in pixels.
    #[arg(long)]
    height: u32,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Also write each stage as a PNG into this directory.
    #[arg(long)]
    dump_stages: Option<PathBuf>,

    #[command(flatten)]
    knobs: SpecArgs,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Input photograph.
    #[arg(long)]
    photo: PathBuf,

    /// Mask image; its non-black pixels replace the photo's.
    #[arg(long)]
    mask: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Fail on dimension mismatch instead of resampling the mask.
    #[arg(long)]
    strict_dimensions: bool,
}

/// Spec-file plus per-field overrides, shared by `apply` and `mask`.
#[derive(Args, Debug)]
struct SpecArgs {
    /// JSON spec file; the flags below override its fields.
    #[arg(long = "spec")]
    spec_path: Option<PathBuf>,

    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Bar width in columns.
    #[arg(long)]
    bar_width: Option<u32>,

    /// Bar height as a fraction of the image height, in (0, 1].
    #[arg(long)]
    height_ratio: Option<f64>,

    /// Smallest gap between bars, in columns.
    #[arg(long)]
    min_spacing: Option<u32>,

    /// Largest gap between bars, in columns.
    #[arg(long)]
    max_spacing: Option<u32>,

    /// Vertical streak event count.
    #[arg(long)]
    streaks: Option<u32>,

    /// Horizontal slice event count.
    #[arg(long)]
    slices: Option<u32>,

    /// Comma-separated hex colors, e.g. '#FFC470,#DD5746'.
    #[arg(long)]
    palette: Option<String>,

    /// Fail on dimension mismatch instead of resampling the mask.
    #[arg(long)]
    strict_dimensions: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Overlay(args) => cmd_overlay(args),
    }
}

fn read_spec_json(path: &Path) -> anyhow::Result<GlitchSpec> {
    let f = File::open(path).with_context(|| format!("open spec '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: GlitchSpec = serde_json::from_reader(r).with_context(|| "parse spec JSON")?;
    Ok(spec)
}

fn parse_palette(raw: &str) -> anyhow::Result<Vec<Rgb8>> {
    raw.split(',')
        .map(|part| part.parse::<Rgb8>().map_err(anyhow::Error::from))
        .collect()
}

fn build_spec(knobs: &SpecArgs) -> anyhow::Result<GlitchSpec> {
    let mut spec = match &knobs.spec_path {
        Some(path) => read_spec_json(path)?,
        None => GlitchSpec::default(),
    };

    if let Some(v) = knobs.seed {
        spec.seed = Some(v);
    }
    if let Some(v) = knobs.bar_width {
        spec.bar_width = v;
    }
    if let Some(v) = knobs.height_ratio {
        spec.height_ratio = v;
    }
    if let Some(v) = knobs.min_spacing {
        spec.min_spacing = v;
    }
    if let Some(v) = knobs.max_spacing {
        spec.max_spacing = v;
    }
    if let Some(v) = knobs.streaks {
        spec.vertical_streaks = v;
    }
    if let Some(v) = knobs.slices {
        spec.horizontal_slices = v;
    }
    if let Some(raw) = &knobs.palette {
        spec.palette = parse_palette(raw)?;
    }
    if knobs.strict_dimensions {
        spec.strict_dimensions = true;
    }

    spec.validate()?;
    Ok(spec)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let spec = build_spec(&args.knobs)?;
    let photo = glitchmask::load_image(&args.in_path)?;

    let out = match &args.dump_stages {
        Some(dir) => {
            let mut sink = StageWriter::new(dir.clone())?;
            glitchmask::run_pipeline_with_sink(&photo, &spec, &mut sink)?
        }
        None => glitchmask::run_pipeline(&photo, &spec)?,
    };

    write_output(&out, &args.out)
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let spec = build_spec(&args.knobs)?;

    let mask = match &args.dump_stages {
        Some(dir) => {
            let mut sink = StageWriter::new(dir.clone())?;
            glitchmask::generate_mask_with_sink(args.width, args.height, &spec, &mut sink)?
        }
        None => glitchmask::generate_mask(args.width, args.height, &spec)?,
    };

    write_output(&mask, &args.out)
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let photo = glitchmask::load_image(&args.photo)?;
    let mask = glitchmask::load_image(&args.mask)?;

    let out = if args.strict_dimensions {
        glitchmask::composite_exact(&photo, &mask)?
    } else {
        glitchmask::composite(&photo, &mask)?
    };

    write_output(&out, &args.out)
}

fn write_output(buffer: &PixelBuffer, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    glitchmask::save_image(buffer, path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
