use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storyreel::{
    DaySchedule, PipelineOpts, SlideshowOpts, read_events, run_pipeline, run_pipeline_with_video,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one day-card PNG per distinct date.
    Render(RenderArgs),
    /// Render day cards and stitch them into an MP4 slideshow (requires `ffmpeg` on PATH).
    Video(VideoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Seconds each card is held on screen.
    #[arg(long, default_value_t = 2)]
    seconds_per_image: u32,

    /// Video frame rate.
    #[arg(long, default_value_t = 24)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Input event table (CSV with a header row).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving the rendered day cards.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Background image, exactly 1080x1920.
    #[arg(long)]
    background: PathBuf,

    /// Font file used for all card text.
    #[arg(long)]
    font: PathBuf,

    /// Year assumed when resolving weekday titles from year-less dates.
    #[arg(long, default_value_t = storyreel::DEFAULT_ASSUMED_YEAR)]
    year: i32,

    /// Print the grouped schedule as JSON (diagnostics).
    #[arg(long)]
    dump_groups: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Video(args) => cmd_video(args),
    }
}

fn pipeline_opts(common: &CommonArgs) -> PipelineOpts {
    PipelineOpts {
        input: common.in_path.clone(),
        out_dir: common.out_dir.clone(),
        background: common.background.clone(),
        font: common.font.clone(),
        assumed_year: common.year,
    }
}

fn dump_groups(common: &CommonArgs) -> anyhow::Result<()> {
    let records = read_events(&common.in_path)?;
    let schedule = DaySchedule::from_records(records);
    eprintln!("{}", serde_json::to_string_pretty(&schedule)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.common.dump_groups {
        dump_groups(&args.common)?;
    }

    let artifacts = run_pipeline(&pipeline_opts(&args.common))?;
    for path in &artifacts {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    if args.common.dump_groups {
        dump_groups(&args.common)?;
    }

    let slideshow = SlideshowOpts {
        seconds_per_image: args.seconds_per_image,
        fps: args.fps,
        overwrite: true,
    };

    let artifacts = run_pipeline_with_video(&pipeline_opts(&args.common), &args.out, slideshow)?;
    for path in &artifacts {
        eprintln!("wrote {}", path.display());
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
