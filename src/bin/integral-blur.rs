use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use integral_blur::{
    BlurSettings, Channel, DecodedImage, IntegralTable, PixelBuffer, RawSize, blur_with_table,
    decode_image, gray_from_dynamic, load_image, load_raw_rgb, save_gray, seeded_gray,
};

#[derive(Parser, Debug)]
#[command(name = "integral-blur", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Box-blur one channel of an image and write the result as grayscale.
    Blur(BlurArgs),
    /// Print width, height and channel count of an image.
    Info(InfoArgs),
    /// Blur a seeded pseudo-random image and print both grids.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input image (any format `image` decodes), `-` for stdin, or a raw RGB file with --raw.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. `.raw`/`.gray` write bare samples, other extensions pick an image format.
    #[arg(long)]
    out: PathBuf,

    /// Blur radius; the window side is 2 * radius + 1. Overrides --config.
    #[arg(long)]
    radius: Option<u32>,

    /// Channel to blur. Overrides --config.
    #[arg(long, value_enum)]
    channel: Option<ChannelChoice>,

    /// Treat the input as headerless interleaved RGB of this size.
    #[arg(long, value_name = "WxH")]
    raw: Option<RawSize>,

    /// JSON settings file (`radius`, `channel`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON summary to stdout.
    #[arg(long)]
    report: bool,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input image, `-` for stdin, or a raw RGB file with --raw.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat the input as headerless interleaved RGB of this size.
    #[arg(long, value_name = "WxH")]
    raw: Option<RawSize>,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    #[arg(long, default_value_t = 8)]
    width: u32,

    #[arg(long, default_value_t = 6)]
    height: u32,

    #[arg(long, default_value_t = 1)]
    radius: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChannelChoice {
    Luma,
    Red,
    Green,
    Blue,
    Alpha,
}

impl From<ChannelChoice> for Channel {
    fn from(c: ChannelChoice) -> Self {
        match c {
            ChannelChoice::Luma => Channel::Luma,
            ChannelChoice::Red => Channel::Red,
            ChannelChoice::Green => Channel::Green,
            ChannelChoice::Blue => Channel::Blue,
            ChannelChoice::Alpha => Channel::Alpha,
        }
    }
}

#[derive(serde::Serialize)]
struct BlurReport {
    width: u32,
    height: u32,
    radius: u32,
    channel: Channel,
    input_mean: f64,
    output_mean: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Blur(args) => cmd_blur(args),
        Command::Info(args) => cmd_info(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: &Path, raw: Option<RawSize>) -> anyhow::Result<DecodedImage> {
    let from_stdin = path.as_os_str() == "-";
    let decoded = match (raw, from_stdin) {
        (Some(_), true) => anyhow::bail!("--raw input cannot be read from stdin"),
        (Some(RawSize(d)), false) => load_raw_rgb(path, d.width, d.height)?,
        (None, true) => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("read image from stdin")?;
            decode_image(&bytes)?
        }
        (None, false) => load_image(path)?,
    };
    Ok(decoded)
}

fn mean(sum: u64, pixels: usize) -> f64 {
    sum as f64 / pixels as f64
}

fn cmd_blur(args: BlurArgs) -> anyhow::Result<()> {
    let base = match &args.config {
        Some(p) => BlurSettings::from_json_path(p)?,
        None => BlurSettings::default(),
    };
    let settings = base.with_overrides(args.radius, args.channel.map(Channel::from));
    tracing::debug!(?settings, "resolved settings");

    let decoded = read_input(&args.in_path, args.raw)?;
    let table = {
        let gray = gray_from_dynamic(&decoded.image, settings.channel)?;
        IntegralTable::from_buffer(&gray)
    };
    drop(decoded);

    let blurred = blur_with_table(&table, settings.radius);
    save_gray(&args.out, &blurred)?;

    if args.report {
        let pixels = table.dimensions().pixel_count();
        let out_sum: u64 = blurred.as_slice().iter().map(|&v| u64::from(v)).sum();
        let report = BlurReport {
            width: table.width(),
            height: table.height(),
            radius: settings.radius,
            channel: settings.channel,
            input_mean: mean(table.total(), pixels),
            output_mean: mean(out_sum, pixels),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let decoded = read_input(&args.in_path, args.raw)?;
    println!(
        "Width: {}, Height: {}, Channels: {}",
        decoded.width, decoded.height, decoded.channels
    );
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let input = seeded_gray(args.width, args.height, args.seed)?;
    let table = IntegralTable::from_buffer(&input);
    let output = blur_with_table(&table, args.radius);

    println!("Input Image:");
    print_grid(&input);
    println!();
    println!("Blurred Image:");
    print_grid(&output);
    Ok(())
}

fn print_grid(grid: &PixelBuffer) {
    for row in grid.rows() {
        let line: String = row.iter().map(|v| format!("{v:3} ")).collect();
        println!("{line}");
    }
}
