use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hyperspace_tunnel::config::{InterpolationMode, NoiseMode, Settings};
use hyperspace_tunnel::export::{self, DEFAULT_FRAME_DELAY_MS};
use hyperspace_tunnel::{init_logging, render_sequence, sequence_crc32, Tint};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Gif,
}

#[derive(Parser)]
#[command(name = "hyperspace")]
#[command(about = "Render an animated hyperspace tunnel to PNG frames or a GIF")]
struct Args {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<i64>,

    /// Even heights are rounded up to the next odd value
    #[arg(long)]
    height: Option<i64>,

    #[arg(long)]
    max_octave: Option<i64>,

    #[arg(long, value_enum)]
    interpolation: Option<InterpolationMode>,

    #[arg(long, value_enum)]
    noise: Option<NoiseMode>,

    #[arg(long)]
    table_size: Option<i64>,

    /// Seed for the pregenerated table; random per run if omitted
    #[arg(long)]
    table_seed: Option<u32>,

    #[arg(long)]
    frames: Option<i64>,

    #[arg(long)]
    time_step: Option<f64>,

    /// Colour as r,g,b or r,g,b,a
    #[arg(long, default_value = "255,255,255,255")]
    tint: Tint,

    #[arg(long, value_enum, default_value = "gif")]
    format: Format,

    /// Output file (gif) or directory (png); defaults to hyperspace.gif / frames/
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// GIF frame delay
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    delay_ms: u32,

    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings, Box<dyn std::error::Error>> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(v) = self.width {
            settings.width = v;
        }
        if let Some(v) = self.height {
            settings.height = v;
        }
        if let Some(v) = self.max_octave {
            settings.max_octave = v;
        }
        if let Some(v) = self.interpolation {
            settings.interpolation = v;
        }
        if let Some(v) = self.noise {
            settings.noise = v;
        }
        if let Some(v) = self.table_size {
            settings.table_size = v;
        }
        if self.table_seed.is_some() {
            settings.table_seed = self.table_seed;
        }
        if let Some(v) = self.frames {
            settings.frame_count = v;
        }
        if let Some(v) = self.time_step {
            settings.time_step = v;
        }
        Ok(settings)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.settings()?.build()?;
    let sequence = render_sequence(&config);
    tracing::debug!(crc = format_args!("{:#010x}", sequence_crc32(&sequence)), "sequence checksum");

    match args.format {
        Format::Gif => {
            let path = args.output.unwrap_or_else(|| PathBuf::from("hyperspace.gif"));
            export::write_gif(&sequence, &args.tint, &path, args.delay_ms)?;
            eprintln!("Wrote {} frames to {}", sequence.len(), path.display());
        }
        Format::Png => {
            let dir = args.output.unwrap_or_else(|| PathBuf::from("frames"));
            let paths = export::write_png_sequence(&sequence, &args.tint, &dir, "hyperspace")?;
            eprintln!("Wrote {} frames to {}", paths.len(), dir.display());
        }
    }

    Ok(())
}
