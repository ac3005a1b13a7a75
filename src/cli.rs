use clap::Parser;
use std::path::PathBuf;

use crate::encode::writer::OutputFormat;
use crate::render::lcd::RenderStyle;

#[derive(Parser, Debug)]
#[command(name = "lcdbars", about = "Two-row LCD spectrum bars from audio blocks")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG); a test tone is used when omitted
    #[arg(conflicts_with = "tone")]
    pub input: Option<PathBuf>,

    /// Analyse a pure sine of this frequency (Hz) instead of a file
    #[arg(long)]
    pub tone: Option<f64>,

    /// Samples per block (power of two)
    #[arg(short = 'n', long, default_value_t = 128)]
    pub samples: usize,

    /// Number of bars; must divide samples / 2
    #[arg(short, long, default_value_t = 16)]
    pub bins: usize,

    /// Sampling frequency in Hz
    #[arg(short = 'f', long, default_value_t = 1800.0)]
    pub sampling_frequency: f64,

    /// ADC resolution in bits
    #[arg(long, default_value_t = 10)]
    pub adc_bits: u32,

    /// Input gain applied before quantization
    #[arg(long, default_value_t = 1.0)]
    pub gain: f64,

    /// Stop after this many blocks
    #[arg(long)]
    pub frames: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// How text frames draw each LCD cell
    #[arg(long, value_enum, default_value_t = RenderStyle::Blocks)]
    pub style: RenderStyle,

    /// Pace text frames at the block rate and redraw in place
    #[arg(long)]
    pub realtime: bool,

    /// Write frames to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to lcdbars.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
