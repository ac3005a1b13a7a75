mod audio;
mod cli;
mod config;
mod encode;
mod render;
mod spectrum;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use audio::acquire::{Adc, DecodedSource, SampleSource, ToneSource};
use audio::analysis::{analyze_block, analyze_blocks, collect_blocks};
use cli::Cli;
use encode::writer::{FrameWriter, OutputFormat};
use render::lcd::RenderStyle;
use spectrum::{Analyzer, SpectrumConfig};

const DEFAULT_TONE_HZ: f64 = 440.0;
const DEFAULT_TONE_FRAMES: usize = 32;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    let config_path = cli.config.clone().or_else(config::discover_config);
    if let Some(ref path) = config_path {
        // load_config logs why a file was rejected
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Config values apply only when the CLI is at its default
            if cli.samples == config::default_samples() { cli.samples = cfg.spectrum.samples; }
            if cli.bins == config::default_bins() { cli.bins = cfg.spectrum.bins; }
            if cli.sampling_frequency == config::default_sampling_frequency() {
                cli.sampling_frequency = cfg.spectrum.sampling_frequency;
            }
            if cli.adc_bits == config::default_adc_bits() { cli.adc_bits = cfg.adc.bits; }
            if cli.gain == config::default_gain() { cli.gain = cfg.adc.gain; }
            if cli.style == RenderStyle::default() { cli.style = cfg.display.style; }
            if cli.format == OutputFormat::default() { cli.format = cfg.display.format; }
        }
    }

    let spectrum_config =
        SpectrumConfig::new(cli.samples, cli.bins).context("Invalid spectrum configuration")?;
    if !cli.sampling_frequency.is_finite() || cli.sampling_frequency <= 0.0 {
        anyhow::bail!("Sampling frequency must be positive, got {}", cli.sampling_frequency);
    }
    let adc = Adc::new(cli.adc_bits, cli.gain)?;

    log::info!("lcdbars - two-row LCD spectrum");
    log::info!(
        "Blocks of {} samples @ {:.1}Hz -> {} bars of {} FFT bins",
        spectrum_config.samples(),
        cli.sampling_frequency,
        spectrum_config.bins(),
        spectrum_config.bin_width()
    );

    let mut source: Box<dyn SampleSource> = match cli.input {
        Some(ref input) => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }
            log::info!("Input: {}", input.display());
            let audio = audio::decode::decode_audio(input)?;
            Box::new(DecodedSource::new(audio, cli.sampling_frequency, adc))
        }
        None => {
            let hz = cli.tone.unwrap_or(DEFAULT_TONE_HZ);
            log::info!("Input: {:.1}Hz test tone", hz);
            Box::new(ToneSource::new(hz, cli.sampling_frequency, adc))
        }
    };

    let sample_rate = source.sample_rate();
    log::info!(
        "Each bar spans {:.2}Hz, frame period {:.1}ms",
        spectrum_config.bin_hz(sample_rate),
        spectrum_config.samples() as f64 / sample_rate * 1000.0
    );

    let analyzer = Analyzer::new(spectrum_config);
    let mut writer = FrameWriter::new(cli.output.as_deref(), cli.format, cli.style, spectrum_config.bins())?;

    if cli.realtime {
        writer.set_redraw(cli.format == OutputFormat::Text && cli.output.is_none());
        run_realtime(&analyzer, source.as_mut(), sample_rate, cli.frames, &mut writer)?;
    } else {
        // a tone never runs out, so batch mode needs a bound
        let limit = cli
            .frames
            .or(if cli.input.is_none() { Some(DEFAULT_TONE_FRAMES) } else { None });
        run_batch(&analyzer, source.as_mut(), sample_rate, limit, cli.output.is_some(), &mut writer)?;
    }

    writer.finish()?;
    Ok(())
}

/// Acquire, analyse and show one block at a time, paced at the block rate.
fn run_realtime(
    analyzer: &Analyzer,
    source: &mut dyn SampleSource,
    sample_rate: f64,
    limit: Option<usize>,
    writer: &mut FrameWriter,
) -> Result<()> {
    let n = analyzer.config().samples();
    let period = Duration::from_secs_f64(n as f64 / sample_rate);
    let mut frame = 0;

    while limit.map_or(true, |max| frame < max) {
        let mut block = vec![0.0; n];
        if !source.next_block(&mut block) {
            break;
        }
        let bars = analyze_block(analyzer, frame, block, sample_rate)?;
        writer.write_frame(&bars)?;
        frame += 1;
        std::thread::sleep(period);
    }
    Ok(())
}

/// Acquire every block up front, then analyse them in parallel.
fn run_batch(
    analyzer: &Analyzer,
    source: &mut dyn SampleSource,
    sample_rate: f64,
    limit: Option<usize>,
    show_progress: bool,
    writer: &mut FrameWriter,
) -> Result<()> {
    let blocks = collect_blocks(source, analyzer.config().samples(), limit);
    if blocks.is_empty() {
        log::warn!("Not enough samples for a single block");
        return Ok(());
    }
    log::info!("Analysing {} block(s)...", blocks.len());

    let frames = analyze_blocks(analyzer, blocks, sample_rate)?;

    let pb = if show_progress {
        let pb = ProgressBar::new(frames.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    for frame in &frames {
        writer.write_frame(frame)?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(())
}
