use rayon::prelude::*;

use super::acquire::{remove_dc_offset, SampleSource};
use super::features::BarFrame;
use crate::spectrum::{Analyzer, Bar, ContractViolation};

/// Reads up to `limit` whole blocks from `source`.
pub fn collect_blocks(source: &mut dyn SampleSource, block_size: usize, limit: Option<usize>) -> Vec<Vec<f64>> {
    let mut blocks = Vec::new();
    loop {
        if limit.is_some_and(|max| blocks.len() >= max) {
            break;
        }
        let mut block = vec![0.0; block_size];
        if !source.next_block(&mut block) {
            break;
        }
        blocks.push(block);
    }
    blocks
}

/// Removes the DC offset from `block` and runs it through `analyzer`.
///
/// `block` is consumed as the transform's real buffer.
pub fn analyze_block(
    analyzer: &Analyzer,
    frame: usize,
    mut block: Vec<f64>,
    sample_rate: f64,
) -> Result<BarFrame, ContractViolation> {
    let config = analyzer.config();
    let mut imag = vec![0.0; block.len()];
    let mut bins = vec![0.0; config.bins()];
    let mut bars = vec![Bar::default(); config.bins()];

    remove_dc_offset(&mut block);
    analyzer.process(&mut block, &mut imag, &mut bins, &mut bars)?;

    let frame = BarFrame {
        frame,
        time: (frame * config.samples()) as f64 / sample_rate,
        bins,
        bars,
    };
    log::debug!("frame {}: peak bin {:?}, bars {:?}", frame.frame, frame.peak_bin(), frame.bars);
    Ok(frame)
}

/// Analyses independent blocks in parallel, keeping their order.
pub fn analyze_blocks(
    analyzer: &Analyzer,
    blocks: Vec<Vec<f64>>,
    sample_rate: f64,
) -> Result<Vec<BarFrame>, ContractViolation> {
    blocks
        .into_par_iter()
        .enumerate()
        .map(|(i, block)| analyze_block(analyzer, i, block, sample_rate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::acquire::{Adc, ToneSource};
    use crate::spectrum::SpectrumConfig;

    fn analyzer() -> Analyzer {
        Analyzer::new(SpectrumConfig::new(128, 16).unwrap())
    }

    #[test]
    fn collects_up_to_the_limit() {
        let mut tone = ToneSource::new(100.0, 1800.0, Adc::new(10, 1.0).unwrap());
        let blocks = collect_blocks(&mut tone, 128, Some(3));
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.len() == 128));
    }

    #[test]
    fn silence_maps_to_empty_bars() {
        let block = vec![512.0; 128];
        let frame = analyze_block(&analyzer(), 0, block, 1800.0).unwrap();
        assert!(frame.bins.iter().all(|&v| v == 0.0));
        assert!(frame.bars.iter().all(|b| *b == Bar { lower: 0, upper: 0 }));
    }

    #[test]
    fn tone_frames_peak_at_the_tone() {
        // FFT index 34 at 1800Hz/128 sits inside bin 8 (indices 32..36)
        let mut tone = ToneSource::new(478.125, 1800.0, Adc::new(10, 0.1).unwrap());
        let blocks = collect_blocks(&mut tone, 128, Some(4));
        let frames = analyze_blocks(&analyzer(), blocks, 1800.0).unwrap();

        assert_eq!(frames.len(), 4);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.frame, i);
            assert!((frame.time - i as f64 * 128.0 / 1800.0).abs() < 1e-12);
            assert_eq!(frame.peak_bin(), Some(8));
        }
    }

    #[test]
    fn wrong_block_size_is_a_contract_violation() {
        let err = analyze_block(&analyzer(), 0, vec![0.0; 64], 1800.0).unwrap_err();
        assert!(matches!(err, ContractViolation::LengthMismatch { buffer: "real", .. }));
    }
}
