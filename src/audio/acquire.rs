use anyhow::Result;
use std::f64::consts::PI;

use super::decode::AudioData;

/// Something that hands out fixed-size blocks of raw amplitudes taken on a
/// fixed sampling interval.
pub trait SampleSource {
    /// Samples per second of the blocks this source produces.
    fn sample_rate(&self) -> f64;

    /// Fills `out` with the next block. Returns false once there are not
    /// enough samples left for a whole block.
    fn next_block(&mut self, out: &mut [f64]) -> bool;
}

/// Converts normalized audio into integer converter codes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adc {
    max_code: f64,
    gain: f64,
}

impl Adc {
    pub fn new(bits: u32, gain: f64) -> Result<Self> {
        if bits == 0 || bits > 24 {
            anyhow::bail!("ADC resolution must be 1-24 bits, got {}", bits);
        }
        if !gain.is_finite() || gain < 0.0 {
            anyhow::bail!("ADC gain must be a finite non-negative number, got {}", gain);
        }
        Ok(Self {
            max_code: ((1u32 << bits) - 1) as f64,
            gain,
        })
    }

    #[allow(dead_code)]
    pub fn max_code(&self) -> f64 {
        self.max_code
    }

    /// Silence reads as midscale; +/-1.0 reaches the rails.
    pub fn code(&self, sample: f64) -> f64 {
        let mid = (self.max_code + 1.0) / 2.0;
        (mid + sample * self.gain * mid).round().clamp(0.0, self.max_code)
    }
}

/// Subtracts the block mean from every sample.
pub fn remove_dc_offset(samples: &mut [f64]) {
    if samples.is_empty() {
        return;
    }
    let average = samples.iter().sum::<f64>() / samples.len() as f64;
    for s in samples.iter_mut() {
        *s -= average;
    }
}

/// Decoded audio read through the converter at a lower sampling frequency.
///
/// The source is decimated by keeping every `stride`-th sample, where the
/// stride is the source rate over the requested rate, rounded, at least 1.
pub struct DecodedSource {
    samples: Vec<f32>,
    stride: usize,
    pos: usize,
    rate: f64,
    adc: Adc,
}

impl DecodedSource {
    pub fn new(audio: AudioData, sampling_frequency: f64, adc: Adc) -> Self {
        let source_rate = audio.sample_rate as f64;
        let stride = (source_rate / sampling_frequency).round().max(1.0) as usize;
        let rate = source_rate / stride as f64;
        if (rate - sampling_frequency).abs() > 0.5 {
            log::warn!(
                "Requested {:.1}Hz from {}Hz audio; sampling at {:.1}Hz instead",
                sampling_frequency,
                audio.sample_rate,
                rate
            );
        }
        log::info!("Decimating by {} to {:.1}Hz", stride, rate);

        Self {
            samples: audio.samples,
            stride,
            pos: 0,
            rate,
            adc,
        }
    }

    #[allow(dead_code)]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl SampleSource for DecodedSource {
    fn sample_rate(&self) -> f64 {
        self.rate
    }

    fn next_block(&mut self, out: &mut [f64]) -> bool {
        if out.is_empty() {
            return true;
        }
        let last = self.pos + (out.len() - 1) * self.stride;
        if last >= self.samples.len() {
            return false;
        }
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.adc.code(self.samples[self.pos + i * self.stride] as f64);
        }
        self.pos += out.len() * self.stride;
        true
    }
}

/// A pure sine read through the converter.
pub struct ToneSource {
    frequency: f64,
    rate: f64,
    adc: Adc,
    n: u64,
}

impl ToneSource {
    pub fn new(frequency: f64, sampling_frequency: f64, adc: Adc) -> Self {
        if frequency > sampling_frequency / 2.0 {
            log::warn!(
                "Tone at {:.1}Hz is above Nyquist ({:.1}Hz) and will alias",
                frequency,
                sampling_frequency / 2.0
            );
        }
        Self {
            frequency,
            rate: sampling_frequency,
            adc,
            n: 0,
        }
    }
}

impl SampleSource for ToneSource {
    fn sample_rate(&self) -> f64 {
        self.rate
    }

    fn next_block(&mut self, out: &mut [f64]) -> bool {
        for slot in out.iter_mut() {
            let phase = 2.0 * PI * self.frequency * self.n as f64 / self.rate;
            *slot = self.adc.code(phase.sin());
            self.n += 1;
        }
        true
    }
}
