use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::audio::features::BarFrame;
use crate::render::lcd::{show_spectrum, RenderStyle, TextLcd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two LCD rows per frame
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes analysed frames to stdout or a file.
pub struct FrameWriter {
    out: Box<dyn Write>,
    format: OutputFormat,
    style: RenderStyle,
    lcd: TextLcd,
    redraw: bool,
    written: usize,
}

impl FrameWriter {
    pub fn new(output: Option<&Path>, format: OutputFormat, style: RenderStyle, columns: usize) -> Result<Self> {
        let out: Box<dyn Write> = match output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(std::io::stdout().lock()),
        };
        Ok(Self::from_writer(out, format, style, columns))
    }

    pub fn from_writer(out: Box<dyn Write>, format: OutputFormat, style: RenderStyle, columns: usize) -> Self {
        Self {
            out,
            format,
            style,
            lcd: TextLcd::new(columns),
            redraw: false,
            written: 0,
        }
    }

    /// Redraw text frames in place instead of appending them.
    pub fn set_redraw(&mut self, redraw: bool) {
        self.redraw = redraw;
    }

    pub fn write_frame(&mut self, frame: &BarFrame) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                show_spectrum(&mut self.lcd, &frame.bars);
                if self.redraw {
                    write!(self.out, "{}", CLEAR_SCREEN)?;
                }
                writeln!(self.out, "frame {} @ {:.3}s", frame.frame, frame.time)?;
                write!(self.out, "{}", self.lcd.render(self.style))?;
                if !self.redraw {
                    writeln!(self.out)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, frame).context("Failed to serialize frame")?;
                writeln!(self.out)?;
            }
        }
        if self.redraw {
            self.out.flush()?;
        }
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.out.flush().context("Failed to flush output")?;
        log::info!("Wrote {} frame(s)", self.written);
        Ok(self.written)
    }
}
