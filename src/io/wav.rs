use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use std::path::Path;

/// De-interleaved stereo audio held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoClip {
    pub sample_rate: u32,
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl StereoClip {
    pub fn silent(sample_rate: u32, frames: usize) -> Self {
        Self {
            sample_rate,
            left: vec![0.0; frames],
            right: vec![0.0; frames],
        }
    }

    pub fn frames(&self) -> usize {
        self.left.len()
    }
}

/// Read a mono or stereo WAV file. Mono input is copied to both channels.
pub fn read_stereo(path: &Path) -> Result<StereoClip> {
    let reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.channels > 2 {
        bail!(
            "Unsupported channel count {} in {} (expected 1 or 2)",
            spec.channels,
            path.display()
        );
    }

    let samples: Vec<f32> = if spec.sample_format == SampleFormat::Float {
        reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read float samples")?
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 / max_val))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read integer samples")?
    };

    let (left, right) = if spec.channels == 1 {
        (samples.clone(), samples)
    } else {
        samples.chunks_exact(2).map(|frame| (frame[0], frame[1])).unzip()
    };

    debug!(
        "Read {} frames at {} Hz from {}",
        left.len(),
        spec.sample_rate,
        path.display()
    );

    Ok(StereoClip {
        sample_rate: spec.sample_rate,
        left,
        right,
    })
}

/// Write a 32-bit float stereo WAV file.
pub fn write_stereo(path: &Path, clip: &StereoClip) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate: clip.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file {}", path.display()))?;

    for (&l, &r) in clip.left.iter().zip(&clip.right) {
        writer.write_sample(l).context("Failed to write sample")?;
        writer.write_sample(r).context("Failed to write sample")?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;
    debug!("Wrote {} frames to {}", clip.frames(), path.display());
    Ok(())
}
