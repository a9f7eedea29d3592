use log::{debug, info};

use crate::io::ports::{AudioPorts, ControlSet};
use crate::io::wav::StereoClip;
use crate::pan::{ProcessStatus, StereoPan};
use crate::settings::Settings;

/// Drives a [`StereoPan`] over whole clips, one block at a time.
pub struct Renderer {
    pan: StereoPan,
    controls: ControlSet,
    block_size: usize,
}

impl Renderer {
    /// Activate at `settings.initial`, then point the controls at `settings.target`
    /// so the first rendered block ramps between the two.
    pub fn new(settings: &Settings) -> Self {
        let controls = ControlSet::new(settings.initial);
        let mut pan = StereoPan::new();
        pan.connect_controls(&controls);
        pan.activate();
        controls.set_all(settings.target);

        let block_size = settings.block_size.max(1);
        debug!(
            "Renderer ready: block_size={block_size}, initial {}, target {}",
            settings.initial, settings.target
        );

        Self {
            pan,
            controls,
            block_size,
        }
    }

    /// Handle for changing targets between calls to [`render`](Self::render).
    pub const fn controls(&self) -> &ControlSet {
        &self.controls
    }

    pub const fn processor(&self) -> &StereoPan {
        &self.pan
    }

    pub fn render(&mut self, input: &StereoClip) -> StereoClip {
        let frames = input.frames().min(input.right.len());
        let mut output = StereoClip::silent(input.sample_rate, frames);

        let blocks = input.left[..frames]
            .chunks(self.block_size)
            .zip(input.right[..frames].chunks(self.block_size))
            .zip(
                output
                    .left
                    .chunks_mut(self.block_size)
                    .zip(output.right.chunks_mut(self.block_size)),
            );

        let mut processed = 0;
        for ((in_l, in_r), (out_l, out_r)) in blocks {
            let n = in_l.len();
            let mut ports = AudioPorts::stereo(in_l, in_r, out_l, out_r);
            if let ProcessStatus::Processed(done) = self.pan.process(&mut ports, n) {
                processed += done;
            }
        }

        info!(
            "Rendered {processed} frames in blocks of {} ({})",
            self.block_size,
            self.controls.values()
        );
        output
    }
}
