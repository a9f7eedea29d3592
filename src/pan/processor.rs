use log::debug;

use crate::io::ports::{AudioPorts, ControlPort, ControlSet, Port, PortKind};
use crate::pan::params::Parameter;
use crate::pan::smoother::BlockSmoother;
use crate::pan::transform::{PanControls, transform};

/// Lifecycle state of a [`StereoPan`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Created but never activated; smoothed values hold their defaults.
    Uninitialized,
    /// Activated at least once; blocks may be processed repeatedly.
    Active,
}

/// Outcome of one `process` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// This many samples were written to both outputs.
    Processed(usize),
    /// A port was unbound, nothing was written.
    Skipped,
}

/// Stereo width/balance processor with per-block parameter smoothing.
pub struct StereoPan {
    controls: [Option<ControlPort>; 3],
    gain: BlockSmoother,
    width: BlockSmoother,
    balance: BlockSmoother,
    state: State,
}

impl StereoPan {
    pub const URI: &'static str = "https://github.com/eventual-recluse/stereopan.lv2";

    pub fn new() -> Self {
        Self {
            controls: [None, None, None],
            gain: BlockSmoother::new(Parameter::Gain),
            width: BlockSmoother::new(Parameter::Width),
            balance: BlockSmoother::new(Parameter::Balance),
            state: State::Uninitialized,
        }
    }

    /// Bind a control handle to a slot index. Unknown or audio slots are ignored.
    pub fn connect_control(&mut self, index: u32, port: ControlPort) {
        if let Some(PortKind::Control(param)) = Port::from_index(index).map(Port::kind) {
            debug!("Connected control port {index} ({param})");
            self.controls[Self::slot(param)] = Some(port);
        }
    }

    /// Bind all three controls from a [`ControlSet`].
    pub fn connect_controls(&mut self, controls: &ControlSet) {
        for param in Parameter::ALL {
            self.connect_control(Port::for_parameter(param).index(), controls.port(param).clone());
        }
    }

    pub fn disconnect_control(&mut self, param: Parameter) {
        self.controls[Self::slot(param)] = None;
    }

    /// Copy the bound targets into the smoothing baseline.
    ///
    /// Controls that are not bound yet keep their previous baseline.
    pub fn activate(&mut self) {
        for param in Parameter::ALL {
            if let Some(target) = self.target(param) {
                self.smoother_mut(param).reset(target);
            }
        }
        self.state = State::Active;
        debug!(
            "Activated: gain={} width={} balance={}",
            self.gain.current(),
            self.width.current(),
            self.balance.current()
        );
    }

    /// Nothing to release; smoothing state survives until the next activation.
    pub fn deactivate(&mut self) {
        debug!("Deactivated");
    }

    pub const fn state(&self) -> State {
        self.state
    }

    /// Smoothed value as of the last processed sample.
    pub const fn current(&self, param: Parameter) -> f32 {
        match param {
            Parameter::Gain => self.gain.current(),
            Parameter::Width => self.width.current(),
            Parameter::Balance => self.balance.current(),
        }
    }

    /// Overwrite a smoothed value without a ramp. The value is not clamped here;
    /// it is clamped at the start of the next block.
    pub fn set_current(&mut self, param: Parameter, value: f32) {
        self.smoother_mut(param).reset(value);
    }

    /// Process `sample_count` samples from the bound inputs into the bound outputs.
    ///
    /// If any audio or control port is unbound this returns [`ProcessStatus::Skipped`]
    /// without touching the outputs or the smoothing state. The block never runs past
    /// the shortest bound buffer. Does not allocate, block or log.
    pub fn process(&mut self, audio: &mut AudioPorts<'_>, sample_count: usize) -> ProcessStatus {
        let (Some(gain), Some(width), Some(balance)) = (
            self.target(Parameter::Gain),
            self.target(Parameter::Width),
            self.target(Parameter::Balance),
        ) else {
            return ProcessStatus::Skipped;
        };
        let Some(io) = audio.io() else {
            return ProcessStatus::Skipped;
        };

        let n = sample_count
            .min(io.in_left.len())
            .min(io.in_right.len())
            .min(io.out_left.len())
            .min(io.out_right.len());
        if n == 0 {
            return ProcessStatus::Processed(0);
        }

        self.gain.begin_block(gain, n);
        self.width.begin_block(width, n);
        self.balance.begin_block(balance, n);

        let inputs = io.in_left[..n].iter().zip(&io.in_right[..n]);
        let outputs = io.out_left[..n].iter_mut().zip(&mut io.out_right[..n]);
        for ((&l, &r), (out_l, out_r)) in inputs.zip(outputs) {
            let controls = PanControls {
                amp: self.gain.next_value(),
                width: self.width.next_value(),
                balance: self.balance.next_value(),
            };
            (*out_l, *out_r) = transform(l, r, controls);
        }

        ProcessStatus::Processed(n)
    }

    fn target(&self, param: Parameter) -> Option<f32> {
        self.controls[Self::slot(param)].as_ref().map(ControlPort::get)
    }

    const fn slot(param: Parameter) -> usize {
        match param {
            Parameter::Gain => 0,
            Parameter::Width => 1,
            Parameter::Balance => 2,
        }
    }

    const fn smoother_mut(&mut self, param: Parameter) -> &mut BlockSmoother {
        match param {
            Parameter::Gain => &mut self.gain,
            Parameter::Width => &mut self.width,
            Parameter::Balance => &mut self.balance,
        }
    }
}

impl Default for StereoPan {
    fn default() -> Self {
        Self::new()
    }
}
