use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::pan::Channel;
use crate::pan::params::{ParamValues, Parameter};

/// The fixed port slots of the processor.
///
/// The numeric values are part of the plugin's external contract: hosts and
/// descriptors refer to ports by index, so they must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Port {
    InLeft = 0,
    InRight = 1,
    OutLeft = 2,
    OutRight = 3,
    Amp = 4,
    Width = 5,
    Balance = 6,
}

/// What kind of data a [`Port`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    AudioInput(Channel),
    AudioOutput(Channel),
    Control(Parameter),
}

impl Port {
    pub const ALL: [Self; 7] = [
        Self::InLeft,
        Self::InRight,
        Self::OutLeft,
        Self::OutRight,
        Self::Amp,
        Self::Width,
        Self::Balance,
    ];

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::InLeft),
            1 => Some(Self::InRight),
            2 => Some(Self::OutLeft),
            3 => Some(Self::OutRight),
            4 => Some(Self::Amp),
            5 => Some(Self::Width),
            6 => Some(Self::Balance),
            _ => None,
        }
    }

    pub const fn kind(self) -> PortKind {
        match self {
            Self::InLeft => PortKind::AudioInput(Channel::Left),
            Self::InRight => PortKind::AudioInput(Channel::Right),
            Self::OutLeft => PortKind::AudioOutput(Channel::Left),
            Self::OutRight => PortKind::AudioOutput(Channel::Right),
            Self::Amp => PortKind::Control(Parameter::Gain),
            Self::Width => PortKind::Control(Parameter::Width),
            Self::Balance => PortKind::Control(Parameter::Balance),
        }
    }

    pub const fn for_parameter(param: Parameter) -> Self {
        match param {
            Parameter::Gain => Self::Amp,
            Parameter::Width => Self::Width,
            Parameter::Balance => Self::Balance,
        }
    }

    /// Machine-readable symbol, as a host manifest would declare it.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::InLeft => "in_l",
            Self::InRight => "in_r",
            Self::OutLeft => "out_l",
            Self::OutRight => "out_r",
            Self::Amp => "amp",
            Self::Width => "width",
            Self::Balance => "balance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InLeft => "Input Left",
            Self::InRight => "Input Right",
            Self::OutLeft => "Output Left",
            Self::OutRight => "Output Right",
            Self::Amp => "Amplitude",
            Self::Width => "Width",
            Self::Balance => "Balance",
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>2}  {:<8} {}", self.index(), self.symbol(), self.label())?;
        if let PortKind::Control(param) = self.kind() {
            let (min, max) = param.range();
            write!(
                f,
                " [{min:.1}, {max:.1}] default {:.1}",
                param.default_value()
            )?;
        }
        Ok(())
    }
}

/// Shared handle to a control value.
///
/// The owner (host, UI thread, stdin reader) writes targets with [`set`](Self::set);
/// the processor reads them once per block with [`get`](Self::get). Cloning shares
/// the same underlying value.
#[derive(Debug, Clone)]
pub struct ControlPort(Arc<AtomicU32>);

impl ControlPort {
    pub fn new(value: f32) -> Self {
        Self(Arc::new(AtomicU32::new(value.to_bits())))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// One [`ControlPort`] per parameter, owned by whoever drives the processor.
#[derive(Debug, Clone)]
pub struct ControlSet {
    gain: ControlPort,
    width: ControlPort,
    balance: ControlPort,
}

impl ControlSet {
    pub fn new(values: ParamValues) -> Self {
        Self {
            gain: ControlPort::new(values.gain),
            width: ControlPort::new(values.width),
            balance: ControlPort::new(values.balance),
        }
    }

    pub const fn port(&self, param: Parameter) -> &ControlPort {
        match param {
            Parameter::Gain => &self.gain,
            Parameter::Width => &self.width,
            Parameter::Balance => &self.balance,
        }
    }

    pub fn set(&self, param: Parameter, value: f32) {
        self.port(param).set(value);
    }

    pub fn set_all(&self, values: ParamValues) {
        for param in Parameter::ALL {
            self.set(param, values.get(param));
        }
    }

    pub fn values(&self) -> ParamValues {
        ParamValues::new(self.gain.get(), self.width.get(), self.balance.get())
    }
}

/// Audio buffers bound for a single `process` call.
///
/// Slots that are never connected stay `None`, in which case the processor
/// leaves every output untouched.
#[derive(Debug, Default)]
pub struct AudioPorts<'a> {
    inputs: [Option<&'a [f32]>; 2],
    outputs: [Option<&'a mut [f32]>; 2],
}

/// Fully bound stereo I/O, borrowed out of [`AudioPorts`].
pub struct StereoIo<'s> {
    pub in_left: &'s [f32],
    pub in_right: &'s [f32],
    pub out_left: &'s mut [f32],
    pub out_right: &'s mut [f32],
}

impl<'a> AudioPorts<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every audio slot at once.
    pub fn stereo(
        in_left: &'a [f32],
        in_right: &'a [f32],
        out_left: &'a mut [f32],
        out_right: &'a mut [f32],
    ) -> Self {
        Self {
            inputs: [Some(in_left), Some(in_right)],
            outputs: [Some(out_left), Some(out_right)],
        }
    }

    /// Bind an input buffer by slot index. Non-input slots are ignored.
    pub fn connect_input(&mut self, index: u32, data: &'a [f32]) {
        if let Some(PortKind::AudioInput(channel)) = Port::from_index(index).map(Port::kind) {
            self.inputs[channel.index()] = Some(data);
        }
    }

    /// Bind an output buffer by slot index. Non-output slots are ignored.
    pub fn connect_output(&mut self, index: u32, data: &'a mut [f32]) {
        if let Some(PortKind::AudioOutput(channel)) = Port::from_index(index).map(Port::kind) {
            self.outputs[channel.index()] = Some(data);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.inputs.iter().all(Option::is_some) && self.outputs.iter().all(Option::is_some)
    }

    /// Borrow all four buffers, or `None` if any slot is unbound.
    pub fn io(&mut self) -> Option<StereoIo<'_>> {
        let [Some(in_left), Some(in_right)] = self.inputs else {
            return None;
        };
        let [Some(out_left), Some(out_right)] = &mut self.outputs else {
            return None;
        };

        Some(StereoIo {
            in_left,
            in_right,
            out_left: &mut **out_left,
            out_right: &mut **out_right,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_stable() {
        for (expected, port) in Port::ALL.iter().enumerate() {
            assert_eq!(port.index(), expected as u32);
            assert_eq!(Port::from_index(expected as u32), Some(*port));
        }
        assert_eq!(Port::from_index(7), None);
        assert_eq!(Port::from_index(u32::MAX), None);
    }

    #[test]
    fn control_ports_map_to_parameters() {
        for param in Parameter::ALL {
            assert_eq!(
                Port::for_parameter(param).kind(),
                PortKind::Control(param)
            );
        }
    }

    #[test]
    fn control_port_clones_share_value() {
        let port = ControlPort::new(0.5);
        let host_side = port.clone();
        host_side.set(-0.75);
        assert_eq!(port.get(), -0.75);
    }

    #[test]
    fn control_set_reads_back_values() {
        let set = ControlSet::new(ParamValues::new(0.5, 0.0, -0.5));
        assert_eq!(set.values(), ParamValues::new(0.5, 0.0, -0.5));

        set.set_all(ParamValues::default());
        assert_eq!(set.port(Parameter::Gain).get(), 1.0);
        assert_eq!(set.values(), ParamValues::default());
    }

    #[test]
    fn audio_ports_ignore_wrong_slots() {
        let input = [0.0f32; 4];
        let mut output = [0.0f32; 4];
        let mut ports = AudioPorts::new();

        ports.connect_input(Port::OutLeft.index(), &input);
        ports.connect_input(42, &input);
        ports.connect_output(Port::Amp.index(), &mut output);
        assert!(!ports.is_complete());
        assert!(ports.io().is_none());
    }

    #[test]
    fn audio_ports_complete_when_all_bound() {
        let l = [0.1f32; 2];
        let r = [0.2f32; 2];
        let mut ol = [0.0f32; 2];
        let mut or = [0.0f32; 2];
        let mut ports = AudioPorts::new();
        ports.connect_input(0, &l);
        ports.connect_input(1, &r);
        ports.connect_output(2, &mut ol);
        assert!(ports.io().is_none());
        ports.connect_output(3, &mut or);
        assert!(ports.is_complete());

        let io = ports.io().unwrap();
        assert_eq!(io.in_right, &[0.2, 0.2]);
        assert_eq!(io.out_left.len(), 2);
    }
}
