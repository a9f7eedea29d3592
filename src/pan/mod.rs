pub mod params;
pub mod processor;
pub mod smoother;
pub mod transform;

pub use params::{ParamValues, Parameter};
pub use processor::{ProcessStatus, State, StereoPan};
pub use transform::{PanControls, transform};

/// Stereo channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Left = 0,
    Right = 1,
}

impl Channel {
    pub const COUNT: usize = 2;

    pub const fn index(self) -> usize {
        self as usize
    }
}
