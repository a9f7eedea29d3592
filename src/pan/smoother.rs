use crate::pan::params::Parameter;

/// Linear per-block ramp for one control.
///
/// At the start of each block the stored value is clamped to the parameter's
/// range and a per-sample increment towards the (unclamped) target is computed.
/// The last sample of the block lands exactly on the target, so accumulated
/// rounding never carries into the next block.
#[derive(Debug, Clone)]
pub struct BlockSmoother {
    param: Parameter,
    current: f32,
    target: f32,
    increment: f32,
    remaining: usize,
}

impl BlockSmoother {
    pub const fn new(param: Parameter) -> Self {
        let value = param.default_value();
        Self {
            param,
            current: value,
            target: value,
            increment: 0.0,
            remaining: 0,
        }
    }

    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Jump straight to `value` with no ramp. Used on activation.
    pub const fn reset(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.remaining = 0;
    }

    /// Prepare a ramp from the clamped current value to `target` over `block_len` samples.
    pub fn begin_block(&mut self, target: f32, block_len: usize) {
        self.current = self.param.clamp(self.current);
        self.target = target;
        self.remaining = block_len;
        self.increment = if block_len == 0 {
            0.0
        } else {
            // Divide in double precision, then narrow.
            (f64::from(target - self.current) * (1.0 / block_len as f64)) as f32
        };
    }

    /// Advance by one sample and return the value to use for it.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        match self.remaining {
            0 => {}
            1 => {
                self.current = self.target;
                self.remaining = 0;
            }
            _ => {
                self.current += self.increment;
                self.remaining -= 1;
            }
        }
        self.current
    }

    pub const fn is_ramping(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_linearly_and_snaps_to_target() {
        let mut s = BlockSmoother::new(Parameter::Gain);
        s.reset(0.0);
        s.begin_block(1.0, 4);

        let values: Vec<f32> = (0..4).map(|_| s.next_value()).collect();
        assert_eq!(values, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(s.current(), 1.0);
        assert!(!s.is_ramping());
    }

    #[test]
    fn single_sample_block_snaps_immediately() {
        let mut s = BlockSmoother::new(Parameter::Width);
        s.reset(-1.0);
        s.begin_block(0.3, 1);
        assert_eq!(s.next_value(), 0.3);
    }

    #[test]
    fn last_sample_is_exact_despite_rounding() {
        let mut s = BlockSmoother::new(Parameter::Balance);
        s.reset(0.0);
        s.begin_block(0.1, 7);
        let mut last = 0.0;
        for _ in 0..7 {
            last = s.next_value();
        }
        assert_eq!(last, 0.1);
    }

    #[test]
    fn out_of_range_current_is_clamped_before_increment() {
        let mut s = BlockSmoother::new(Parameter::Gain);
        s.reset(5.0);
        s.begin_block(2.0, 4);
        assert_eq!(s.current(), 2.0);
        // Clamped baseline equals the target, so there is nothing to ramp.
        assert_eq!(s.next_value(), 2.0);
    }

    #[test]
    fn target_is_not_clamped() {
        let mut s = BlockSmoother::new(Parameter::Gain);
        s.reset(1.0);
        s.begin_block(3.0, 2);
        assert_eq!(s.next_value(), 2.0);
        assert_eq!(s.next_value(), 3.0);
    }

    #[test]
    fn idle_smoother_holds_value() {
        let mut s = BlockSmoother::new(Parameter::Gain);
        assert_eq!(s.next_value(), 1.0);
        s.begin_block(0.5, 0);
        assert_eq!(s.next_value(), 1.0);
    }
}
