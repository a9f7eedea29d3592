/// Smoothed control values in effect for a single sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanControls {
    pub amp: f32,
    pub width: f32,
    pub balance: f32,
}

/// Mid/side width and balance transform of one stereo sample pair.
///
/// `width` scales the side signal back into each channel. The result is
/// normalised by `1 + |width|`, so width 1 passes stereo through, width -1
/// swaps the channels and width 0 collapses to `(L + R) * amp` on both sides.
/// Balance then attenuates the opposite channel and never boosts.
#[inline]
pub fn transform(left: f32, right: f32, controls: PanControls) -> (f32, f32) {
    let PanControls {
        amp,
        width,
        balance,
    } = controls;

    let mid = (left + right) / 2.0;
    let side = (left - right) / 2.0;

    // Negative width reverses the channels, keep the divisor positive.
    let sign = if width < 0.0 { -1.0 } else { 1.0 };
    let denom = 1.0 + width * sign;

    let mut out_left = (mid + width * side) * 2.0 / denom * amp;
    let mut out_right = (mid - width * side) * 2.0 / denom * amp;

    if balance < 0.0 {
        out_right *= 1.0 + balance;
    } else {
        out_left *= 1.0 - balance;
    }

    (out_left, out_right)
}
