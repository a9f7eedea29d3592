use serde::{Deserialize, Serialize};

/// One of the three automatable controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Gain,
    Width,
    Balance,
}

impl Parameter {
    pub const ALL: [Self; 3] = [Self::Gain, Self::Width, Self::Balance];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::Width => "width",
            Self::Balance => "balance",
        }
    }

    /// Inclusive `(min, max)` range the smoothed value is held to.
    pub const fn range(self) -> (f32, f32) {
        match self {
            Self::Gain => (0.0, 2.0),
            Self::Width | Self::Balance => (-1.0, 1.0),
        }
    }

    pub const fn default_value(self) -> f32 {
        match self {
            Self::Gain | Self::Width => 1.0,
            Self::Balance => 0.0,
        }
    }

    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    pub fn from_name(name: &str) -> Result<Self, &'static str> {
        match name {
            "gain" | "amp" => Ok(Self::Gain),
            "width" => Ok(Self::Width),
            "balance" => Ok(Self::Balance),
            _ => Err("Unknown parameter"),
        }
    }
}

/// Parse a `name value` or `name=value` assignment, e.g. `width -0.5`.
pub fn parse_assignment(input: &str) -> Result<(Parameter, f32), &'static str> {
    let mut parts = input
        .split(|c: char| c == '=' || c.is_whitespace())
        .filter(|s| !s.is_empty());

    let param = Parameter::from_name(parts.next().ok_or("Missing parameter name")?)?;
    let value = parts
        .next()
        .ok_or("Missing parameter value")?
        .parse::<f32>()
        .map_err(|_| "Parameter value must be a number")?;

    if parts.next().is_some() {
        return Err("Unexpected trailing input");
    }

    Ok((param, value))
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value for each control, as read from settings or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamValues {
    pub gain: f32,
    pub width: f32,
    pub balance: f32,
}

impl ParamValues {
    pub const fn new(gain: f32, width: f32, balance: f32) -> Self {
        Self {
            gain,
            width,
            balance,
        }
    }

    pub const fn get(&self, param: Parameter) -> f32 {
        match param {
            Parameter::Gain => self.gain,
            Parameter::Width => self.width,
            Parameter::Balance => self.balance,
        }
    }

    pub const fn set(&mut self, param: Parameter, value: f32) {
        match param {
            Parameter::Gain => self.gain = value,
            Parameter::Width => self.width = value,
            Parameter::Balance => self.balance = value,
        }
    }
}

impl Default for ParamValues {
    fn default() -> Self {
        Self::new(
            Parameter::Gain.default_value(),
            Parameter::Width.default_value(),
            Parameter::Balance.default_value(),
        )
    }
}

impl std::fmt::Display for ParamValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "gain={:.3} width={:.3} balance={:.3}",
            self.gain, self.width, self.balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_holds_values_to_range() {
        assert_eq!(Parameter::Gain.clamp(5.0), 2.0);
        assert_eq!(Parameter::Gain.clamp(-0.5), 0.0);
        assert_eq!(Parameter::Width.clamp(-3.0), -1.0);
        assert_eq!(Parameter::Balance.clamp(0.25), 0.25);
    }

    #[test]
    fn names_round_trip() {
        for param in Parameter::ALL {
            assert_eq!(Parameter::from_name(param.name()), Ok(param));
        }
        assert_eq!(Parameter::from_name("amp"), Ok(Parameter::Gain));
        assert!(Parameter::from_name("pan").is_err());
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(parse_assignment("width -0.5"), Ok((Parameter::Width, -0.5)));
        assert_eq!(parse_assignment("  gain=1.5 "), Ok((Parameter::Gain, 1.5)));
        assert_eq!(parse_assignment("balance = 1"), Ok((Parameter::Balance, 1.0)));
        assert!(parse_assignment("").is_err());
        assert!(parse_assignment("width").is_err());
        assert!(parse_assignment("width loud").is_err());
        assert!(parse_assignment("pan 0.5").is_err());
        assert!(parse_assignment("gain 1 2").is_err());
    }

    #[test]
    fn defaults_are_unity_stereo() {
        let values = ParamValues::default();
        assert_eq!(values, ParamValues::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn set_and_get_by_parameter() {
        let mut values = ParamValues::default();
        values.set(Parameter::Width, -0.5);
        assert_eq!(values.get(Parameter::Width), -0.5);
        assert_eq!(values.get(Parameter::Gain), 1.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let values: ParamValues = serde_json::from_str(r#"{"width": 0.0}"#).unwrap();
        assert_eq!(values, ParamValues::new(1.0, 0.0, 0.0));
    }
}
