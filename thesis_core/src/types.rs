// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Upper-case `RRGGBB`, the form WordprocessingML expects in `w:color`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A length in inches. Margins are specified this way in the input data and
/// must be positive there.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(try_from = "f64", into = "f64")]
pub struct Inches(pub f64);

impl TryFrom<f64> for Inches {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(format!("Length must be a positive number of inches, got {value}"))
        }
    }
}

impl From<Inches> for f64 {
    fn from(inches: Inches) -> Self {
        inches.0
    }
}

impl Inches {
    /// Negative lengths cannot be laid out; they become zero.
    pub fn non_negative(self) -> Self {
        Self(self.0.max(0.0))
    }

    /// Twentieths of a point (1440 per inch).
    pub fn to_twips(self) -> u32 {
        (self.0 * 1440.0).round().max(0.0) as u32
    }
}

/// A typographic length in points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Points(pub f64);

impl Points {
    pub fn to_twips(self) -> u32 {
        (self.0 * 20.0).round().max(0.0) as u32
    }

    /// Font sizes are stored in half-points in WordprocessingML.
    pub fn to_half_points(self) -> u32 {
        (self.0 * 2.0).round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(Rgb::BLACK.to_hex(), "000000");
        assert_eq!(Rgb::new(0, 86, 179).to_hex(), "0056B3");
    }

    #[test]
    fn test_inches_must_be_positive() {
        assert_eq!(Inches::try_from(1.25), Ok(Inches(1.25)));
        assert!(Inches::try_from(0.0).is_err());
        assert!(Inches::try_from(-1.0).is_err());
        assert!(Inches::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_inches_deserialize_rejects_negative() {
        assert_eq!(
            serde_json::from_str::<Inches>("1.5").unwrap(),
            Inches(1.5)
        );
        assert!(serde_json::from_str::<Inches>("-0.5").is_err());
        assert_eq!(serde_json::to_string(&Inches(2.0)).unwrap(), "2.0");
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(Inches(-2.0).non_negative(), Inches(0.0));
        assert_eq!(Inches(0.75).non_negative(), Inches(0.75));
    }

    #[test]
    fn test_length_conversions() {
        assert_eq!(Inches(1.0).to_twips(), 1440);
        assert_eq!(Inches(1.5).to_twips(), 2160);
        assert_eq!(Inches(-2.0).to_twips(), 0);
        assert_eq!(Points(12.0).to_half_points(), 24);
        assert_eq!(Points(10.5).to_half_points(), 21);
        assert_eq!(Points(24.0).to_twips(), 480);
    }
}
