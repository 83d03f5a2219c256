//! Body mass index calculator shown on the landing page.

use std::fmt;

/// BMI category bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Normal => write!(f, "Normal"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}

/// A computed BMI, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub value: f64,
}

impl BmiReading {
    /// Compute from height in centimetres and weight in kilograms.
    ///
    /// Returns `None` unless both are positive.
    #[must_use]
    pub fn compute(height_cm: f64, weight_kg: f64) -> Option<Self> {
        if !(height_cm > 0.0 && weight_kg > 0.0) {
            return None;
        }
        let meters = height_cm / 100.0;
        let raw = weight_kg / (meters * meters);
        Some(Self {
            value: (raw * 10.0).round() / 10.0,
        })
    }

    #[must_use]
    pub fn category(&self) -> BmiCategory {
        if self.value < 18.5 {
            BmiCategory::Underweight
        } else if self.value < 25.0 {
            BmiCategory::Normal
        } else if self.value < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}
