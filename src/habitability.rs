//! Habitability report for a designed planet
//!
//! Each factor is scored 0-100 (higher is better); the overall score is the
//! rounded mean of the five factors.

use serde::{Deserialize, Serialize};

use crate::surface::{AtmosphereKind, PlanetParameters};

/// Scores at or above this read as excellent
pub const EXCELLENT: u8 = 80;
/// Scores at or above this read as moderate
pub const MODERATE: u8 = 60;
/// Factors below this earn a recommendation
pub const RECOMMEND_BELOW: u8 = 70;

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Moderate,
    Challenging,
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        if score >= EXCELLENT {
            Rating::Excellent
        } else if score >= MODERATE {
            Rating::Moderate
        } else {
            Rating::Challenging
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Moderate => "moderate",
            Rating::Challenging => "challenging",
        }
    }

    /// Display color for a score band
    pub fn color(&self) -> &'static str {
        match self {
            Rating::Excellent => "#a6ff00",
            Rating::Moderate => "#ffd000",
            Rating::Challenging => "#ff4040",
        }
    }
}

/// Per-factor scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitabilityReport {
    pub temperature: u8,
    pub atmosphere: u8,
    pub gravity: u8,
    /// Protection from radiation (100 = fully shielded)
    pub radiation_protection: u8,
    pub water: u8,
}

/// Linear falloff from 100 at `ideal` to 0 at `ideal ± span`
fn falloff(value: f32, ideal: f32, span: f32) -> u8 {
    let score = 100.0 * (1.0 - (value - ideal).abs() / span);
    score.clamp(0.0, 100.0).round() as u8
}

impl HabitabilityReport {
    /// Analyze planet parameters plus surface gravity (in g)
    pub fn analyze(params: &PlanetParameters, gravity_g: f32) -> Self {
        let params = params.clamped();
        let gravity_g = if gravity_g.is_finite() { gravity_g.clamp(0.1, 5.0) } else { 1.0 };

        let (atmosphere, shielding) = match params.atmosphere {
            AtmosphereKind::None => (0, 10),
            AtmosphereKind::Thin => (45, 40),
            AtmosphereKind::EarthLike => (95, 85),
            AtmosphereKind::Thick => (40, 95),
        };

        Self {
            // Comfortable around 15°C, hostile 60 degrees either side
            temperature: falloff(params.temperature_celsius, 15.0, 60.0),
            atmosphere,
            gravity: falloff(gravity_g, 1.0, 2.0),
            // Bigger planets hold stronger magnetic fields
            radiation_protection: (shielding as f32 * params.size_multiplier.min(1.0).sqrt())
                .round() as u8,
            // Earth-like coverage scores best; too dry or a pure water world both suffer
            water: falloff(params.water_percent, 70.0, 70.0),
        }
    }

    pub fn factors(&self) -> [(&'static str, u8); 5] {
        [
            ("Temperature Balance", self.temperature),
            ("Atmospheric Composition", self.atmosphere),
            ("Gravity Conditions", self.gravity),
            ("Radiation Protection", self.radiation_protection),
            ("Water Availability", self.water),
        ]
    }

    /// Rounded mean of all factors
    pub fn score(&self) -> u8 {
        let total: u32 = self.factors().iter().map(|(_, v)| *v as u32).sum();
        (total as f32 / 5.0).round() as u8
    }

    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score())
    }

    /// Suggestions for the weakest factors
    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut recs = Vec::new();
        if self.temperature < RECOMMEND_BELOW {
            recs.push("Consider adjusting orbital distance for optimal temperature");
        }
        if self.atmosphere < RECOMMEND_BELOW {
            recs.push("Atmospheric composition needs enhancement");
        }
        // Exposure above 40% means protection below 60%
        if self.radiation_protection < 60 {
            recs.push("Additional magnetic field protection recommended");
        }
        if self.water < RECOMMEND_BELOW {
            recs.push("Increase water content for better habitability");
        }
        recs
    }
}
