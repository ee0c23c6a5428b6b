//! Contextual features for a single traffic-load query.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegressError;

/// Number of columns produced by [`TrafficConditions::to_features`].
pub const N_FEATURES: usize = 5;

/// Weather category, encoded as 0..=3 in the feature row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// Clear sky.
    Clear,
    /// Overcast.
    Cloudy,
    /// Rain.
    Rain,
    /// Snow.
    Snow,
}

impl Weather {
    /// All categories in code order.
    pub const ALL: [Weather; 4] = [Self::Clear, Self::Cloudy, Self::Rain, Self::Snow];

    /// Numeric code used in the feature row.
    pub fn code(self) -> u8 {
        match self {
            Self::Clear => 0,
            Self::Cloudy => 1,
            Self::Rain => 2,
            Self::Snow => 3,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
        };
        f.write_str(s)
    }
}

impl FromStr for Weather {
    type Err = RegressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clear" | "0" => Ok(Self::Clear),
            "cloudy" | "1" => Ok(Self::Cloudy),
            "rain" | "2" => Ok(Self::Rain),
            "snow" | "3" => Ok(Self::Snow),
            other => Err(RegressError::invalid(format!(
                "unknown weather '{other}', expected clear, cloudy, rain or snow"
            ))),
        }
    }
}

/// Conditions at the time a load prediction is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficConditions {
    /// Hour of day, 0..=23.
    pub hour: u32,
    /// Day of week, 0 = Monday ..= 6 = Sunday.
    pub day_of_week: u32,
    /// Weather category.
    pub weather: Weather,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Public holiday flag.
    pub is_holiday: bool,
}

impl TrafficConditions {
    /// Checks calendar ranges and temperature finiteness.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::InvalidInput`] describing the first bad field.
    pub fn validate(&self) -> Result<(), RegressError> {
        if self.hour > 23 {
            return Err(RegressError::invalid(format!(
                "hour must be in 0..=23, got {}",
                self.hour
            )));
        }
        if self.day_of_week > 6 {
            return Err(RegressError::invalid(format!(
                "day_of_week must be in 0..=6, got {}",
                self.day_of_week
            )));
        }
        if !self.temperature.is_finite() {
            return Err(RegressError::invalid("temperature must be finite"));
        }
        Ok(())
    }

    /// Feature row `[hour, day_of_week, weather, temperature, is_holiday]`.
    pub fn to_features(&self) -> [f64; N_FEATURES] {
        [
            f64::from(self.hour),
            f64::from(self.day_of_week),
            f64::from(self.weather.code()),
            self.temperature,
            if self.is_holiday { 1.0 } else { 0.0 },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_codes_round_trip() {
        for w in Weather::ALL {
            assert_eq!(Weather::from_code(w.code()), Some(w));
            assert_eq!(w.to_string().parse::<Weather>().unwrap(), w);
        }
        assert_eq!(Weather::from_code(4), None);
        assert_eq!("RAIN".parse::<Weather>().unwrap(), Weather::Rain);
        assert_eq!("2".parse::<Weather>().unwrap(), Weather::Rain);
        assert!("fog".parse::<Weather>().is_err());
    }

    #[test]
    fn feature_row_order() {
        let c = TrafficConditions {
            hour: 8,
            day_of_week: 1,
            weather: Weather::Clear,
            temperature: 25.0,
            is_holiday: false,
        };
        assert_eq!(c.to_features(), [8.0, 1.0, 0.0, 25.0, 0.0]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_ranges() {
        let ok = TrafficConditions {
            hour: 23,
            day_of_week: 6,
            weather: Weather::Snow,
            temperature: -5.0,
            is_holiday: true,
        };
        assert!(ok.validate().is_ok());
        assert!(TrafficConditions { hour: 24, ..ok }.validate().is_err());
        assert!(TrafficConditions { day_of_week: 7, ..ok }.validate().is_err());
        assert!(
            TrafficConditions {
                temperature: f64::NAN,
                ..ok
            }
            .validate()
            .is_err()
        );
    }
}
