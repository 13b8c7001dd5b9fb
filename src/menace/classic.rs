//! Classic MENACE reinforcement schedule and resignation handling

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Bead adjustments applied to every move of a finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    pub win: i16,
    pub draw: i16,
    pub loss: i16,
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        // Michie's original values
        ReinforcementValues {
            win: 3,
            draw: 1,
            loss: -1,
        }
    }
}

impl ReinforcementValues {
    /// Map a terminal reward onto a bead delta.
    ///
    /// 1.0 is a win and 0.0 a loss; anything else counts as a draw.
    pub fn delta_for_reward(&self, reward: f64) -> i16 {
        if reward == 1.0 {
            self.win
        } else if reward == 0.0 {
            self.loss
        } else {
            self.draw
        }
    }
}

/// What a matchbox agent does when the box for the current state is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResignationPolicy {
    /// Refuse to move and report [`crate::Error::PlayerResigned`].
    #[default]
    Resign,
    /// Pick uniformly among the legal moves instead.
    UniformFallback,
}

impl fmt::Display for ResignationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResignationPolicy::Resign => "resign",
            ResignationPolicy::UniformFallback => "uniform-fallback",
        };
        f.write_str(label)
    }
}

impl FromStr for ResignationPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resign" => Ok(ResignationPolicy::Resign),
            "uniform-fallback" | "uniform_fallback" | "fallback" | "uniform" => {
                Ok(ResignationPolicy::UniformFallback)
            }
            _ => Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "unknown resignation policy '{s}' (expected resign or uniform-fallback)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewards_map_onto_bead_deltas() {
        let values = ReinforcementValues::default();
        assert_eq!(values.delta_for_reward(1.0), 3);
        assert_eq!(values.delta_for_reward(0.5), 1);
        assert_eq!(values.delta_for_reward(0.0), -1);
    }

    #[test]
    fn policy_parses_and_displays() {
        assert_eq!(
            "Uniform-Fallback".parse::<ResignationPolicy>().unwrap(),
            ResignationPolicy::UniformFallback
        );
        assert_eq!(ResignationPolicy::Resign.to_string(), "resign");
        assert!("surrender".parse::<ResignationPolicy>().is_err());
    }
}
