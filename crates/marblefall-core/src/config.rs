//! Tunable constants for the arena, the tokens, and the run lifecycle.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// All tunables for a raffle run.
///
/// The defaults reproduce the reference arena: an 800×600 box with five
/// angled obstacle bars and a 150-unit basket near the floor. Distances are
/// in world units (y-up, floor at `y = 0`); times are in integrator ticks
/// of `dt` seconds each.
///
/// # Lifecycle policy
///
/// `max_run_ticks = None` (the default) runs indefinitely until a token
/// reaches the basket. Setting it forces settlement after that many ticks
/// even without a winner; the no-winner outcome is reported through
/// [`Notice::NoWinner`](crate::Notice::NoWinner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaffleConfig {
    /// Arena width.
    pub width: f32,
    /// Arena height; tokens spawn above this line.
    pub height: f32,
    /// Vertical gravity (negative = downward).
    pub gravity_y: f32,
    /// Fixed integrator timestep in seconds.
    pub dt: f32,

    /// Token radius.
    pub ball_radius: f32,
    /// Token bounciness.
    pub restitution: f32,
    /// Token surface friction.
    pub friction: f32,

    /// Horizontal dead zone on each side of the spawn band.
    pub spawn_margin: f32,
    /// Minimum clearance above the arena top where tokens appear.
    pub spawn_clearance: f32,
    /// Height of the randomized spawn band above the clearance line.
    pub spawn_band: f32,

    /// Inner width of the collection basket.
    pub basket_width: f32,
    /// Height of the basket side walls.
    pub basket_wall_height: f32,
    /// Height of the basket walls' midline above the floor.
    pub basket_elevation: f32,

    /// Impulse scale for [`shake`](crate::RunController::shake), in
    /// mass·units/second.
    pub shake_impulse: f32,

    /// Grace period between winner contact and the Settled phase, so the
    /// winning token is visibly seen to land before controls re-enable.
    pub settle_grace_ticks: u64,
    /// Optional forced-stop tick count; `None` runs until a winner.
    pub max_run_ticks: Option<u64>,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            gravity_y: -981.0,
            dt: 1.0 / 60.0,
            ball_radius: 12.0,
            restitution: 0.7,
            friction: 0.1,
            spawn_margin: 50.0,
            spawn_clearance: 100.0,
            spawn_band: 200.0,
            basket_width: 150.0,
            basket_wall_height: 40.0,
            basket_elevation: 80.0,
            shake_impulse: 25_000.0,
            settle_grace_ticks: 120,
            max_run_ticks: None,
        }
    }
}

impl RaffleConfig {
    /// Checks that the configuration can produce a playable arena.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("dt", self.dt),
            ("ball_radius", self.ball_radius),
            ("basket_width", self.basket_width),
            ("basket_wall_height", self.basket_wall_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.spawn_margin * 2.0 >= self.width {
            return Err(ConfigError::MarginTooWide {
                margin: self.spawn_margin,
                width: self.width,
            });
        }
        if self.basket_width >= self.width {
            return Err(ConfigError::BasketTooWide {
                basket: self.basket_width,
                width: self.width,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(RaffleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let cfg = RaffleConfig {
            width: 0.0,
            ..RaffleConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "width" })
        );

        let cfg = RaffleConfig {
            dt: -1.0,
            ..RaffleConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "dt" })
        ));
    }

    #[test]
    fn rejects_margin_wider_than_arena() {
        let cfg = RaffleConfig {
            spawn_margin: 400.0,
            ..RaffleConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::MarginTooWide { .. })));
    }

    #[test]
    fn rejects_basket_wider_than_arena() {
        let cfg = RaffleConfig {
            basket_width: 900.0,
            ..RaffleConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BasketTooWide { .. })));
    }

    #[test]
    fn deserializes_partial_config_over_defaults() {
        let cfg: RaffleConfig =
            serde_json::from_str(r#"{"width": 1024.0, "max_run_ticks": 600}"#).unwrap();
        assert_eq!(cfg.width, 1024.0);
        assert_eq!(cfg.max_run_ticks, Some(600));
        assert_eq!(cfg.height, 600.0);
    }
}
