//! Closed-form easing functions mapping linear progress to shaped progress.
//!
//! Every function maps `0 -> 0` and `1 -> 1` exactly. The back, elastic and
//! bounce families may leave `[0, 1]` between the boundaries.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::EasingError;

const BACK_C1: f64 = 1.701_58;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;
const BOUNCE_N: f64 = 7.5625;
const BOUNCE_D: f64 = 2.75;

/// Selects an easing function by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    #[default]
    Linear,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Ease {
    /// Every easing, from gentlest to strongest.
    pub const ALL: [Ease; 31] = [
        Ease::Linear,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
        Ease::InBack,
        Ease::OutBack,
        Ease::InOutBack,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
        Ease::InBounce,
        Ease::OutBounce,
        Ease::InOutBounce,
    ];

    /// Applies the easing to `x`.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,

            Self::InSine => 1.0 - (x * PI / 2.0).cos(),
            Self::OutSine => (x * PI / 2.0).sin(),
            Self::InOutSine => -((PI * x).cos() - 1.0) / 2.0,

            Self::InQuad => x.powi(2),
            Self::OutQuad => 1.0 - (1.0 - x).powi(2),
            Self::InOutQuad => in_out_power(x, 2),

            Self::InCubic => x.powi(3),
            Self::OutCubic => 1.0 - (1.0 - x).powi(3),
            Self::InOutCubic => in_out_power(x, 3),

            Self::InQuart => x.powi(4),
            Self::OutQuart => 1.0 - (1.0 - x).powi(4),
            Self::InOutQuart => in_out_power(x, 4),

            Self::InQuint => x.powi(5),
            Self::OutQuint => 1.0 - (1.0 - x).powi(5),
            Self::InOutQuint => in_out_power(x, 5),

            Self::InExpo => in_expo(x),
            Self::OutExpo => out_expo(x),
            Self::InOutExpo => in_out_expo(x),

            Self::InCirc => 1.0 - (1.0 - x.powi(2)).max(0.0).sqrt(),
            Self::OutCirc => (1.0 - (x - 1.0).powi(2)).max(0.0).sqrt(),
            Self::InOutCirc => in_out_circ(x),

            Self::InBack => BACK_C3 * x.powi(3) - BACK_C1 * x.powi(2),
            Self::OutBack => 1.0 + BACK_C3 * (x - 1.0).powi(3) + BACK_C1 * (x - 1.0).powi(2),
            Self::InOutBack => in_out_back(x),

            Self::InElastic => in_elastic(x),
            Self::OutElastic => out_elastic(x),
            Self::InOutElastic => in_out_elastic(x),

            Self::InBounce => 1.0 - out_bounce(1.0 - x),
            Self::OutBounce => out_bounce(x),
            Self::InOutBounce => {
                if x < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * x)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * x - 1.0)) / 2.0
                }
            }
        }
    }

    /// Returns whether the easing may leave `[0, 1]` between its boundaries.
    #[must_use]
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Self::InBack
                | Self::OutBack
                | Self::InOutBack
                | Self::InElastic
                | Self::OutElastic
                | Self::InOutElastic
        )
    }

    /// Returns the kebab-case name, e.g. `in-out-sine`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InSine => "in-sine",
            Self::OutSine => "out-sine",
            Self::InOutSine => "in-out-sine",
            Self::InQuad => "in-quad",
            Self::OutQuad => "out-quad",
            Self::InOutQuad => "in-out-quad",
            Self::InCubic => "in-cubic",
            Self::OutCubic => "out-cubic",
            Self::InOutCubic => "in-out-cubic",
            Self::InQuart => "in-quart",
            Self::OutQuart => "out-quart",
            Self::InOutQuart => "in-out-quart",
            Self::InQuint => "in-quint",
            Self::OutQuint => "out-quint",
            Self::InOutQuint => "in-out-quint",
            Self::InExpo => "in-expo",
            Self::OutExpo => "out-expo",
            Self::InOutExpo => "in-out-expo",
            Self::InCirc => "in-circ",
            Self::OutCirc => "out-circ",
            Self::InOutCirc => "in-out-circ",
            Self::InBack => "in-back",
            Self::OutBack => "out-back",
            Self::InOutBack => "in-out-back",
            Self::InElastic => "in-elastic",
            Self::OutElastic => "out-elastic",
            Self::InOutElastic => "in-out-elastic",
            Self::InBounce => "in-bounce",
            Self::OutBounce => "out-bounce",
            Self::InOutBounce => "in-out-bounce",
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = EasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // "none" is what the editor shows for no easing.
        if wanted == "none" {
            return Ok(Self::Linear);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|ease| ease.name() == wanted)
            .ok_or_else(|| EasingError::UnknownEase(s.to_owned()))
    }
}

fn in_out_power(x: f64, power: i32) -> f64 {
    if x < 0.5 {
        2f64.powi(power - 1) * x.powi(power)
    } else {
        1.0 - (-2.0 * x + 2.0).powi(power) / 2.0
    }
}

fn in_expo(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * x - 10.0)
    }
}

fn out_expo(x: f64) -> f64 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * x)
    }
}

fn in_out_expo(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x >= 1.0 {
        1.0
    } else if x < 0.5 {
        2f64.powf(20.0 * x - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * x + 10.0)) / 2.0
    }
}

fn in_out_circ(x: f64) -> f64 {
    if x < 0.5 {
        (1.0 - (1.0 - (2.0 * x).powi(2)).max(0.0).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * x + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
    }
}

fn in_out_back(x: f64) -> f64 {
    if x < 0.5 {
        ((2.0 * x).powi(2) * ((BACK_C2 + 1.0) * 2.0 * x - BACK_C2)) / 2.0
    } else {
        ((2.0 * x - 2.0).powi(2) * ((BACK_C2 + 1.0) * (x * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

fn in_elastic(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x >= 1.0 {
        1.0
    } else {
        -(2f64.powf(10.0 * x - 10.0)) * ((x * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

fn out_elastic(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x >= 1.0 {
        1.0
    } else {
        2f64.powf(-10.0 * x) * ((x * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

fn in_out_elastic(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x >= 1.0 {
        1.0
    } else if x < 0.5 {
        -(2f64.powf(20.0 * x - 10.0) * ((20.0 * x - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        (2f64.powf(-20.0 * x + 10.0) * ((20.0 * x - 11.125) * ELASTIC_C5).sin()) / 2.0 + 1.0
    }
}

fn out_bounce(x: f64) -> f64 {
    if x < 1.0 / BOUNCE_D {
        BOUNCE_N * x * x
    } else if x < 2.0 / BOUNCE_D {
        let c = x - 1.5 / BOUNCE_D;
        BOUNCE_N * c * c + 0.75
    } else if x < 2.5 / BOUNCE_D {
        let c = x - 2.25 / BOUNCE_D;
        BOUNCE_N * c * c + 0.9375
    } else {
        let c = x - 2.625 / BOUNCE_D;
        BOUNCE_N * c * c + 0.984_375
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn boundaries_are_exact() {
        for ease in Ease::ALL {
            assert_abs_diff_eq!(ease.apply(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(ease.apply(1.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn non_overshooting_families_stay_in_unit_interval() {
        for ease in Ease::ALL.into_iter().filter(|e| !e.overshoots()) {
            for i in 0..=200 {
                let y = ease.apply(f64::from(i) / 200.0);
                assert!((-1e-12..=1.0 + 1e-12).contains(&y), "{ease} gave {y}");
            }
        }
    }

    #[test]
    fn in_out_variants_are_symmetric_at_half() {
        for ease in [
            Ease::InOutSine,
            Ease::InOutQuad,
            Ease::InOutCubic,
            Ease::InOutQuart,
            Ease::InOutQuint,
            Ease::InOutExpo,
            Ease::InOutCirc,
            Ease::InOutBounce,
        ] {
            assert_abs_diff_eq!(ease.apply(0.5), 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn known_values() {
        assert_abs_diff_eq!(Ease::InQuad.apply(0.5), 0.25);
        assert_abs_diff_eq!(Ease::OutQuad.apply(0.5), 0.75);
        assert_abs_diff_eq!(Ease::InCubic.apply(0.5), 0.125);
        assert_abs_diff_eq!(Ease::InOutQuart.apply(0.25), 8.0 * 0.25f64.powi(4));
        assert_abs_diff_eq!(Ease::OutBounce.apply(0.5), 0.765_625, epsilon = 1e-9);
    }

    #[test]
    fn back_overshoots_below_zero() {
        assert!(Ease::InBack.apply(0.2) < 0.0);
        assert!(Ease::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn names_round_trip() {
        for ease in Ease::ALL {
            assert_eq!(ease.name().parse::<Ease>().unwrap(), ease);
        }
        assert_eq!("None".parse::<Ease>().unwrap(), Ease::Linear);
    }

    #[test]
    fn unknown_name_fails() {
        let err = "in-out-wobble".parse::<Ease>().unwrap_err();
        assert!(matches!(err, EasingError::UnknownEase(name) if name == "in-out-wobble"));
    }
}
