//! Automatic fire: shots fired, rapid-fire bonus, and hits scored.
//!
//! Rate of fire is written as a plain count (`4`, `10!`) or in shotgun
//! form `<rof>x<projectiles>` (`3x9`, also with `X`, `×` or `*`). Every
//! full multiple of Recoil in the margin of success adds one hit, up to
//! the number of projectiles fired.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

static SHOTGUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*[xX×*]\s*(\d+)$").expect("shotgun pattern is valid")
});

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)").expect("leading integer pattern is valid"));

/// A weapon's automatic-fire statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireProfile {
    /// Recoil; must be positive.
    pub recoil: i32,
    /// Rate of fire as written on the weapon table.
    pub rate_of_fire: String,
}

impl FireProfile {
    /// Create a profile.
    pub fn new(recoil: i32, rate_of_fire: impl Into<String>) -> Self {
        Self {
            recoil,
            rate_of_fire: rate_of_fire.into(),
        }
    }
}

/// A parsed rate of fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateOfFire {
    /// Maximum shots per attack.
    pub shots: i32,
    /// Projectiles per shot, for shotgun notation.
    pub projectiles: Option<i32>,
}

impl RateOfFire {
    /// Parse rate-of-fire text.
    pub fn parse(text: &str) -> RulesResult<Self> {
        let trimmed = text.trim();
        let invalid = || RulesError::InvalidFormat(text.to_string());
        let number = |digits: &str| digits.parse::<i32>().map_err(|_| invalid());

        if let Some(caps) = SHOTGUN_PATTERN.captures(trimmed) {
            return Ok(Self {
                shots: number(&caps[1])?,
                projectiles: Some(number(&caps[2])?),
            });
        }
        let caps = LEADING_INTEGER.captures(trimmed).ok_or_else(invalid)?;
        Ok(Self {
            shots: number(&caps[1])?,
            projectiles: None,
        })
    }

    /// Projectiles per shot (1 unless shotgun notation).
    pub fn multiplier(&self) -> i32 {
        self.projectiles.unwrap_or(1)
    }
}

/// The result of resolving a burst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireResolution {
    /// Rate of fire actually used, e.g. `3` or `1x9`.
    pub label: String,
    /// The weapon's recoil.
    pub recoil: i32,
    /// Shots fired.
    pub shots_fired: i32,
    /// Skill bonus for the volume of fire.
    pub rapid_fire_bonus: i32,
    /// Hits scored.
    pub hit_count: i32,
}

/// Skill bonus for firing `volume` projectiles in one attack.
pub fn rapid_fire_bonus(volume: i32) -> i32 {
    match volume {
        i32::MIN..=4 => 0,
        5..=8 => 1,
        9..=12 => 2,
        13..=16 => 3,
        17..=24 => 4,
        25..=49 => 5,
        _ => {
            let mut bonus = 6;
            let mut cap: i64 = 99;
            while i64::from(volume) > cap {
                bonus += 1;
                cap = cap * 2 + 1;
            }
            bonus
        }
    }
}

/// Resolve a burst of automatic fire.
///
/// `shots_requested` defaults to one and is capped at the rate of fire.
/// A margin below zero scores no hits.
pub fn resolve(
    profile: &FireProfile,
    shots_requested: Option<i32>,
    margin_of_success: i32,
) -> RulesResult<FireResolution> {
    if profile.recoil <= 0 {
        return Err(RulesError::DivideByZero("recoil"));
    }
    let rof = RateOfFire::parse(&profile.rate_of_fire)?;

    let requested = shots_requested.unwrap_or(1).max(1);
    let shots_fired = requested.min(rof.shots);
    let label = match rof.projectiles {
        Some(projectiles) => format!("{shots_fired}x{projectiles}"),
        None => shots_fired.to_string(),
    };

    let volume = shots_fired.saturating_mul(rof.multiplier());
    let potential_hits = margin_of_success
        .div_euclid(profile.recoil)
        .saturating_add(1);
    let hit_count = volume.min(potential_hits).max(0);

    let resolution = FireResolution {
        label,
        recoil: profile.recoil,
        shots_fired,
        rapid_fire_bonus: rapid_fire_bonus(volume),
        hit_count,
    };
    tracing::debug!(
        rof = %profile.rate_of_fire,
        recoil = profile.recoil,
        margin_of_success,
        label = %resolution.label,
        hits = resolution.hit_count,
        "resolved automatic fire"
    );
    Ok(resolution)
}
