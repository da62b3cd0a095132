//! Rolling dice pools.

use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};
use serde::{Deserialize, Serialize};

use super::DiceSpec;
use crate::error::{RulesError, RulesResult};

/// A source of uniformly distributed integers.
pub trait UniformDraw {
    /// Return a uniform integer in `[0, bound)`. `bound` is at least 1.
    fn draw_below(&mut self, bound: u32) -> u32;
}

impl UniformDraw for StdRng {
    fn draw_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}

impl UniformDraw for ThreadRng {
    fn draw_below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}

/// The outcome of rolling a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRoll {
    /// The pool actually rolled, after any modifier redistribution.
    pub rolled: DiceSpec,
    /// Individual die faces, in roll order.
    pub faces: Vec<u32>,
    /// Final total, multiplier applied.
    pub total: i64,
}

impl std::fmt::Display for PoolRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        write!(f, "{} [{}]", self.rolled, values.join(", "))?;
        write!(f, " = {}", self.total)
    }
}

/// Largest pool [`roll_detailed`] lists face by face.
pub const MAX_LISTED_DICE: i32 = 10_000;

/// Trade a positive modifier for whole dice of the pool's size.
///
/// One die is worth its average face, `(sides + 1) / 2`. For odd sides
/// that is a whole number and the trade is exact. For even sides the
/// average ends in a half, so two dice cost `sides + 1` and a leftover
/// above the average buys a single die for `sides / 2 + 1`. The count
/// saturates at `i32::MAX`.
pub fn redistribute_modifier(spec: DiceSpec) -> DiceSpec {
    if spec.modifier <= 0 || spec.sides <= 0 {
        return spec;
    }

    let (extra, modifier) = if spec.sides % 2 == 1 {
        let average = spec.sides / 2 + 1;
        (spec.modifier / average, spec.modifier % average)
    } else {
        let half = spec.sides / 2;
        let pair = spec.sides.saturating_add(1);
        let pairs = spec.modifier / pair;
        let rest = spec.modifier % pair;
        if rest > half {
            (pairs.saturating_mul(2).saturating_add(1), rest - (half + 1))
        } else {
            (pairs.saturating_mul(2), rest)
        }
    };
    let count = spec.count.saturating_add(extra);
    tracing::trace!(count, modifier, extra, "converted modifier into dice");

    DiceSpec {
        count,
        modifier,
        ..spec
    }
}

fn prepare(spec: &DiceSpec, use_extra_dice_from_modifiers: bool) -> DiceSpec {
    let spec = spec.normalize();
    if use_extra_dice_from_modifiers {
        redistribute_modifier(spec)
    } else {
        spec
    }
}

/// Draw every die of a prepared pool, handing each face to `record`.
fn total_of<R, F>(rolled: &DiceSpec, rng: &mut R, mut record: F) -> i64
where
    R: UniformDraw + ?Sized,
    F: FnMut(u32),
{
    let mut total = i64::from(rolled.modifier);
    match rolled.sides {
        0 => {}
        1 => total += i64::from(rolled.count),
        sides => {
            let bound = sides.unsigned_abs();
            for _ in 0..rolled.count {
                let face = 1 + rng.draw_below(bound);
                tracing::trace!(face, sides, "rolled die");
                record(face);
                total += i64::from(face);
            }
        }
    }
    total.saturating_mul(i64::from(rolled.multiplier))
}

/// Roll a pool and report every face.
///
/// Pools of more than [`MAX_LISTED_DICE`] dice fail with
/// [`RulesError::TooManyDice`]; [`roll`] handles them without listing.
pub fn roll_detailed<R: UniformDraw + ?Sized>(
    spec: &DiceSpec,
    use_extra_dice_from_modifiers: bool,
    rng: &mut R,
) -> RulesResult<PoolRoll> {
    let rolled = prepare(spec, use_extra_dice_from_modifiers);
    if rolled.sides > 1 && rolled.count > MAX_LISTED_DICE {
        return Err(RulesError::TooManyDice {
            count: rolled.count,
            limit: MAX_LISTED_DICE,
        });
    }

    let mut faces = Vec::new();
    let total = total_of(&rolled, rng, |face| faces.push(face));

    tracing::debug!(pool = %rolled, total, "rolled dice pool");
    Ok(PoolRoll {
        rolled,
        faces,
        total,
    })
}

/// Roll a pool and return the total.
pub fn roll<R: UniformDraw + ?Sized>(
    spec: &DiceSpec,
    use_extra_dice_from_modifiers: bool,
    rng: &mut R,
) -> i64 {
    let rolled = prepare(spec, use_extra_dice_from_modifiers);
    let total = total_of(&rolled, rng, |_| {});
    tracing::debug!(pool = %rolled, total, "rolled dice pool");
    total
}
