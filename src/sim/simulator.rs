//! Bounded 2D bounce simulation
//!
//! One axis-aligned box moving at a constant per-tick velocity inside a fixed
//! frame. Reflection is reactive: the box moves first, then any axis whose
//! edge is past the frame has its velocity negated. Position is never
//! clamped, so the box can sit up to one velocity step outside the frame for
//! a single tick.
//!
//! Velocity is in units per tick, not per second. Apparent speed follows the
//! frame rate of whatever drives `tick`.

use glam::{BVec2, Vec2};
use rand::Rng;

use super::bounds::Bounds;
use super::speed::SpeedRange;
use crate::error::ConfigError;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Position after the move
    pub pos: Vec2,
    /// Axes whose velocity was negated this tick
    pub reflected: BVec2,
}

impl TickOutcome {
    pub fn bounced(&self) -> bool {
        self.reflected.any()
    }

    /// Both axes reflected on the same tick
    pub fn corner(&self) -> bool {
        self.reflected.all()
    }
}

/// The bouncing box
///
/// Fields are private so the only way to change velocity is a reflection,
/// which preserves its magnitude on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceSimulator {
    /// Box center
    pos: Vec2,
    /// Signed displacement per tick
    vel: Vec2,
    /// Half width / half height used against the frame edges
    half_extent: Vec2,
    bounds: Bounds,
}

impl BounceSimulator {
    /// Build a simulator from explicit state (no randomness, no validation)
    pub fn new(pos: Vec2, vel: Vec2, half_extent: Vec2, bounds: Bounds) -> Self {
        Self {
            pos,
            vel,
            half_extent,
            bounds,
        }
    }

    /// Start at the origin with an independently sampled speed per axis.
    ///
    /// Fails if `min_speed < max_speed` does not hold (or either is not a
    /// positive finite number).
    pub fn initialize<R: Rng>(
        rng: &mut R,
        min_speed: f32,
        max_speed: f32,
        half_extent: Vec2,
    ) -> Result<Self, ConfigError> {
        let range = SpeedRange::new(min_speed, max_speed)?;
        Ok(Self::with_range(rng, range, half_extent, Bounds::NDC))
    }

    /// Start at the center of `bounds` with a velocity drawn from `range`
    pub fn with_range<R: Rng>(
        rng: &mut R,
        range: SpeedRange,
        half_extent: Vec2,
        bounds: Bounds,
    ) -> Self {
        let vel = Vec2::new(range.sample_axis(rng), range.sample_axis(rng));
        let pos = (bounds.min + bounds.max) * 0.5;
        Self::new(pos, vel, half_extent, bounds)
    }

    /// Advance one tick and return the new position
    pub fn tick(&mut self) -> Vec2 {
        self.step().pos
    }

    /// Advance one tick, reporting which axes reflected
    pub fn step(&mut self) -> TickOutcome {
        self.pos += self.vel;

        let reflected = self.bounds.edge_contact(self.pos, self.half_extent);
        self.vel = Vec2::select(reflected, -self.vel, self.vel);

        TickOutcome {
            pos: self.pos,
            reflected,
        }
    }

    /// Box center, which is also the render offset
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn half_extent(&self) -> Vec2 {
        self.half_extent
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
