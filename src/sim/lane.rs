//! Random lane generation for endless play
//!
//! A lane is one row of identical obstacles sharing a direction. Water
//! archetypes first lay a strip of lethal water tiles across the lane, so
//! falling off a platform behaves the same as in authored levels. All
//! randomness comes from the caller's RNG, so a seeded generator yields
//! reproducible lanes.

use rand::Rng;

use crate::consts::{SCREEN_WIDTH, TILE_SIZE};
use crate::sim::entity::{EntityDescriptor, EntityKind};

/// Range of the first obstacle's x position, in pixels
pub const LANE_X_RANGE: f32 = 500.0;
/// Obstacle separation, in tiles: SEP_MIN + [0, SEP_RANGE)
pub const LANE_SEP_MIN: f32 = 5.0;
pub const LANE_SEP_RANGE: f32 = 10.0;

/// Archetypes a generated lane can carry
const LANE_KINDS: [EntityKind; 7] = [
    EntityKind::Bus,
    EntityKind::Bulldozer,
    EntityKind::Bike,
    EntityKind::Racecar,
    EntityKind::Log,
    EntityKind::LongLog,
    EntityKind::Turtle,
];

/// Generate a lane of a uniformly chosen archetype at the given y
pub fn random_lane<R: Rng>(rng: &mut R, y: f32) -> Vec<EntityDescriptor> {
    let kind = LANE_KINDS[rng.random_range(0..LANE_KINDS.len())];
    lane_of(rng, kind, y)
}

/// Generate a lane of the selected archetype at the given y
pub fn lane_of<R: Rng>(rng: &mut R, kind: EntityKind, y: f32) -> Vec<EntityDescriptor> {
    let mut descriptors = Vec::new();

    if kind.rides_water() {
        let mut x = 0.0;
        while x < SCREEN_WIDTH {
            descriptors.push(EntityDescriptor::new(EntityKind::Water, x, y, true));
            x += TILE_SIZE;
        }
    }

    let moving_right = rng.random_bool(0.5);
    let mut x = rng.random::<f32>() * LANE_X_RANGE;
    let sep = (rng.random::<f32>() * LANE_SEP_RANGE + LANE_SEP_MIN) * TILE_SIZE;
    let count = ((SCREEN_WIDTH - x) / sep) as usize + 1;

    for _ in 0..count {
        descriptors.push(EntityDescriptor::new(kind, x, y, moving_right));
        x += sep;
    }

    descriptors
}
