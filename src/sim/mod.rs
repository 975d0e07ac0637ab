//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only (one `update` advances the whole world atomically)
//! - Seeded RNG only
//! - Fixed per-frame pipeline order (later steps depend on earlier ones)
//! - No rendering or platform dependencies

pub mod entity;
pub mod extra_life;
pub mod goal;
pub mod lane;
pub mod motion;
pub mod player;
pub mod world;

pub use entity::{Entity, EntityDescriptor, EntityKind, Motion, Tag, TagSet, aabb_overlap};
pub use extra_life::ExtraLifeAgent;
pub use goal::Goal;
pub use lane::{lane_of, random_lane};
pub use player::{Direction, FrameInput, Player};
pub use world::{SpriteView, World};
