//! Derived stat calculation and damage resistance.

mod derived;
mod resistance;

pub use derived::{
    compute, effective_attributes, DerivedStats, Resource, ResourcePool, BASE_ARMOR_CLASS,
};
pub use resistance::apply_damage_resistance;
