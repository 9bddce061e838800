use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle for a live item.
///
/// Handles are issued in increasing order, so ordering by `ItemId` is
/// insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two independent categorical attributes every item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Kind,
    Color,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind => f.write_str("kind"),
            Self::Color => f.write_str("color"),
        }
    }
}

/// Where an item sits and how large it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub location: Vec3,
    pub scale: Vec3,
}

impl Placement {
    pub fn new(location: Vec3, scale: Vec3) -> Self {
        Self { location, scale }
    }

    /// Size metric derived from the scale: the mean of its components.
    pub fn size(&self) -> f32 {
        self.scale.element_sum() / 3.0
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}
