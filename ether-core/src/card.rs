//! Card handles and the per-card property bundle.
//!
//! Cards are owned by the host. The engine only ever holds [`CardId`]s and
//! reads/writes the card's properties through an
//! [`AnimationScheduler`](crate::animation::AnimationScheduler).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

/// Opaque, stable identity of a host-owned card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Deterministic id derived from a name, handy for fixtures and tools.
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CardId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Animatable properties of a card as stored by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardState {
    pub position: Point,
    pub scale: f32,
    pub opacity: f32,
    pub z: f32,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: 1.0,
            opacity: 1.0,
            z: 0.0,
        }
    }
}
