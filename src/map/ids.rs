//! Typed entity ids.
//!
//! Ids are stable for an entity's lifetime and may be reused after the
//! entity is destroyed. Each class draws from its own pool, so the types
//! keep robot/sensor/landmark ids from being mixed up at compile time.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Identifier of a robot in the map.
    RobotId
);
entity_id!(
    /// Identifier of a sensor, unique across all robots.
    SensorId
);
entity_id!(
    /// Identifier of a landmark in the map.
    LandmarkId
);
