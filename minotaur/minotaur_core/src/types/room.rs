//! Room and simulation descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The sign on the showroom door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Nobody is inside; the next guest may enter.
    #[default]
    Available,

    /// Exactly one guest is inside.
    Busy,
}

impl RoomStatus {
    /// Whether a guest may walk in.
    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Busy => write!(f, "BUSY"),
        }
    }
}

/// Which of the two party games a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    /// The cupcake-counting labyrinth.
    Labyrinth,

    /// The crystal-vase showroom.
    Showroom,
}

impl SimulationKind {
    /// Short lowercase name, as used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Labyrinth => "labyrinth",
            Self::Showroom => "showroom",
        }
    }
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_display() {
        assert_eq!(RoomStatus::Available.to_string(), "AVAILABLE");
        assert_eq!(RoomStatus::Busy.to_string(), "BUSY");
        assert!(RoomStatus::default().is_available());
        assert!(!RoomStatus::Busy.is_available());
    }

    #[test]
    fn test_simulation_kind_serialization() {
        let serialized = serde_json::to_string(&SimulationKind::Showroom).unwrap();
        assert_eq!(serialized, "\"showroom\"");
        assert_eq!(SimulationKind::Labyrinth.to_string(), "labyrinth");
    }
}
