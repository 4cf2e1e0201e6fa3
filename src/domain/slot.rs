// src/domain/slot.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ParseError;

/// Occupancy of one slot. Serialized with the backend's Spanish names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotState {
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "reservado")]
    Reserved,
    #[serde(rename = "bloqueado")]
    Blocked,
}

impl SlotState {
    pub const ALL: [SlotState; 3] = [SlotState::Available, SlotState::Reserved, SlotState::Blocked];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotState::Available => "disponible",
            SlotState::Reserved => "reservado",
            SlotState::Blocked => "bloqueado",
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotState {
    type Err = ParseError;

    /// Accepts the wire names and their English equivalents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disponible" | "available" => Ok(SlotState::Available),
            "reservado" | "reserved" => Ok(SlotState::Reserved),
            "bloqueado" | "blocked" => Ok(SlotState::Blocked),
            other => Err(ParseError::UnknownState(other.to_string())),
        }
    }
}

/// Named time period within which a spot can be reserved independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotLabel {
    #[serde(rename = "AM")]
    Morning,
    #[serde(rename = "PM")]
    Afternoon,
    #[serde(rename = "Completo")]
    FullDay,
}

impl SlotLabel {
    #[cfg(test)]
    pub const ALL: [SlotLabel; 3] = [SlotLabel::Morning, SlotLabel::Afternoon, SlotLabel::FullDay];

    /// Label used to address a simple spot as a whole.
    pub const WHOLE_SPOT: SlotLabel = SlotLabel::FullDay;

    pub fn as_str(self) -> &'static str {
        match self {
            SlotLabel::Morning => "AM",
            SlotLabel::Afternoon => "PM",
            SlotLabel::FullDay => "Completo",
        }
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotLabel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "AM" | "am" => Ok(SlotLabel::Morning),
            "PM" | "pm" => Ok(SlotLabel::Afternoon),
            "Completo" | "completo" => Ok(SlotLabel::FullDay),
            other => Err(ParseError::UnknownSlot(other.to_string())),
        }
    }
}
