// src/domain/spot.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::slot::{SlotLabel, SlotState};

/// Occupancy of a spot: one state for the whole spot, or one per slot.
///
/// On the wire this is either a bare string (`"bloqueado"`) or an object
/// (`{"AM": "disponible", "PM": "reservado"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Occupancy {
    Simple(SlotState),
    Composite(BTreeMap<SlotLabel, SlotState>),
}

impl Occupancy {
    /// Collapse the occupancy into a single state.
    ///
    /// Precedence is blocked > all reserved > available. A composite with no
    /// slots counts as available.
    pub fn aggregate(&self) -> SlotState {
        match self {
            Occupancy::Simple(state) => *state,
            Occupancy::Composite(slots) => {
                if slots.values().any(|s| *s == SlotState::Blocked) {
                    SlotState::Blocked
                } else if !slots.is_empty() && slots.values().all(|s| *s == SlotState::Reserved) {
                    SlotState::Reserved
                } else {
                    SlotState::Available
                }
            }
        }
    }

    /// State of a single slot. Simple spots only answer to the whole-spot label.
    pub fn slot(&self, label: SlotLabel) -> Option<SlotState> {
        match self {
            Occupancy::Simple(state) if label == SlotLabel::WHOLE_SPOT => Some(*state),
            Occupancy::Simple(_) => None,
            Occupancy::Composite(slots) => slots.get(&label).copied(),
        }
    }

    /// Overwrite a slot's state. Returns false when the slot does not exist.
    pub fn set_slot(&mut self, label: SlotLabel, state: SlotState) -> bool {
        match self {
            Occupancy::Simple(current) if label == SlotLabel::WHOLE_SPOT => {
                *current = state;
                true
            }
            Occupancy::Simple(_) => false,
            Occupancy::Composite(slots) => match slots.get_mut(&label) {
                Some(current) => {
                    *current = state;
                    true
                }
                None => false,
            },
        }
    }
}

/// A bookable unit of space rendered as a map feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    pub name: String,
    pub kind: String,
    pub price: f64,
    pub occupancy: Occupancy,
    /// Raw GeoJSON geometry, passed through untouched.
    pub geometry: serde_json::Value,
}

impl Spot {
    pub fn aggregate_state(&self) -> SlotState {
        self.occupancy.aggregate()
    }
}

/// Aggregate state of a spot, used for both styling and filtering.
pub fn compute_aggregate_state(spot: &Spot) -> SlotState {
    spot.aggregate_state()
}
