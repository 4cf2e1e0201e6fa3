// src/domain/style.rs
use serde::Serialize;

use crate::domain::slot::SlotState;
use crate::domain::spot::{compute_aggregate_state, Spot};

pub const FEATURE_WEIGHT: u8 = 2;

/// Line style handed to the map widget for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureStyle {
    pub color: &'static str,
    pub weight: u8,
}

pub fn state_color(state: SlotState) -> &'static str {
    match state {
        SlotState::Blocked => "red",
        SlotState::Reserved => "yellow",
        SlotState::Available => "green",
    }
}

pub fn style_for(spot: &Spot) -> FeatureStyle {
    FeatureStyle {
        color: state_color(compute_aggregate_state(spot)),
        weight: FEATURE_WEIGHT,
    }
}
