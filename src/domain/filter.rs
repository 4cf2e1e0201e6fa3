// src/domain/filter.rs
use std::str::FromStr;

use crate::domain::slot::SlotState;
use crate::domain::spot::{compute_aggregate_state, Spot};
use crate::domain::ParseError;

fn is_all(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("todos") || s.eq_ignore_ascii_case("all")
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn parse(s: &str) -> Self {
        if is_all(s) {
            TypeFilter::All
        } else {
            TypeFilter::Only(s.trim().to_string())
        }
    }

    pub fn matches(&self, spot: &Spot) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => spot.kind == *kind,
        }
    }

    /// Query-string value, `todos` for no filter.
    pub fn as_param(&self) -> &str {
        match self {
            TypeFilter::All => "todos",
            TypeFilter::Only(kind) => kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    All,
    Only(SlotState),
}

impl StateFilter {
    pub fn matches(&self, spot: &Spot) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Only(state) => compute_aggregate_state(spot) == *state,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            StateFilter::All => "todos",
            StateFilter::Only(state) => state.as_str(),
        }
    }
}

impl FromStr for StateFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_all(s) {
            return Ok(StateFilter::All);
        }
        s.parse().map(StateFilter::Only)
    }
}

/// Spots passing both filters. Recomputed from scratch on every call.
pub fn apply_filter<'a, I>(spots: I, type_filter: &TypeFilter, state_filter: StateFilter) -> Vec<&'a Spot>
where
    I: IntoIterator<Item = &'a Spot>,
{
    spots
        .into_iter()
        .filter(|spot| type_filter.matches(spot) && state_filter.matches(spot))
        .collect()
}
