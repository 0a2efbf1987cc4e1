//! Domain DTOs and filter types for the character API.
//!
//! # Design
//! `Character` mirrors the remote schema but only the fields the screen
//! shows; serde ignores the rest. Filters are closed enums with an explicit
//! `All` variant, so an invalid filter value cannot be constructed while the
//! wire strings stay the ones the remote API expects.

use serde::{Deserialize, Serialize};

/// A single character as returned by the API.
///
/// `status`, `species` and `gender` are kept as open strings: the remote
/// service owns their vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub image: String,
}

/// Response envelope of the collection endpoint. Pagination info and any
/// other envelope fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterPage {
    pub results: Vec<Character>,
}

/// A picker-selectable filter dimension.
pub trait FilterChoice: Copy + Eq + Default + 'static {
    /// Query parameter name.
    const PARAM: &'static str;
    /// Button text shown while the filter is unset.
    const PLACEHOLDER: &'static str;
    /// Selectable values in display order, excluding `All`.
    const CANDIDATES: &'static [Self];

    /// Wire value, or `None` for the unset variant.
    fn as_query_value(self) -> Option<&'static str>;

    fn is_all(self) -> bool {
        self.as_query_value().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenderFilter {
    #[default]
    All,
    Male,
    Female,
    Genderless,
    Unknown,
}

impl FilterChoice for GenderFilter {
    const PARAM: &'static str = "gender";
    const PLACEHOLDER: &'static str = "Gender";
    const CANDIDATES: &'static [Self] = &[
        GenderFilter::Male,
        GenderFilter::Female,
        GenderFilter::Genderless,
        GenderFilter::Unknown,
    ];

    fn as_query_value(self) -> Option<&'static str> {
        match self {
            GenderFilter::All => None,
            GenderFilter::Male => Some("male"),
            GenderFilter::Female => Some("female"),
            GenderFilter::Genderless => Some("genderless"),
            GenderFilter::Unknown => Some("unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Alive,
    Dead,
    Unknown,
}

impl FilterChoice for StatusFilter {
    const PARAM: &'static str = "status";
    const PLACEHOLDER: &'static str = "Status";
    const CANDIDATES: &'static [Self] = &[StatusFilter::Alive, StatusFilter::Dead, StatusFilter::Unknown];

    fn as_query_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Alive => Some("alive"),
            StatusFilter::Dead => Some("dead"),
            StatusFilter::Unknown => Some("unknown"),
        }
    }
}

/// The filter pair a fetch is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Filters {
    pub gender: GenderFilter,
    pub status: StatusFilter,
}

impl Filters {
    pub fn new(gender: GenderFilter, status: StatusFilter) -> Self {
        Self { gender, status }
    }

    /// Query pairs for the set filters only, gender first.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [
            (GenderFilter::PARAM, self.gender.as_query_value()),
            (StatusFilter::PARAM, self.status.as_query_value()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.to_string())))
        .collect()
    }
}
