//! Library of Congress "part of" collections used as search facets
//!
//! The ordinal positions in [`PARTOF_V0`] are part of the persisted parameter
//! format: version 0 parameters stored an index into this list. Never reorder
//! or remove entries; append only, and only together with a new params version.
//!
//! Full list of collections: <https://www.loc.gov/search/index/partof/>

/// Sentinel key meaning "no category filter applied"
pub const NO_FILTER: &str = "";

/// Category keys in their v0 ordinal order. Position 0 is always [`NO_FILTER`].
pub const PARTOF_V0: [&str; 7] = [
    NO_FILTER,
    "bills",
    "house_bills",
    "senate_bills",
    "house_resolutions",
    "senate_resolutions",
    "federal_register",
];

/// Look up a category key by its v0 ordinal.
///
/// Negative and out-of-range indices resolve to [`NO_FILTER`].
pub fn key_for_index(index: i64) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| PARTOF_V0.get(i).copied())
        .unwrap_or(NO_FILTER)
}

/// Convert a category key into the value used in the `fa=partof:` facet.
///
/// Returns `None` for the "no filter" sentinel.
pub fn facet_value(key: &str) -> Option<String> {
    let key = key.trim();
    if key == NO_FILTER {
        None
    } else {
        Some(key.replace('_', " "))
    }
}

/// Known categories, for callers that want a closed set (CLI arguments, tool schemas)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bills,
    HouseBills,
    SenateBills,
    HouseResolutions,
    SenateResolutions,
    FederalRegister,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Bills,
        Category::HouseBills,
        Category::SenateBills,
        Category::HouseResolutions,
        Category::SenateResolutions,
        Category::FederalRegister,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Bills => PARTOF_V0[1],
            Category::HouseBills => PARTOF_V0[2],
            Category::SenateBills => PARTOF_V0[3],
            Category::HouseResolutions => PARTOF_V0[4],
            Category::SenateResolutions => PARTOF_V0[5],
            Category::FederalRegister => PARTOF_V0[6],
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}
