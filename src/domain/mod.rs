//! Domain primitives for recipe discovery.
//!
//! Search criteria, provider filter kinds and the validated review rating
//! live here so the API, CLI and services share one vocabulary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A review rating, guaranteed to lie in `1..=5`.
///
/// # Examples
///
/// ```rust
/// use gitchen::domain::Rating;
///
/// let rating = Rating::new(4).unwrap();
/// assert_eq!(rating.value(), 4);
/// assert!(Rating::new(0).is_none());
/// assert!(Rating::new(6).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    #[must_use]
    pub const fn new(value: i32) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Rating {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "Rating must be an integer between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )
        })
    }
}

/// Which provider filter endpoint to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Category,
    Area,
    Ingredient,
}

impl FilterKind {
    /// Query parameter the provider expects for this filter.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Category => "c",
            Self::Area => "a",
            Self::Ingredient => "i",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Category => "category",
            Self::Area => "area",
            Self::Ingredient => "ingredient",
        };
        f.write_str(s)
    }
}

/// One way of asking the search engine for recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    ByName(String),
    ByFirstLetter(char),
    ByCategory(String),
    ByArea(String),
    ByIngredient(String),
    /// Recipes containing every ingredient in the set.
    ByIngredientSet(BTreeSet<String>),
    RandomSample(usize),
}

impl SearchCriteria {
    /// Builds an ingredient-set criterion from a comma separated list,
    /// trimming entries and skipping blanks.
    ///
    /// ```rust
    /// use gitchen::domain::SearchCriteria;
    ///
    /// let criteria = SearchCriteria::ingredient_set_from_csv("egg, milk,,egg");
    /// match criteria {
    ///     SearchCriteria::ByIngredientSet(set) => assert_eq!(set.len(), 2),
    ///     _ => unreachable!(),
    /// }
    /// ```
    #[must_use]
    pub fn ingredient_set_from_csv(raw: &str) -> Self {
        let set = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        Self::ByIngredientSet(set)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ByName(_) => "name",
            Self::ByFirstLetter(_) => "letter",
            Self::ByCategory(_) => "category",
            Self::ByArea(_) => "area",
            Self::ByIngredient(_) => "ingredient",
            Self::ByIngredientSet(_) => "ingredient_set",
            Self::RandomSample(_) => "random",
        }
    }
}
