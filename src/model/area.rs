// File: ./src/model/area.rs
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Fallback for habits without a category, or with one we don't know.
/// Same value as spirituality on purpose.
pub const DEFAULT_AREA_COLOR: &str = "#9b87f5";

/// The five life domains habits, tasks and goals are tagged with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Area {
    Health,
    Business,
    Family,
    Spirituality,
    Finances,
}

impl Area {
    pub fn color(&self) -> &'static str {
        match self {
            Area::Health => "#34A853",
            Area::Business => "#4285F4",
            Area::Finances => "#FBBC04",
            Area::Spirituality => "#9b87f5",
            Area::Family => "#FF9500",
        }
    }

    pub fn all() -> Vec<Area> {
        Area::iter().collect()
    }
}

/// Display color for a stored category string. Only the exact lowercase
/// area names match; anything else gets the default. Never fails.
pub fn category_color(category: Option<&str>) -> &'static str {
    category
        .and_then(|c| Area::from_str(c).ok())
        .map(|a| a.color())
        .unwrap_or(DEFAULT_AREA_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_map_to_their_color() {
        assert_eq!(category_color(Some("health")), "#34A853");
        assert_eq!(category_color(Some("business")), "#4285F4");
        assert_eq!(category_color(Some("finances")), "#FBBC04");
        assert_eq!(category_color(Some("spirituality")), "#9b87f5");
        assert_eq!(category_color(Some("family")), "#FF9500");
    }

    #[test]
    fn unknown_or_missing_category_uses_default() {
        assert_eq!(category_color(None), DEFAULT_AREA_COLOR);
        assert_eq!(category_color(Some("social")), DEFAULT_AREA_COLOR);
        assert_eq!(category_color(Some("")), DEFAULT_AREA_COLOR);
    }

    #[test]
    fn only_exact_lowercase_names_match() {
        assert_eq!(Area::from_str("health").ok(), Some(Area::Health));
        assert_eq!(Area::from_str("Health").ok(), None);
        assert_eq!(category_color(Some("Health")), DEFAULT_AREA_COLOR);
        assert_eq!(category_color(Some(" health ")), DEFAULT_AREA_COLOR);
        assert_eq!(category_color(Some("FAMILY")), DEFAULT_AREA_COLOR);
        assert_eq!(Area::all().len(), 5);
    }
}
