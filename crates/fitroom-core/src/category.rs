//! Shape-key categorization for UI panels.

use serde::{Deserialize, Serialize};

use crate::grouping::GroupedShapeKey;

/// Keywords that place a shape key in the general panel.
pub const GENERAL_KEYWORDS: &[&str] = &["height", "weight"];

/// Keywords that place a shape key in the detailed panel.
pub const DETAILED_KEYWORDS: &[&str] = &[
    "bicep",
    "breast",
    "bust",
    "crotch",
    "hand",
    "head",
    "hip_volume",
    "low_hip",
    "high_hip",
    "inseam",
    "neck",
    "shoulder",
    "thigh",
    "under_bust",
    "waist",
];

/// Keywords that place a shape key in the advanced panel.
pub const ADVANCED_KEYWORDS: &[&str] = &["shape", "space", "dips", "curvilinear"];

/// UI panel a shape-key slider is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Whole-body controls (height, weight).
    General,
    /// Body-part measurements.
    Detailed,
    /// Shape-space and curve controls.
    Advanced,
}

impl Category {
    /// Returns the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Detailed => "detailed",
            Category::Advanced => "advanced",
        }
    }

    /// Returns all categories in panel order.
    pub fn all() -> &'static [Category] {
        &[Category::General, Category::Detailed, Category::Advanced]
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::General => GENERAL_KEYWORDS,
            Category::Detailed => DETAILED_KEYWORDS,
            Category::Advanced => ADVANCED_KEYWORDS,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Category::General),
            "detailed" => Ok(Category::Detailed),
            "advanced" => Ok(Category::Advanced),
            _ => Err(format!("unknown category: {}", s)),
        }
    }
}

/// Maps a shape-key name to its UI category.
///
/// Matching is a case-insensitive substring test, checked in the order
/// general, advanced, detailed. Names that match nothing are detailed.
///
/// # Example
/// ```
/// use fitroom_core::category::{categorize, Category};
///
/// assert_eq!(categorize("HeightUp"), Category::General);
/// assert_eq!(categorize("shapeSpace1"), Category::Advanced);
/// assert_eq!(categorize("earLobe"), Category::Detailed);
/// ```
pub fn categorize(name: &str) -> Category {
    let lower = name.to_lowercase();
    [Category::General, Category::Advanced, Category::Detailed]
        .into_iter()
        .find(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
        .unwrap_or(Category::Detailed)
}

/// Grouped sliders routed into their UI panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedGroups {
    pub general: Vec<GroupedShapeKey>,
    pub detailed: Vec<GroupedShapeKey>,
    pub advanced: Vec<GroupedShapeKey>,
}

impl CategorizedGroups {
    /// Returns the sliders of one panel.
    pub fn get(&self, category: Category) -> &[GroupedShapeKey] {
        match category {
            Category::General => &self.general,
            Category::Detailed => &self.detailed,
            Category::Advanced => &self.advanced,
        }
    }

    /// Returns the total number of sliders across panels.
    pub fn len(&self) -> usize {
        self.general.len() + self.detailed.len() + self.advanced.len()
    }

    /// Returns true if every panel is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits grouped sliders into panels, keeping their relative order.
pub fn partition_by_category<'a, I>(groups: I) -> CategorizedGroups
where
    I: IntoIterator<Item = &'a GroupedShapeKey>,
{
    let mut out = CategorizedGroups::default();
    for group in groups {
        match group.category() {
            Category::General => out.general.push(group.clone()),
            Category::Detailed => out.detailed.push(group.clone()),
            Category::Advanced => out.advanced.push(group.clone()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matches() {
        assert_eq!(categorize("height"), Category::General);
        assert_eq!(categorize("WeightDown"), Category::General);
        assert_eq!(categorize("Waist_Circ"), Category::Detailed);
        assert_eq!(categorize("low_hipUp"), Category::Detailed);
        assert_eq!(categorize("curvilinearTorso"), Category::Advanced);
        assert_eq!(categorize("dipsBack"), Category::Advanced);
    }

    #[test]
    fn test_priority_general_before_advanced() {
        assert_eq!(categorize("height_shape"), Category::General);
        assert_eq!(categorize("ShapeWeight"), Category::General);
    }

    #[test]
    fn test_advanced_before_detailed() {
        assert_eq!(categorize("waist_shape"), Category::Advanced);
        assert_eq!(categorize("neckSpace"), Category::Advanced);
    }

    #[test]
    fn test_default_is_detailed() {
        assert_eq!(categorize("earLobe"), Category::Detailed);
        assert_eq!(categorize(""), Category::Detailed);
    }

    #[test]
    fn test_category_from_str() {
        for category in Category::all() {
            assert_eq!(category.as_str().parse::<Category>(), Ok(*category));
        }
        assert!("other".parse::<Category>().is_err());
    }
}
