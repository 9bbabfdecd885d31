use serde::{Deserialize, Serialize};
use std::fmt;

/// Food categories with dedicated scoring rules.
///
/// Profiles carry a free-text name; the category set is derived from it by
/// substring matching (`in_name`, `in_name_loose`) so existing profile names
/// such as "Daging Sapi/Ayam" keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    /// Cooked rice.
    Nasi,
    /// Bread.
    Roti,
    Tempe,
    /// Meat and poultry.
    Daging,
    /// Tofu.
    Tahu,
    /// Milk and dairy.
    Susu,
    /// Vegetables.
    Sayur,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Nasi,
        FoodCategory::Roti,
        FoodCategory::Tempe,
        FoodCategory::Daging,
        FoodCategory::Tahu,
        FoodCategory::Susu,
        FoodCategory::Sayur,
    ];

    /// Capitalized marker, matched case-sensitively.
    pub fn marker(&self) -> &'static str {
        match self {
            FoodCategory::Nasi => "Nasi",
            FoodCategory::Roti => "Roti",
            FoodCategory::Tempe => "Tempe",
            FoodCategory::Daging => "Daging",
            FoodCategory::Tahu => "Tahu",
            FoodCategory::Susu => "Susu",
            FoodCategory::Sayur => "Sayur",
        }
    }

    /// Lowercase keyword, matched against a lowercased name.
    pub fn keyword(&self) -> &'static str {
        match self {
            FoodCategory::Nasi => "nasi",
            FoodCategory::Roti => "roti",
            FoodCategory::Tempe => "tempe",
            FoodCategory::Daging => "daging",
            FoodCategory::Tahu => "tahu",
            FoodCategory::Susu => "susu",
            FoodCategory::Sayur => "sayur",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FoodCategory::Nasi => "cooked rice",
            FoodCategory::Roti => "bread",
            FoodCategory::Tempe => "tempeh",
            FoodCategory::Daging => "meat and poultry",
            FoodCategory::Tahu => "tofu",
            FoodCategory::Susu => "milk and dairy",
            FoodCategory::Sayur => "vegetables",
        }
    }

    /// Case-sensitive containment of the marker in a profile name.
    pub fn in_name(&self, name: &str) -> bool {
        name.contains(self.marker())
    }

    /// Case-insensitive containment of the keyword in a profile name.
    pub fn in_name_loose(&self, name: &str) -> bool {
        name.to_lowercase().contains(self.keyword())
    }

    /// Every category whose keyword appears in `name`, ignoring case.
    pub fn all_in_name(name: &str) -> Vec<FoodCategory> {
        let lower = name.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|c| lower.contains(c.keyword()))
            .collect()
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.marker())
    }
}
