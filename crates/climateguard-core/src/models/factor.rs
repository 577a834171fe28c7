use serde::Serialize;

use super::EmissionCategory;

/// Authority identifier for a goods category, plus its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmissionFactor {
    pub id: &'static str,
    pub name: &'static str,
}

const ELECTRONICS: EmissionFactor = EmissionFactor {
    id: "consumer_goods-type_electronics",
    name: "Electronics",
};
const TEXTILES: EmissionFactor = EmissionFactor {
    id: "consumer_goods-type_textiles",
    name: "Clothing and textiles",
};
const WOODEN_FURNITURE: EmissionFactor = EmissionFactor {
    id: "consumer_goods-type_wooden_furniture",
    name: "Wooden furniture",
};
const FOOD: EmissionFactor = EmissionFactor {
    id: "consumer_goods-type_food",
    name: "Food products",
};
const OTHER: EmissionFactor = EmissionFactor {
    id: "consumer_goods-type_other",
    name: "Other consumer goods",
};

impl EmissionFactor {
    pub fn for_category(category: EmissionCategory) -> Self {
        match category {
            EmissionCategory::Electronics => ELECTRONICS,
            EmissionCategory::Clothing => TEXTILES,
            EmissionCategory::Furniture => WOODEN_FURNITURE,
            EmissionCategory::Food => FOOD,
            EmissionCategory::Media
            | EmissionCategory::Entertainment
            | EmissionCategory::Toys
            | EmissionCategory::PersonalCare
            | EmissionCategory::General => OTHER,
        }
    }

    /// Resolve by category name; unknown names get the general factor.
    pub fn for_category_name(name: &str) -> Self {
        Self::for_category(EmissionCategory::from_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_factor() {
        for c in EmissionCategory::ALL {
            let f = EmissionFactor::for_category(c);
            assert!(f.id.starts_with("consumer_goods-type_"));
        }
    }

    #[test]
    fn unknown_name_resolves_to_general() {
        assert_eq!(
            EmissionFactor::for_category_name("spaceships"),
            EmissionFactor::for_category(EmissionCategory::General)
        );
        assert_eq!(
            EmissionFactor::for_category_name("furniture").name,
            "Wooden furniture"
        );
    }
}
