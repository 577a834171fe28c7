//! Ordered keyword rules mapping product text to an emission category.
//!
//! The first matching rule wins, so keywords shared between groups resolve
//! to the earlier group: "coffee table" and "coffee beans" are both furniture,
//! "board game" is entertainment.

use climateguard_core::EmissionCategory;

const RULES: &[(EmissionCategory, &[&str])] = &[
    (
        EmissionCategory::Electronics,
        &[
            "iphone", "samsung", "phone", "smartphone", "mobile", "android", "pixel",
            "laptop", "macbook", "computer", "notebook", "desktop", "mac pro",
            "tablet", "ipad", "surface", "kindle",
            "tv", "television", "monitor", "display", "screen",
            "camera", "dslr", "mirrorless", "canon", "nikon", "sony",
            "headphone", "earbud", "airpod", "speaker", "audio",
            "watch", "smartwatch", "apple watch", "fitbit",
        ],
    ),
    (
        EmissionCategory::Clothing,
        &[
            "shirt", "tshirt", "t-shirt", "blouse", "top",
            "jeans", "pants", "trousers", "leggings",
            "shoes", "sneakers", "footwear", "boots", "sandals", "heels",
            "jacket", "coat", "hoodie", "sweater", "sweatshirt",
            "dress", "skirt", "shorts", "jumper",
            "underwear", "sock", "bra", "lingerie",
        ],
    ),
    (
        EmissionCategory::Furniture,
        &[
            "chair", "sofa", "couch", "recliner", "stool",
            "table", "desk", "dining", "coffee",
            "bed", "mattress", "headboard",
            "wardrobe", "cabinet", "shelf", "bookcase",
            "lamp", "lighting", "chandelier",
        ],
    ),
    (EmissionCategory::Media, &["book", "novel", "magazine", "textbook"]),
    (
        EmissionCategory::Entertainment,
        &["game", "console", "playstation", "xbox", "nintendo", "switch"],
    ),
    (
        EmissionCategory::Food,
        &["food", "grocery", "snack", "beverage", "drink", "coffee", "tea"],
    ),
    (
        EmissionCategory::Toys,
        &["toy", "lego", "doll", "action figure", "game"],
    ),
    (
        EmissionCategory::PersonalCare,
        &["cosmetic", "makeup", "skincare", "perfume", "shampoo"],
    ),
];

/// Classify product text. Total: absent or unmatched text is `General`.
pub fn classify(product_text: Option<&str>) -> EmissionCategory {
    let Some(text) = product_text.map(str::trim).filter(|t| !t.is_empty()) else {
        return EmissionCategory::General;
    };
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(EmissionCategory::General)
}
