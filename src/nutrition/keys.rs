use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientGroup {
    Energy,
    Macro,
    Micro,
}

/// Every nutrient the service tracks, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NutrientKey {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    // vitamins
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    VitaminB1,
    VitaminB2,
    VitaminB3,
    VitaminB5,
    VitaminB6,
    Biotin,
    Folate,
    VitaminB12,
    // minerals
    Calcium,
    Iron,
    Magnesium,
    Potassium,
    Sodium,
    Zinc,
    Copper,
    Manganese,
    Selenium,
    Iodine,
    Phosphorus,
}

impl NutrientKey {
    pub const ALL: [NutrientKey; 29] = [
        NutrientKey::Calories,
        NutrientKey::Protein,
        NutrientKey::Carbs,
        NutrientKey::Fat,
        NutrientKey::Fiber,
        NutrientKey::VitaminA,
        NutrientKey::VitaminC,
        NutrientKey::VitaminD,
        NutrientKey::VitaminE,
        NutrientKey::VitaminK,
        NutrientKey::VitaminB1,
        NutrientKey::VitaminB2,
        NutrientKey::VitaminB3,
        NutrientKey::VitaminB5,
        NutrientKey::VitaminB6,
        NutrientKey::Biotin,
        NutrientKey::Folate,
        NutrientKey::VitaminB12,
        NutrientKey::Calcium,
        NutrientKey::Iron,
        NutrientKey::Magnesium,
        NutrientKey::Potassium,
        NutrientKey::Sodium,
        NutrientKey::Zinc,
        NutrientKey::Copper,
        NutrientKey::Manganese,
        NutrientKey::Selenium,
        NutrientKey::Iodine,
        NutrientKey::Phosphorus,
    ];

    pub const MACROS: [NutrientKey; 4] = [
        NutrientKey::Protein,
        NutrientKey::Carbs,
        NutrientKey::Fat,
        NutrientKey::Fiber,
    ];

    /// The key used in JSON documents (`"vitaminB12"`, `"calories"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            NutrientKey::Calories => "calories",
            NutrientKey::Protein => "protein",
            NutrientKey::Carbs => "carbs",
            NutrientKey::Fat => "fat",
            NutrientKey::Fiber => "fiber",
            NutrientKey::VitaminA => "vitaminA",
            NutrientKey::VitaminC => "vitaminC",
            NutrientKey::VitaminD => "vitaminD",
            NutrientKey::VitaminE => "vitaminE",
            NutrientKey::VitaminK => "vitaminK",
            NutrientKey::VitaminB1 => "vitaminB1",
            NutrientKey::VitaminB2 => "vitaminB2",
            NutrientKey::VitaminB3 => "vitaminB3",
            NutrientKey::VitaminB5 => "vitaminB5",
            NutrientKey::VitaminB6 => "vitaminB6",
            NutrientKey::Biotin => "biotin",
            NutrientKey::Folate => "folate",
            NutrientKey::VitaminB12 => "vitaminB12",
            NutrientKey::Calcium => "calcium",
            NutrientKey::Iron => "iron",
            NutrientKey::Magnesium => "magnesium",
            NutrientKey::Potassium => "potassium",
            NutrientKey::Sodium => "sodium",
            NutrientKey::Zinc => "zinc",
            NutrientKey::Copper => "copper",
            NutrientKey::Manganese => "manganese",
            NutrientKey::Selenium => "selenium",
            NutrientKey::Iodine => "iodine",
            NutrientKey::Phosphorus => "phosphorus",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NutrientKey::Calories => "Calories",
            NutrientKey::Protein => "Protein",
            NutrientKey::Carbs => "Carbohydrates",
            NutrientKey::Fat => "Fat",
            NutrientKey::Fiber => "Fiber",
            NutrientKey::VitaminA => "Vitamin A",
            NutrientKey::VitaminC => "Vitamin C",
            NutrientKey::VitaminD => "Vitamin D",
            NutrientKey::VitaminE => "Vitamin E",
            NutrientKey::VitaminK => "Vitamin K",
            NutrientKey::VitaminB1 => "Vitamin B1",
            NutrientKey::VitaminB2 => "Vitamin B2",
            NutrientKey::VitaminB3 => "Vitamin B3",
            NutrientKey::VitaminB5 => "Vitamin B5",
            NutrientKey::VitaminB6 => "Vitamin B6",
            NutrientKey::Biotin => "Biotin",
            NutrientKey::Folate => "Folate",
            NutrientKey::VitaminB12 => "Vitamin B12",
            NutrientKey::Calcium => "Calcium",
            NutrientKey::Iron => "Iron",
            NutrientKey::Magnesium => "Magnesium",
            NutrientKey::Potassium => "Potassium",
            NutrientKey::Sodium => "Sodium",
            NutrientKey::Zinc => "Zinc",
            NutrientKey::Copper => "Copper",
            NutrientKey::Manganese => "Manganese",
            NutrientKey::Selenium => "Selenium",
            NutrientKey::Iodine => "Iodine",
            NutrientKey::Phosphorus => "Phosphorus",
        }
    }

    pub fn unit(self) -> &'static str {
        use NutrientKey::*;
        match self {
            Calories => "kcal",
            Protein | Carbs | Fat | Fiber => "g",
            VitaminA | VitaminD | VitaminK | Biotin | Folate | VitaminB12 | Copper | Selenium
            | Iodine => "mcg",
            VitaminC | VitaminE | VitaminB1 | VitaminB2 | VitaminB3 | VitaminB5 | VitaminB6
            | Calcium | Iron | Magnesium | Potassium | Sodium | Zinc | Manganese | Phosphorus => {
                "mg"
            }
        }
    }

    pub fn group(self) -> NutrientGroup {
        match self {
            NutrientKey::Calories => NutrientGroup::Energy,
            k if Self::MACROS.contains(&k) => NutrientGroup::Macro,
            _ => NutrientGroup::Micro,
        }
    }
}

impl std::fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
