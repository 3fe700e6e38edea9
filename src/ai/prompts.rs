use crate::nutrition::NutrientDeficiency;

pub const ESTIMATE_TEMPERATURE: f32 = 0.3;
pub const SUGGEST_TEMPERATURE: f32 = 0.5;

pub const ESTIMATE_SYSTEM: &str = r#"You are a nutritionist assistant. When given a food and quantity, provide accurate nutritional information in JSON format. For each nutrient, include the amount, daily recommended value (DV based on a 2000 calorie diet for adults), and percentage of DV. Always respond with this exact JSON structure:
{
  "calories": { "value": number, "dv": 2000, "percent": number },
  "macros": {
    "protein": { "value": "Xg", "dv": "50g", "percent": number },
    "carbs": { "value": "Xg", "dv": "300g", "percent": number },
    "fat": { "value": "Xg", "dv": "65g", "percent": number },
    "fiber": { "value": "Xg", "dv": "25g", "percent": number }
  },
  "micros": {
    "vitaminA": { "value": "X mcg", "dv": "900 mcg", "percent": number },
    "vitaminC": { "value": "X mg", "dv": "90 mg", "percent": number },
    "vitaminD": { "value": "X mcg", "dv": "20 mcg", "percent": number },
    "vitaminE": { "value": "X mg", "dv": "15 mg", "percent": number },
    "vitaminK": { "value": "X mcg", "dv": "120 mcg", "percent": number },
    "vitaminB1": { "value": "X mg", "dv": "1.1 mg", "percent": number },
    "vitaminB2": { "value": "X mg", "dv": "1.1 mg", "percent": number },
    "vitaminB3": { "value": "X mg", "dv": "14 mg", "percent": number },
    "vitaminB5": { "value": "X mg", "dv": "5 mg", "percent": number },
    "vitaminB6": { "value": "X mg", "dv": "1.3 mg", "percent": number },
    "biotin": { "value": "X mcg", "dv": "30 mcg", "percent": number },
    "folate": { "value": "X mcg", "dv": "400 mcg", "percent": number },
    "vitaminB12": { "value": "X mcg", "dv": "2.4 mcg", "percent": number },
    "calcium": { "value": "X mg", "dv": "1000 mg", "percent": number },
    "iron": { "value": "X mg", "dv": "18 mg", "percent": number },
    "magnesium": { "value": "X mg", "dv": "400 mg", "percent": number },
    "potassium": { "value": "X mg", "dv": "3500 mg", "percent": number },
    "sodium": { "value": "X mg", "dv": "2300 mg", "percent": number },
    "zinc": { "value": "X mg", "dv": "11 mg", "percent": number },
    "copper": { "value": "X mcg", "dv": "900 mcg", "percent": number },
    "manganese": { "value": "X mg", "dv": "1.8 mg", "percent": number },
    "selenium": { "value": "X mcg", "dv": "55 mcg", "percent": number },
    "iodine": { "value": "X mcg", "dv": "150 mcg", "percent": number },
    "phosphorus": { "value": "X mg", "dv": "700 mg", "percent": number }
  }
}
Use 0 for nutrients not present. Only respond with valid JSON, no additional text."#;

pub fn estimate_user(food: &str, quantity: &str) -> String {
    format!("Food: {food}, Quantity: {quantity}")
}

pub fn suggest_system(cuisine: &str) -> String {
    format!(
        r#"You are a nutritionist who suggests foods to cover nutritional gaps.
Given a list of deficient nutrients, suggest 2-3 common, affordable foods for each one.
Prioritize everyday {cuisine} foods.
Include a suggested portion and the estimated contribution to the daily target.

Respond ONLY with valid JSON in this format:
{{
  "suggestions": [
    {{
      "nutrient": "Nutrient name",
      "currentPercentage": number,
      "foods": [
        {{
          "name": "Food name",
          "portion": "Suggested portion (e.g. 100g, 1 unit)",
          "contribution": "provides ~X% of the target"
        }}
      ]
    }}
  ]
}}"#
    )
}

pub fn suggest_user(deficiencies: &[NutrientDeficiency]) -> String {
    let list = deficiencies
        .iter()
        .map(|d| {
            format!(
                "- {}: {}% of target (current: {}{}, target: {}{})",
                d.nutrient, d.percentage, d.current, d.unit, d.target, d.unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Suggest foods to cover these nutritional gaps:\n{list}")
}
