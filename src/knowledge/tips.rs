//! Personalized health tips and diet guidance.

use serde::Serialize;

use crate::data::FeatureVector;
use crate::model::Condition;

/// Tips are capped so the caller shows only the most relevant guidance.
const MAX_TIPS: usize = 8;

const GENERAL_TIPS: &[&str] = &[
    "Maintain a healthy weight and BMI",
    "Exercise regularly (at least 150 minutes of moderate activity per week)",
    "Follow a heart-healthy diet",
    "Quit smoking and avoid secondhand smoke",
    "Limit alcohol consumption",
    "Manage stress through relaxation techniques",
    "Get adequate sleep (7-9 hours per night)",
    "Monitor blood pressure regularly",
    "Take medications as prescribed by your doctor",
];

fn condition_tips(condition: Condition) -> &'static [&'static str] {
    match condition {
        Condition::CoronaryArteryDisease => &[
            "Monitor cholesterol levels regularly",
            "Control blood sugar if diabetic",
            "Consider cardiac rehabilitation programs",
            "Learn to recognize signs of heart attack",
        ],
        Condition::Arrhythmia => &[
            "Avoid excessive caffeine and stimulants",
            "Practice stress management techniques",
            "Monitor heart rate regularly",
            "Avoid triggers that cause irregular heartbeat",
        ],
        Condition::HeartFailure => &[
            "Monitor daily weight for sudden changes",
            "Limit sodium intake to less than 2,300mg per day",
            "Monitor fluid intake as recommended by doctor",
            "Elevate legs when resting to reduce swelling",
        ],
        Condition::ValveDisease => &[
            "Follow antibiotic prophylaxis if recommended",
            "Inform dentist and doctors about valve condition",
            "Monitor for signs of infection",
            "Regular echocardiograms as recommended",
        ],
        Condition::Cardiomyopathy => &[
            "Avoid alcohol completely if alcohol-induced",
            "Monitor for signs of heart failure",
            "Consider genetic counseling if hereditary",
            "Regular monitoring with cardiologist",
        ],
        Condition::Hypertension => &[
            "Check blood pressure regularly at home",
            "Reduce sodium intake significantly",
            "Increase potassium-rich foods",
            "Practice meditation or deep breathing exercises",
        ],
    }
}

/// Personalized health tips: advice keyed to the patient's own inputs first,
/// then condition-specific guidance, then general guidance as filler, capped
/// at the most relevant.
pub fn health_tips(condition: Condition, features: &FeatureVector) -> Vec<String> {
    let mut tips: Vec<String> = Vec::new();

    if matches!(features.get("age"), Some(&age) if age > 65.0) {
        tips.push("Regular health screenings are especially important at your age".to_string());
    }
    match features.get("bmi") {
        Some(&bmi) if bmi > 30.0 => tips.push(
            "Weight management is crucial - consider consulting a nutritionist".to_string(),
        ),
        Some(&bmi) if bmi < 18.5 => {
            tips.push("Maintain adequate nutrition to support heart health".to_string())
        }
        _ => {}
    }
    if features.get("smoking") == Some(&1.0) {
        tips.push(
            "Quitting smoking is the single most important step for your heart health".to_string(),
        );
    }
    if matches!(features.get("stress_level"), Some(&stress) if stress > 7.0) {
        tips.push(
            "High stress levels require immediate attention - consider counseling or stress \
             management programs"
                .to_string(),
        );
    }
    if matches!(features.get("physical_activity"), Some(&activity) if activity < 3.0) {
        tips.push(
            "Gradually increase physical activity with your doctor's guidance".to_string(),
        );
    }

    tips.extend(condition_tips(condition).iter().map(|t| t.to_string()));
    tips.extend(GENERAL_TIPS.iter().map(|t| t.to_string()));

    tips.truncate(MAX_TIPS);
    tips
}

/// Diet guidance for one condition, combining general lists with
/// condition-specific focus and patient-personalized sections.
#[derive(Debug, Clone, Serialize)]
pub struct DietRecommendations {
    pub foods_to_include: &'static [&'static str],
    pub foods_to_limit: &'static [&'static str],
    pub focus: Option<&'static str>,
    pub special_foods: &'static [&'static str],
    pub avoid: &'static [&'static str],
    pub personalized: Vec<PersonalizedDiet>,
    pub meal_planning_tips: &'static [&'static str],
}

/// A personalized diet section triggered by the patient's own inputs.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizedDiet {
    pub topic: &'static str,
    pub advice: &'static [&'static str],
}

const FOODS_TO_INCLUDE: &[&str] = &[
    "Fatty fish (salmon, mackerel, sardines) - 2-3 times per week",
    "Leafy green vegetables (spinach, kale, collard greens)",
    "Whole grains (oats, brown rice, quinoa)",
    "Berries and other antioxidant-rich fruits",
    "Nuts and seeds (almonds, walnuts, flaxseeds)",
    "Legumes (beans, lentils, chickpeas)",
    "Avocados and olive oil",
    "Low-fat dairy or plant-based alternatives",
];

const FOODS_TO_LIMIT: &[&str] = &[
    "Processed and packaged foods high in sodium",
    "Red meat and processed meats",
    "Sugary drinks and desserts",
    "Trans fats and saturated fats",
    "Refined grains and white bread",
    "Excessive alcohol",
    "High-sodium condiments and sauces",
];

const MEAL_PLANNING_TIPS: &[&str] = &[
    "Plan meals in advance",
    "Cook at home more often",
    "Read nutrition labels carefully",
    "Use herbs and spices instead of salt",
    "Eat regular, balanced meals",
    "Stay hydrated with water",
];

fn condition_diet(condition: Condition) -> (Option<&'static str>, &'static [&'static str], &'static [&'static str]) {
    match condition {
        Condition::CoronaryArteryDisease => (
            Some("Lower cholesterol and reduce inflammation"),
            &[
                "Oatmeal with soluble fiber",
                "Plant sterols and stanols",
                "Soy protein foods",
                "Green tea",
            ],
            &[
                "Foods high in saturated fat",
                "Trans fats",
                "Excess dietary cholesterol",
            ],
        ),
        Condition::Hypertension => (
            Some("Reduce sodium and increase potassium"),
            &[
                "Bananas and potassium-rich fruits",
                "Dark chocolate (in moderation)",
                "Beets and beet juice",
                "Garlic and herbs for flavoring",
            ],
            &[
                "High-sodium processed foods",
                "Canned soups with added salt",
                "Pickled foods",
                "Restaurant and fast foods",
            ],
        ),
        Condition::HeartFailure => (
            Some("Manage fluid retention and sodium"),
            &[
                "Fresh fruits and vegetables",
                "Lean proteins",
                "Herbs and spices for flavor",
            ],
            &[
                "Excessive fluids if restricted",
                "High-sodium foods",
                "Canned vegetables with added salt",
            ],
        ),
        Condition::Arrhythmia => (
            Some("Avoid triggers and maintain electrolyte balance"),
            &[
                "Magnesium-rich foods (dark chocolate, nuts)",
                "Potassium-rich foods",
                "Omega-3 fatty acids",
            ],
            &[
                "Excessive caffeine",
                "Energy drinks",
                "Large meals",
                "Alcohol if it triggers symptoms",
            ],
        ),
        // No dedicated dietary protocol; the general guidance applies
        Condition::ValveDisease | Condition::Cardiomyopathy => (None, &[], &[]),
    }
}

/// Personalized diet recommendations for a condition and patient.
pub fn diet_recommendations(condition: Condition, features: &FeatureVector) -> DietRecommendations {
    let (focus, special_foods, avoid) = condition_diet(condition);

    let mut personalized = Vec::new();
    if matches!(features.get("bmi"), Some(&bmi) if bmi > 30.0) {
        personalized.push(PersonalizedDiet {
            topic: "weight_management",
            advice: &[
                "Focus on portion control",
                "Increase fiber intake to feel full",
                "Choose nutrient-dense, low-calorie foods",
                "Consider consulting a registered dietitian",
            ],
        });
    }
    if features.get("diabetes") == Some(&1.0) {
        personalized.push(PersonalizedDiet {
            topic: "diabetes_friendly",
            advice: &[
                "Choose complex carbohydrates",
                "Monitor blood sugar regularly",
                "Include protein with each meal",
                "Limit simple sugars and refined carbs",
            ],
        });
    }
    if matches!(features.get("age"), Some(&age) if age > 65.0) {
        personalized.push(PersonalizedDiet {
            topic: "senior_nutrition",
            advice: &[
                "Ensure adequate protein intake",
                "Consider vitamin D and B12 supplements",
                "Stay hydrated",
                "Choose foods easy to chew and digest",
            ],
        });
    }

    DietRecommendations {
        foods_to_include: FOODS_TO_INCLUDE,
        foods_to_limit: FOODS_TO_LIMIT,
        focus,
        special_foods,
        avoid,
        personalized,
        meal_planning_tips: MEAL_PLANNING_TIPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tips_are_capped() {
        let mut features = FeatureVector::new();
        features.insert("age".to_string(), 70.0);
        features.insert("bmi".to_string(), 32.0);
        features.insert("smoking".to_string(), 1.0);
        features.insert("stress_level".to_string(), 9.0);
        features.insert("physical_activity".to_string(), 1.0);

        for condition in Condition::ALL {
            let tips = health_tips(condition, &features);
            assert!(tips.len() <= MAX_TIPS);
            assert!(!tips.is_empty());
        }
    }

    #[test]
    fn test_smoker_gets_cessation_tip_first() {
        let mut features = FeatureVector::new();
        features.insert("smoking".to_string(), 1.0);
        let tips = health_tips(Condition::CoronaryArteryDisease, &features);
        assert_eq!(tips.len(), MAX_TIPS);
        assert!(tips[0].contains("Quitting smoking"));
    }

    #[test]
    fn test_no_flags_falls_back_to_condition_and_general_tips() {
        let tips = health_tips(Condition::Arrhythmia, &FeatureVector::new());
        assert_eq!(tips.len(), MAX_TIPS);
        assert!(tips[0].contains("caffeine"));
    }

    #[test]
    fn test_diet_personalization_triggers() {
        let mut features = FeatureVector::new();
        features.insert("bmi".to_string(), 31.0);
        features.insert("diabetes".to_string(), 1.0);
        features.insert("age".to_string(), 70.0);

        let diet = diet_recommendations(Condition::Hypertension, &features);
        let topics: Vec<&str> = diet.personalized.iter().map(|p| p.topic).collect();
        assert_eq!(
            topics,
            vec!["weight_management", "diabetes_friendly", "senior_nutrition"]
        );
        assert_eq!(diet.focus, Some("Reduce sodium and increase potassium"));
    }

    #[test]
    fn test_conditions_without_protocol_fall_back_to_general() {
        let diet = diet_recommendations(Condition::ValveDisease, &FeatureVector::new());
        assert!(diet.focus.is_none());
        assert!(diet.special_foods.is_empty());
        assert!(!diet.foods_to_include.is_empty());
        assert!(diet.personalized.is_empty());
    }
}
