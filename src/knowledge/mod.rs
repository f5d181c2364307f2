//! Static medical knowledge base.
//!
//! Descriptive text, symptom/cause/complication lists, and personalized
//! lifestyle guidance keyed by condition. Consumes the pipeline's condition
//! identifiers; the prediction core never depends on this module.

pub mod tips;

pub use tips::{diet_recommendations, health_tips, DietRecommendations};

use serde::Serialize;

use crate::model::Condition;

/// Descriptive information about one heart condition.
#[derive(Debug, Clone, Serialize)]
pub struct DiseaseInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub symptoms: &'static [&'static str],
    pub causes: &'static [&'static str],
    pub complications: &'static [&'static str],
}

/// Detailed information for a heart condition.
pub fn disease_info(condition: Condition) -> DiseaseInfo {
    match condition {
        Condition::CoronaryArteryDisease => DiseaseInfo {
            name: "Coronary Artery Disease (CAD)",
            description: "A condition where the coronary arteries become narrowed or blocked \
                          due to plaque buildup, reducing blood flow to the heart muscle.",
            symptoms: &[
                "Chest pain or discomfort (angina)",
                "Shortness of breath",
                "Fatigue during physical activity",
                "Heart palpitations",
                "Nausea or dizziness",
            ],
            causes: &[
                "High cholesterol levels",
                "High blood pressure",
                "Smoking",
                "Diabetes",
                "Family history of heart disease",
                "Sedentary lifestyle",
                "Obesity",
            ],
            complications: &[
                "Heart attack (myocardial infarction)",
                "Heart failure",
                "Irregular heart rhythms",
                "Sudden cardiac death",
            ],
        },
        Condition::Arrhythmia => DiseaseInfo {
            name: "Heart Arrhythmia",
            description: "An irregular heartbeat that occurs when the electrical impulses that \
                          coordinate heartbeats don't work properly.",
            symptoms: &[
                "Heart palpitations",
                "Rapid or slow heartbeat",
                "Chest pain",
                "Shortness of breath",
                "Dizziness or lightheadedness",
                "Fainting or near-fainting",
            ],
            causes: &[
                "Heart disease",
                "High blood pressure",
                "Diabetes",
                "Smoking",
                "Excessive alcohol or caffeine",
                "Stress",
                "Certain medications",
            ],
            complications: &[
                "Stroke",
                "Heart failure",
                "Sudden cardiac arrest",
                "Blood clots",
            ],
        },
        Condition::HeartFailure => DiseaseInfo {
            name: "Heart Failure",
            description: "A condition where the heart cannot pump blood effectively to meet the \
                          body's needs for blood and oxygen.",
            symptoms: &[
                "Shortness of breath",
                "Fatigue and weakness",
                "Swelling in legs, ankles, and feet",
                "Rapid or irregular heartbeat",
                "Persistent cough with white or pink phlegm",
                "Sudden weight gain",
            ],
            causes: &[
                "Coronary artery disease",
                "High blood pressure",
                "Heart attack",
                "Cardiomyopathy",
                "Heart valve disease",
                "Diabetes",
            ],
            complications: &[
                "Kidney damage",
                "Liver damage",
                "Malnutrition",
                "Pulmonary edema",
                "Sudden cardiac death",
            ],
        },
        Condition::ValveDisease => DiseaseInfo {
            name: "Heart Valve Disease",
            description: "A condition where one or more heart valves don't work properly, \
                          affecting blood flow through the heart.",
            symptoms: &[
                "Shortness of breath",
                "Chest pain",
                "Fatigue",
                "Dizziness or fainting",
                "Heart palpitations",
                "Swelling in ankles or feet",
            ],
            causes: &[
                "Congenital heart defects",
                "Rheumatic fever",
                "Infections",
                "Age-related wear and tear",
                "High blood pressure",
                "Heart attack",
            ],
            complications: &[
                "Heart failure",
                "Stroke",
                "Blood clots",
                "Irregular heart rhythms",
                "Sudden cardiac death",
            ],
        },
        Condition::Cardiomyopathy => DiseaseInfo {
            name: "Cardiomyopathy",
            description: "A disease of the heart muscle that makes it harder for the heart to \
                          pump blood to the rest of the body.",
            symptoms: &[
                "Shortness of breath",
                "Fatigue",
                "Swelling in legs and feet",
                "Irregular heartbeat",
                "Dizziness or lightheadedness",
                "Chest pain",
            ],
            causes: &[
                "Genetic factors",
                "High blood pressure",
                "Heart attacks",
                "Viral infections",
                "Alcohol abuse",
                "Chemotherapy drugs",
            ],
            complications: &[
                "Heart failure",
                "Blood clots",
                "Heart valve problems",
                "Sudden cardiac arrest",
            ],
        },
        Condition::Hypertension => DiseaseInfo {
            name: "Hypertension (High Blood Pressure)",
            description: "A condition where blood pressure in the arteries is persistently \
                          elevated, forcing the heart to work harder.",
            symptoms: &[
                "Often no symptoms (silent killer)",
                "Headaches",
                "Shortness of breath",
                "Chest pain",
                "Dizziness",
                "Nosebleeds",
            ],
            causes: &[
                "Unhealthy diet (high sodium)",
                "Lack of physical activity",
                "Obesity",
                "Smoking",
                "Excessive alcohol consumption",
                "Stress",
                "Family history",
            ],
            complications: &[
                "Heart attack",
                "Stroke",
                "Heart failure",
                "Kidney disease",
                "Vision problems",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_condition_has_complete_info() {
        for condition in Condition::ALL {
            let info = disease_info(condition);
            assert!(!info.name.is_empty());
            assert!(!info.description.is_empty());
            assert!(!info.symptoms.is_empty());
            assert!(!info.causes.is_empty());
            assert!(!info.complications.is_empty());
        }
    }
}
