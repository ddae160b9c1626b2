//! Wellness calculators and function suggestion.
//!
//! These are the deterministic "tools" the model is told about in
//! function-calling prompts. Each one is a pure computation returning a
//! typed, serializable result the service can embed verbatim.

use serde::Serialize;

use crate::signals::{Severity, Signals};

/// How soon the person should seek care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Routine,
    Urgent,
    Immediate,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Routine => "routine",
            Urgency::Urgent => "urgent",
            Urgency::Immediate => "immediate",
        }
    }
}

/// Picks which tools are worth advertising for this input. The severity
/// analyzer is always first; the rest are keyed off the tagging pass.
pub fn suggest_functions(signals: &Signals) -> Vec<&'static str> {
    let mut functions = vec!["analyze_symptom_severity"];
    if signals.is_emergency() || !signals.severe_markers.is_empty() {
        functions.push("check_emergency_symptoms");
    }
    if !signals.lifestyle.is_empty() {
        functions.push("get_lifestyle_recommendations");
    }
    if signals.sleep {
        functions.push("assess_sleep_quality");
    }
    if signals.weight {
        functions.push("calculate_bmi");
    }
    if signals.medication {
        functions.push("get_medication_interactions");
    }
    functions
}

#[derive(Debug, Clone, Serialize)]
pub struct SeverityAssessment {
    pub severity: Severity,
    pub urgency: Urgency,
    pub risk_factors: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
    pub follow_up_needed: bool,
}

/// Rates symptom severity on the canonical scale, then escalates for long
/// duration and high self-reported intensity. Intensity never downgrades
/// an emergency.
pub fn analyze_symptom_severity(
    symptoms: &str,
    duration: Option<&str>,
    intensity: Option<u8>,
) -> SeverityAssessment {
    let signals = Signals::scan(symptoms);
    let mut severity = signals.severity();
    let lower = symptoms.to_lowercase();

    if let Some(duration) = duration {
        let duration = duration.to_lowercase();
        if severity == Severity::Mild && (duration.contains("weeks") || duration.contains("months"))
        {
            severity = Severity::Moderate;
        }
    }
    if let Some(intensity) = intensity {
        if intensity >= 8 && severity != Severity::Emergency {
            severity = Severity::Severe;
        }
    }

    let urgency = match severity {
        Severity::Emergency => Urgency::Immediate,
        Severity::Severe => Urgency::Urgent,
        _ => Urgency::Routine,
    };

    let mut risk_factors = Vec::new();
    if lower.contains("chest") {
        risk_factors.push("Cardiovascular concern");
    }
    if lower.contains("headache") && lower.contains("severe") {
        risk_factors.push("Neurological concern");
    }
    if lower.contains("breathing") {
        risk_factors.push("Respiratory concern");
    }

    let recommendations: Vec<&'static str> = match severity {
        Severity::Emergency => vec![
            "Seek immediate medical attention",
            "Call emergency services if severe",
        ],
        Severity::Severe => vec![
            "Consult healthcare provider within 24 hours",
            "Monitor symptoms closely",
        ],
        _ => vec![
            "Self-care measures appropriate",
            "See doctor if symptoms persist",
        ],
    };

    SeverityAssessment {
        follow_up_needed: matches!(severity, Severity::Severe | Severity::Emergency),
        severity,
        urgency,
        risk_factors,
        recommendations,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyCheck {
    pub is_emergency: bool,
    pub emergency_types: Vec<&'static str>,
    pub immediate_actions: Vec<&'static str>,
    pub call_911: bool,
    pub urgency_level: &'static str,
}

const CARDIAC: &[&str] = &["chest pain", "heart attack", "severe chest pressure"];
const NEUROLOGICAL: &[&str] = &[
    "stroke",
    "severe headache",
    "loss of consciousness",
    "confusion",
];
const RESPIRATORY: &[&str] = &[
    "difficulty breathing",
    "shortness of breath",
    "can't breathe",
];
const BLEEDING: &[&str] = &["severe bleeding", "heavy bleeding", "blood loss"];
const ALLERGIC: &[&str] = &["severe allergic reaction", "anaphylaxis", "swelling throat"];

/// Screens for symptom groups that warrant an emergency call.
pub fn check_emergency_symptoms(symptoms: &str) -> EmergencyCheck {
    let lower = symptoms.to_lowercase();
    let groups: [(&'static str, &[&str]); 5] = [
        ("cardiac", CARDIAC),
        ("neurological", NEUROLOGICAL),
        ("respiratory", RESPIRATORY),
        ("bleeding", BLEEDING),
        ("allergic", ALLERGIC),
    ];

    let emergency_types: Vec<&'static str> = groups
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(name, _)| *name)
        .collect();
    let is_emergency = !emergency_types.is_empty();

    let mut immediate_actions = Vec::new();
    if is_emergency {
        immediate_actions.push("Call 911 immediately");
        if emergency_types.contains(&"cardiac") {
            immediate_actions.push("If available, take aspirin");
        }
        if emergency_types.contains(&"respiratory") {
            immediate_actions.push("Sit upright, loosen tight clothing");
        }
        if emergency_types.contains(&"allergic") {
            immediate_actions.push("Use EpiPen if available");
        }
    }

    EmergencyCheck {
        is_emergency,
        emergency_types,
        immediate_actions,
        call_911: is_emergency,
        urgency_level: if is_emergency { "CRITICAL" } else { "NORMAL" },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LifestyleRecommendations {
    pub exercise: Vec<&'static str>,
    pub nutrition: Vec<&'static str>,
    pub specific_advice: Vec<&'static str>,
    pub priority_areas: Vec<&'static str>,
    pub timeline: &'static str,
}

/// Issue-keyed lifestyle advice, optionally adjusted for age.
pub fn get_lifestyle_recommendations(
    current_issues: &str,
    age: Option<u32>,
) -> LifestyleRecommendations {
    let lower = current_issues.to_lowercase();

    let exercise: Vec<&'static str> = if lower.contains("back pain") || lower.contains("posture") {
        vec!["Strengthen core muscles", "Improve posture", "Regular stretching"]
    } else if lower.contains("fatigue") {
        vec!["Light cardio", "Gradual activity increase", "Avoid overexertion"]
    } else if lower.contains("stress") {
        vec!["Yoga", "Walking", "Swimming"]
    } else {
        Vec::new()
    };

    let nutrition: Vec<&'static str> = if lower.contains("headache") {
        vec!["Increase water intake", "Regular meals", "Limit caffeine"]
    } else if lower.contains("digestive") || lower.contains("stomach") {
        vec!["Smaller frequent meals", "Avoid trigger foods", "Increase fiber"]
    } else {
        Vec::new()
    };

    let mut specific_advice = Vec::new();
    match age {
        Some(age) if age > 50 => specific_advice.push("Regular health screenings recommended"),
        Some(age) if age < 30 => specific_advice.push("Focus on building healthy habits early"),
        _ => {}
    }

    let mut priority_areas = Vec::new();
    if lower.contains("pain") {
        priority_areas.push("Pain management");
    }
    if lower.contains("stress") {
        priority_areas.push("Stress reduction");
    }
    if lower.contains("sleep") {
        priority_areas.push("Sleep hygiene");
    }
    if lower.contains("weight") {
        priority_areas.push("Weight management");
    }

    LifestyleRecommendations {
        exercise,
        nutrition,
        specific_advice,
        priority_areas,
        timeline: "2-4 weeks for initial improvements",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicationInteractionCheck {
    pub interactions_found: bool,
    pub potential_interactions: Vec<String>,
    pub warnings: Vec<&'static str>,
    pub recommendation: &'static str,
}

// Simplified pair table; a real implementation would query a drug database.
const KNOWN_INTERACTIONS: &[(&str, &[&str])] = &[
    ("aspirin", &["warfarin", "ibuprofen", "alcohol"]),
    ("ibuprofen", &["aspirin", "warfarin", "blood pressure medications"]),
    ("acetaminophen", &["alcohol", "warfarin"]),
    ("caffeine", &["anxiety medications", "sleep medications"]),
];

/// Flags known risky pairs within the supplied medication list.
pub fn get_medication_interactions(current_medications: &[&str]) -> MedicationInteractionCheck {
    let mut potential_interactions = Vec::new();
    for med1 in current_medications {
        let med1_lower = med1.to_lowercase();
        if let Some((_, partners)) = KNOWN_INTERACTIONS
            .iter()
            .find(|(name, _)| *name == med1_lower)
        {
            for med2 in current_medications {
                if partners.contains(&med2.to_lowercase().as_str()) {
                    potential_interactions.push(format!("{} + {}", med1, med2));
                }
            }
        }
    }

    let warnings: Vec<&'static str> = if potential_interactions.is_empty() {
        Vec::new()
    } else {
        vec![
            "Potential drug interactions detected",
            "Consult pharmacist or doctor before combining medications",
        ]
    };

    MedicationInteractionCheck {
        interactions_found: !potential_interactions.is_empty(),
        potential_interactions,
        warnings,
        recommendation: "Always consult healthcare provider before starting new medications",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: &'static str,
    pub health_advice: &'static str,
    pub ideal_weight_range: String,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// BMI with the standard WHO category cutoffs.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);

    let (category, health_advice) = if bmi < 18.5 {
        (
            "Underweight",
            "Consider consulting a nutritionist for healthy weight gain",
        )
    } else if bmi < 25.0 {
        (
            "Normal weight",
            "Maintain current healthy weight through balanced diet and exercise",
        )
    } else if bmi < 30.0 {
        (
            "Overweight",
            "Consider gradual weight loss through diet and exercise",
        )
    } else {
        ("Obese", "Consult healthcare provider for weight management plan")
    };

    BmiResult {
        bmi: round1(bmi),
        category,
        health_advice,
        ideal_weight_range: format!(
            "{}-{} kg",
            round1(18.5 * height_m * height_m),
            round1(24.9 * height_m * height_m)
        ),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HydrationResult {
    pub daily_water_liters: f64,
    pub daily_water_glasses: u32,
    pub activity_adjustment: String,
    pub hydration_tips: Vec<&'static str>,
}

/// 35 ml per kg baseline, scaled by activity level. Unknown levels get the
/// moderate multiplier. A glass is 250 ml.
pub fn calculate_hydration_needs(weight_kg: f64, activity_level: &str) -> HydrationResult {
    let multiplier = match activity_level {
        "sedentary" => 1.0,
        "active" => 1.5,
        "very_active" => 1.8,
        _ => 1.2,
    };
    let daily_water_ml = weight_kg * 35.0 * multiplier;

    HydrationResult {
        daily_water_liters: round1(daily_water_ml / 1000.0),
        daily_water_glasses: (daily_water_ml / 250.0).round() as u32,
        activity_adjustment: format!(
            "{}% increase for {} lifestyle",
            ((multiplier - 1.0) * 100.0) as i32,
            activity_level
        ),
        hydration_tips: vec![
            "Drink water throughout the day",
            "Monitor urine color",
            "Increase intake in hot weather",
        ],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SleepAssessment {
    pub sleep_score: u32,
    pub sleep_duration_rating: &'static str,
    pub overall_rating: &'static str,
    pub recommendations: Vec<&'static str>,
}

/// Scores sleep out of 80: up to 40 for duration in the 7-9 hour band, up
/// to 40 for self-reported quality.
pub fn assess_sleep_quality(
    sleep_hours: f64,
    sleep_quality: &str,
    bedtime: Option<&str>,
) -> SleepAssessment {
    let mut score = 0;
    let mut recommendations = Vec::new();

    let duration_ok = (7.0..=9.0).contains(&sleep_hours);
    if duration_ok {
        score += 40;
        recommendations.push("Good sleep duration - maintain current schedule");
    } else if sleep_hours < 7.0 {
        recommendations.push("Increase sleep duration to 7-9 hours");
    } else {
        recommendations.push("Consider if you need that much sleep");
    }

    score += match sleep_quality {
        "poor" => 10,
        "good" => 30,
        "excellent" => 40,
        _ => 20,
    };
    if matches!(sleep_quality, "poor" | "fair") {
        recommendations.push("Improve sleep hygiene");
        recommendations.push("Create consistent bedtime routine");
        recommendations.push("Optimize sleep environment");
    }
    if bedtime.is_some_and(|b| b.to_uppercase().contains("AM")) {
        recommendations.push("Consider earlier bedtime for better sleep quality");
    }

    SleepAssessment {
        sleep_score: score,
        sleep_duration_rating: if duration_ok { "good" } else { "needs_improvement" },
        overall_rating: if score >= 70 {
            "excellent"
        } else if score >= 50 {
            "good"
        } else {
            "needs_improvement"
        },
        recommendations,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationAssessment {
    pub timeline_category: &'static str,
    pub duration_concern: bool,
    pub advice: &'static str,
    pub follow_up_recommended: bool,
}

/// Buckets a free-text duration into acute / subacute / chronic.
pub fn check_symptom_duration(duration: &str) -> DurationAssessment {
    let lower = duration.to_lowercase();
    let (timeline, advice) = if lower.contains("hours") || lower.contains("today") {
        ("acute", "Monitor symptoms, self-care appropriate")
    } else if lower.contains("days") {
        (
            "subacute",
            "If symptoms persist beyond a week, consult healthcare provider",
        )
    } else if lower.contains("weeks") || lower.contains("months") {
        ("chronic", "Chronic symptoms warrant medical evaluation")
    } else {
        (
            "unclear",
            "Please specify how long you've had these symptoms",
        )
    };

    DurationAssessment {
        timeline_category: timeline,
        duration_concern: timeline == "chronic",
        advice,
        follow_up_recommended: matches!(timeline, "subacute" | "chronic"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_analyzer_is_always_suggested_first() {
        let signals = Signals::scan("I feel fine honestly");
        let functions = suggest_functions(&signals);
        assert_eq!(functions, vec!["analyze_symptom_severity"]);
    }

    #[test]
    fn emergency_input_suggests_the_emergency_check() {
        let signals = Signals::scan("severe chest pain");
        let functions = suggest_functions(&signals);
        assert!(functions.contains(&"check_emergency_symptoms"));
    }

    #[test]
    fn sleep_and_medication_add_their_tools() {
        let signals = Signals::scan("my sleep medication stopped working");
        let functions = suggest_functions(&signals);
        assert!(functions.contains(&"assess_sleep_quality"));
        assert!(functions.contains(&"get_medication_interactions"));
    }

    #[test]
    fn intensity_escalates_but_never_past_emergency() {
        let mild = analyze_symptom_severity("a little tension", None, Some(9));
        assert_eq!(mild.severity, Severity::Severe);
        assert_eq!(mild.urgency, Urgency::Urgent);

        let emergency = analyze_symptom_severity("chest pain", None, Some(2));
        assert_eq!(emergency.severity, Severity::Emergency);
        assert_eq!(emergency.urgency, Urgency::Immediate);
        assert!(emergency.follow_up_needed);
    }

    #[test]
    fn long_duration_lifts_mild_to_moderate() {
        let assessment = analyze_symptom_severity("a bit off", Some("three weeks"), None);
        assert_eq!(assessment.severity, Severity::Moderate);
        assert_eq!(assessment.urgency, Urgency::Routine);
    }

    #[test]
    fn cardiac_plus_respiratory_triggers_911() {
        let check = check_emergency_symptoms("chest pain and shortness of breath");
        assert!(check.call_911);
        assert_eq!(check.emergency_types, vec!["cardiac", "respiratory"]);
        assert_eq!(check.urgency_level, "CRITICAL");
        assert!(check.immediate_actions.contains(&"Call 911 immediately"));
    }

    #[test]
    fn benign_text_is_not_an_emergency() {
        let check = check_emergency_symptoms("mild headache after reading");
        assert!(!check.call_911);
        assert!(check.emergency_types.is_empty());
        assert_eq!(check.urgency_level, "NORMAL");
    }

    #[test]
    fn every_suggested_function_has_an_implementation() {
        // each name handed to the model maps to a callable in this module
        let signals = Signals::scan(
            "severe back pain at my desk, can't sleep, worried about my weight and my medication",
        );
        for name in suggest_functions(&signals) {
            match name {
                "analyze_symptom_severity"
                | "check_emergency_symptoms"
                | "get_lifestyle_recommendations"
                | "assess_sleep_quality"
                | "calculate_bmi"
                | "get_medication_interactions" => {}
                other => panic!("no calculator backs suggestion `{}`", other),
            }
        }
    }

    #[test]
    fn back_pain_gets_core_and_posture_advice() {
        let recs = get_lifestyle_recommendations("back pain from my desk job", Some(28));
        assert!(recs.exercise.contains(&"Strengthen core muscles"));
        assert!(recs.priority_areas.contains(&"Pain management"));
        assert!(recs
            .specific_advice
            .contains(&"Focus on building healthy habits early"));
    }

    #[test]
    fn headache_issues_get_hydration_nutrition() {
        let recs = get_lifestyle_recommendations("constant headache and stress", Some(55));
        assert!(recs.nutrition.contains(&"Increase water intake"));
        assert!(recs.exercise.contains(&"Yoga"));
        assert!(recs
            .specific_advice
            .contains(&"Regular health screenings recommended"));
    }

    #[test]
    fn aspirin_warfarin_pair_is_flagged() {
        let check = get_medication_interactions(&["Aspirin", "Warfarin"]);
        assert!(check.interactions_found);
        assert_eq!(check.potential_interactions, vec!["Aspirin + Warfarin"]);
        assert!(check
            .warnings
            .contains(&"Potential drug interactions detected"));
    }

    #[test]
    fn single_medication_has_no_interactions() {
        let check = get_medication_interactions(&["acetaminophen"]);
        assert!(!check.interactions_found);
        assert!(check.warnings.is_empty());
    }

    #[test]
    fn bmi_seventy_kg_at_one_seventy_five() {
        let result = calculate_bmi(70.0, 175.0);
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category, "Normal weight");
        assert_eq!(result.ideal_weight_range, "56.7-76.3 kg");
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(calculate_bmi(50.0, 175.0).category, "Underweight");
        assert_eq!(calculate_bmi(80.0, 175.0).category, "Overweight");
        assert_eq!(calculate_bmi(100.0, 175.0).category, "Obese");
    }

    #[test]
    fn hydration_for_moderate_activity() {
        let result = calculate_hydration_needs(70.0, "moderate");
        assert_eq!(result.daily_water_liters, 2.9);
        assert_eq!(result.daily_water_glasses, 12);
    }

    #[test]
    fn unknown_activity_level_defaults_to_moderate() {
        let known = calculate_hydration_needs(70.0, "moderate");
        let unknown = calculate_hydration_needs(70.0, "astronaut");
        assert_eq!(known.daily_water_liters, unknown.daily_water_liters);
    }

    #[test]
    fn eight_hours_excellent_quality_scores_eighty() {
        let assessment = assess_sleep_quality(8.0, "excellent", None);
        assert_eq!(assessment.sleep_score, 80);
        assert_eq!(assessment.overall_rating, "excellent");
    }

    #[test]
    fn late_bedtime_gets_flagged() {
        let assessment = assess_sleep_quality(8.0, "good", Some("2 AM"));
        assert!(assessment
            .recommendations
            .contains(&"Consider earlier bedtime for better sleep quality"));
    }

    #[test]
    fn weight_questions_suggest_the_bmi_calculator() {
        let signals = Signals::scan("how do I manage my weight");
        assert!(suggest_functions(&signals).contains(&"calculate_bmi"));
    }

    #[test]
    fn short_poor_sleep_needs_improvement() {
        let assessment = assess_sleep_quality(5.0, "poor", None);
        assert_eq!(assessment.sleep_score, 10);
        assert_eq!(assessment.overall_rating, "needs_improvement");
        assert!(assessment
            .recommendations
            .contains(&"Increase sleep duration to 7-9 hours"));
    }

    #[test]
    fn duration_buckets() {
        assert_eq!(check_symptom_duration("a few hours").timeline_category, "acute");
        assert_eq!(check_symptom_duration("three days").timeline_category, "subacute");
        let chronic = check_symptom_duration("two months");
        assert_eq!(chronic.timeline_category, "chronic");
        assert!(chronic.duration_concern);
        assert!(check_symptom_duration("a while").timeline_category == "unclear");
    }
}
