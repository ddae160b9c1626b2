//! Category and sampling-context selection.
//!
//! The tie-break ordering is load-bearing: emergency keywords dominate,
//! then symptom count, then the specific-keyword categories, then the
//! default. Identical input always selects the identical category.

use serde::{Deserialize, Serialize};

use crate::signals::{Severity, Signals};
use crate::wellness::suggest_functions;

/// Reasoning template selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningCategory {
    SimpleSymptom,
    ComplexMultiSymptom,
    LifestyleRelated,
    EmergencyAssessment,
    WellnessOptimization,
}

impl ReasoningCategory {
    pub fn select(signals: &Signals) -> Self {
        if signals.is_emergency() {
            return ReasoningCategory::EmergencyAssessment;
        }
        if signals.symptom_count() >= 2 {
            return ReasoningCategory::ComplexMultiSymptom;
        }
        if !signals.lifestyle.is_empty() {
            return ReasoningCategory::LifestyleRelated;
        }
        if !signals.wellness.is_empty() {
            return ReasoningCategory::WellnessOptimization;
        }
        ReasoningCategory::SimpleSymptom
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningCategory::SimpleSymptom => "simple_symptom",
            ReasoningCategory::ComplexMultiSymptom => "complex_multi_symptom",
            ReasoningCategory::LifestyleRelated => "lifestyle_related",
            ReasoningCategory::EmergencyAssessment => "emergency_assessment",
            ReasoningCategory::WellnessOptimization => "wellness_optimization",
        }
    }

    /// Ordered stage prompts for the chain-of-thought scaffold.
    pub fn reasoning_steps(&self) -> &'static [&'static str] {
        match self {
            ReasoningCategory::SimpleSymptom => &[
                "Identify the primary symptom and any associated symptoms",
                "Assess severity using pain scale, duration, and impact on daily life",
                "Consider most common causes for this symptom in the general population",
                "Evaluate any red flags that would require immediate attention",
                "Determine if self-care is appropriate or medical consultation is needed",
                "Consider lifestyle factors that might be contributing",
                "Recommend monitoring and a follow-up timeline",
            ],
            ReasoningCategory::ComplexMultiSymptom => &[
                "List all symptoms and group related ones together",
                "Identify the most concerning symptom and assess overall severity",
                "Consider symptom patterns and how they might be connected",
                "Think through body systems that could cause this combination",
                "Evaluate for emergency conditions that present with these symptoms",
                "Consider both physical and psychological contributing factors",
                "Prioritize recommendations based on most likely causes",
            ],
            ReasoningCategory::LifestyleRelated => &[
                "Identify symptoms and their relationship to daily activities",
                "Assess how lifestyle factors might be contributing",
                "Consider the timeline of symptoms relative to lifestyle changes",
                "Evaluate the severity and impact on quality of life",
                "Think through which lifestyle modifications would be most effective",
                "Consider barriers to change and realistic goals",
                "Plan a step-by-step approach to improvement",
            ],
            ReasoningCategory::EmergencyAssessment => &[
                "Immediately identify any life-threatening symptoms",
                "Assess vital signs and consciousness level if available",
                "Consider time-sensitive conditions (stroke, heart attack, etc.)",
                "Evaluate the need for immediate emergency services",
                "If not immediately life-threatening, assess urgency level",
                "Consider what information would help emergency responders",
                "Provide clear action steps prioritized by urgency",
            ],
            ReasoningCategory::WellnessOptimization => &[
                "Understand the person's current health status and goals",
                "Assess current lifestyle patterns and habits",
                "Identify areas with the highest impact potential",
                "Consider the person's readiness and capacity for change",
                "Think through evidence-based interventions for their goals",
                "Plan a realistic, sustainable approach to improvement",
                "Consider how to track progress and adjust the plan",
            ],
        }
    }
}

/// Sampling context: how much creative latitude the model gets.
/// Serious contexts pin the temperature down; humor gets headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseContext {
    Emergency,
    SeriousMedical,
    GeneralHealth,
    WellnessTip,
    HumorRoast,
}

impl ResponseContext {
    pub fn select(signals: &Signals) -> Self {
        if signals.is_emergency() {
            return ResponseContext::Emergency;
        }
        if !signals.serious_medical.is_empty() {
            return ResponseContext::SeriousMedical;
        }
        if !signals.wellness.is_empty() {
            return ResponseContext::WellnessTip;
        }
        ResponseContext::GeneralHealth
    }

    pub fn temperature(&self) -> f32 {
        match self {
            ResponseContext::Emergency => 0.1,
            ResponseContext::SeriousMedical => 0.3,
            ResponseContext::GeneralHealth => 0.5,
            ResponseContext::WellnessTip => 0.6,
            ResponseContext::HumorRoast => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseContext::Emergency => "emergency",
            ResponseContext::SeriousMedical => "serious_medical",
            ResponseContext::GeneralHealth => "general_health",
            ResponseContext::WellnessTip => "wellness_tip",
            ResponseContext::HumorRoast => "humor_roast",
        }
    }
}

/// Which worked example a one-shot prompt gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleKind {
    BasicSymptom,
    LifestyleIssue,
    WellnessQuestion,
    MinorInjury,
}

impl ExampleKind {
    pub fn select(signals: &Signals) -> Self {
        if !signals.wellness.is_empty() {
            return ExampleKind::WellnessQuestion;
        }
        if !signals.lifestyle.is_empty() {
            return ExampleKind::LifestyleIssue;
        }
        if signals.injury {
            return ExampleKind::MinorInjury;
        }
        ExampleKind::BasicSymptom
    }
}

/// Which example set a multi-shot prompt gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleSet {
    CommonSymptoms,
    LifestyleIssues,
    WellnessQuestions,
}

impl ExampleSet {
    pub fn select(signals: &Signals) -> Self {
        if !signals.wellness.is_empty() {
            return ExampleSet::WellnessQuestions;
        }
        if !signals.lifestyle.is_empty() {
            return ExampleSet::LifestyleIssues;
        }
        ExampleSet::CommonSymptoms
    }
}

/// Everything the pipeline derives from one request, computed fresh each
/// time from a single tagging pass.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub category: ReasoningCategory,
    pub severity: Severity,
    pub context: ResponseContext,
    pub temperature: f32,
    pub suggested_functions: Vec<&'static str>,
    #[serde(skip)]
    pub signals: Signals,
}

/// Runs the tagging pass and every selector over the raw symptom text.
pub fn classify(symptoms: &str) -> Classification {
    let signals = Signals::scan(symptoms);
    let category = ReasoningCategory::select(&signals);
    let severity = signals.severity();
    let context = ResponseContext::select(&signals);
    Classification {
        category,
        severity,
        context,
        temperature: context.temperature(),
        suggested_functions: suggest_functions(&signals),
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headache_is_simple_symptom_general_health() {
        let c = classify("I have a headache");
        assert_eq!(c.category, ReasoningCategory::SimpleSymptom);
        assert_eq!(c.context, ResponseContext::GeneralHealth);
        assert!(c.temperature <= 0.5);
        assert!(matches!(c.severity, Severity::Mild | Severity::Moderate));
    }

    #[test]
    fn chest_pain_routes_to_emergency_everything() {
        let c = classify("I have chest pain and can't breathe");
        assert_eq!(c.category, ReasoningCategory::EmergencyAssessment);
        assert_eq!(c.severity, Severity::Emergency);
        assert_eq!(c.context, ResponseContext::Emergency);
        assert!((c.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn two_symptom_words_select_multi_symptom() {
        let c = classify("I have a headache and nausea all day");
        assert_eq!(c.category, ReasoningCategory::ComplexMultiSymptom);
    }

    #[test]
    fn exercise_question_is_wellness() {
        let c = classify("I want to start exercising but don't know where to begin");
        assert_eq!(c.category, ReasoningCategory::WellnessOptimization);
        assert_ne!(c.context, ResponseContext::Emergency);
        assert!(!c.signals.is_emergency());
    }

    #[test]
    fn desk_complaint_is_lifestyle() {
        let c = classify("my back hurts from sitting at my desk");
        assert_eq!(c.category, ReasoningCategory::LifestyleRelated);
    }

    #[test]
    fn medication_question_gets_serious_context() {
        let c = classify("is my blood pressure medication making me dizzy");
        assert_eq!(c.context, ResponseContext::SeriousMedical);
        assert!((c.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify("I have a headache and feel tired");
        let b = classify("I have a headache and feel tired");
        assert_eq!(a.category, b.category);
        assert_eq!(a.severity, b.severity);
        assert_eq!(a.context, b.context);
        assert_eq!(a.suggested_functions, b.suggested_functions);
    }

    #[test]
    fn every_category_has_seven_reasoning_steps() {
        for category in [
            ReasoningCategory::SimpleSymptom,
            ReasoningCategory::ComplexMultiSymptom,
            ReasoningCategory::LifestyleRelated,
            ReasoningCategory::EmergencyAssessment,
            ReasoningCategory::WellnessOptimization,
        ] {
            assert_eq!(category.reasoning_steps().len(), 7);
        }
    }
}
