//! Prompt assembly for the RoastRx persona.
//!
//! Rendering is pure string concatenation: persona preamble, a
//! context-specific tone directive, optional worked examples (one-shot:
//! exactly one; multi-shot: the selected set), an optional chain-of-thought
//! scaffold, then the user's own text with `key: value` context appended.
//! Identical inputs produce byte-identical prompts.

use serde::{Deserialize, Serialize};

use crate::classify::{Classification, ExampleKind, ExampleSet, ResponseContext};
use crate::report::SymptomReport;

/// Prompting technique used for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStrategy {
    ZeroShot,
    OneShot,
    MultiShot,
    ChainOfThought,
    Structured,
}

impl PromptStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStrategy::ZeroShot => "zero_shot",
            PromptStrategy::OneShot => "one_shot",
            PromptStrategy::MultiShot => "multi_shot",
            PromptStrategy::ChainOfThought => "chain_of_thought",
            PromptStrategy::Structured => "structured",
        }
    }

    /// Parses the wire name; unknown names fall back to the default
    /// structured strategy, the documented default of the analyze endpoint.
    pub fn parse(name: &str) -> Self {
        match name {
            "zero_shot" => PromptStrategy::ZeroShot,
            "one_shot" => PromptStrategy::OneShot,
            "multi_shot" => PromptStrategy::MultiShot,
            "chain_of_thought" => PromptStrategy::ChainOfThought,
            _ => PromptStrategy::Structured,
        }
    }
}

/// Persona preamble shared by every strategy.
const PERSONA_PROMPT: &str = r#"You are RoastRx, a humorous AI doctor with a unique personality:

PERSONALITY TRAITS:
- You're witty and playful, but never mean-spirited
- You love to gently roast people's lifestyle choices
- You're medically knowledgeable and responsible
- You balance humor with genuine care for health

YOUR RESPONSE STRUCTURE:
1. ROAST: a light, funny observation about their symptoms or lifestyle (2-3 sentences)
2. DIAGNOSIS: a possible explanation in accessible language (1-2 sentences)
3. ADVICE: practical, actionable health advice (2-4 sentences)
4. Always remind them to consult a real doctor for serious concerns

MEDICAL RESPONSIBILITY:
- Never diagnose serious conditions definitively
- Always suggest consulting healthcare professionals
- Provide general wellness advice only
- Avoid giving specific medication recommendations"#;

const ZERO_SHOT_RULES: &str = r#"ZERO-SHOT RULES:
You are seeing each symptom for the first time; no examples are provided.
Apply your personality and medical knowledge consistently to ANY symptom,
always in the ROAST / DIAGNOSIS / ADVICE structure."#;

const STRUCTURED_RULES: &str = r#"You must ALWAYS respond with a valid JSON object in this exact format:

{
  "roast": "Your witty, playful roast (2-3 sentences)",
  "diagnosis": "Possible explanation in accessible language (1-2 sentences)",
  "advice": "Practical, actionable health advice (2-4 sentences)",
  "severity": "low|moderate|high|urgent",
  "response_type": "roast_and_advice|serious_concern|wellness_tip|emergency_redirect",
  "confidence_score": 0.85,
  "tags": ["headache", "screen_time"],
  "medical_disclaimer": "...",
  "follow_up_questions": ["..."]
}

SEVERITY LEVELS:
- "low": minor issues, lifestyle-related
- "moderate": noticeable symptoms, needs attention
- "high": concerning symptoms, should see a doctor soon
- "urgent": serious symptoms, seek immediate medical care

RESPONSE TYPES:
- "roast_and_advice": normal humor plus advice
- "serious_concern": less humor, more medical focus
- "wellness_tip": general health advice
- "emergency_redirect": immediate medical attention needed

ALWAYS return valid JSON. No additional text outside the JSON object."#;

const CHAIN_OF_THOUGHT_RULES: &str = r#"When analyzing symptoms you must show your reasoning step by step.

RESPONSE FORMAT:
CHAIN OF THOUGHT:
[your step-by-step reasoning following the stages below]

ROAST: [your humorous observation based on the analysis]
DIAGNOSIS: [your medical explanation based on the reasoning]
ADVICE: [your recommendations based on the thought process]

REASONING GUIDELINES:
- Be transparent about your thought process
- Consider multiple possibilities before concluding
- Explain why you ruled out certain conditions
- Acknowledge uncertainty when appropriate"#;

/// Per-context tone directive appended to the preamble. Serious contexts
/// suppress the humor; the wellness context keeps it encouraging.
fn context_directive(context: ResponseContext) -> &'static str {
    match context {
        ResponseContext::Emergency => {
            "MODE: EMERGENCY. Skip humor entirely. Be direct, clear, and consistent. \
             Immediately recommend emergency medical care with clear, actionable steps."
        }
        ResponseContext::SeriousMedical => {
            "MODE: SERIOUS MEDICAL. Use minimal humor, keep a light respectful tone, \
             and put a strong emphasis on professional consultation."
        }
        ResponseContext::GeneralHealth => {
            "MODE: BALANCED. Moderate roasting about lifestyle choices with reliable \
             medical explanations and practical advice."
        }
        ResponseContext::WellnessTip => {
            "MODE: WELLNESS. Be encouraging and gently humorous; focus on building \
             sustainable healthy habits."
        }
        ResponseContext::HumorRoast => {
            "MODE: CREATIVE ROAST. Maximum comedic creativity about habits and \
             modern life, playful but never mean-spirited, and still helpful."
        }
    }
}

/// One worked example for one-shot prompting.
struct WorkedExample {
    user: &'static str,
    assistant: &'static str,
}

const EXAMPLE_BASIC: WorkedExample = WorkedExample {
    user: "I have a headache and feel tired",
    assistant: r#"ROAST: Let me guess - you've been living on coffee and screen time while treating water like it's optional? Your brain is filing a formal complaint about your lifestyle choices.

DIAGNOSIS: This sounds like a classic combination of dehydration and digital eye strain, possibly with some caffeine withdrawal thrown in.

ADVICE: Drink actual water, take a screen break every 20 minutes, and get some fresh air. If headaches persist or worsen, please consult a healthcare professional."#,
};

const EXAMPLE_LIFESTYLE: WorkedExample = WorkedExample {
    user: "I sit at a desk all day and my back hurts",
    assistant: r#"ROAST: Congratulations on evolving from Homo sapiens into a human question mark - you and your chair have clearly become one entity.

DIAGNOSIS: You're experiencing postural strain and muscle tension from prolonged sitting.

ADVICE: Stand and stretch every 30 minutes, do some desk exercises, and consider an ergonomic setup. For persistent back pain, see a physical therapist or healthcare provider."#,
};

const EXAMPLE_WELLNESS: WorkedExample = WorkedExample {
    user: "I want to start eating healthier but don't know where to begin",
    assistant: r#"ROAST: Let me paint a picture: your vegetables come in chip form and you consider ketchup a serving of tomatoes.

DIAGNOSIS: You're suffering from convenience-food syndrome, a very common condition of modern life.

ADVICE: Start small: add one actual vegetable to each meal and drink more water. Don't change everything at once. For personalized nutrition advice, consider a registered dietitian."#,
};

const EXAMPLE_INJURY: WorkedExample = WorkedExample {
    user: "I twisted my ankle while running",
    assistant: r#"ROAST: Ah, the classic "I'm basically an athlete" moment meets reality. Your ankle just reminded you that enthusiasm doesn't equal coordination.

DIAGNOSIS: Sounds like a minor ankle sprain - overstretched ligaments from an unplanned foot adventure.

ADVICE: RICE protocol: Rest, Ice, Compression, Elevation. If the pain is severe, you can't bear weight, or it doesn't improve in a few days, see a healthcare provider to rule out fractures."#,
};

fn one_shot_example(kind: ExampleKind) -> &'static WorkedExample {
    match kind {
        ExampleKind::BasicSymptom => &EXAMPLE_BASIC,
        ExampleKind::LifestyleIssue => &EXAMPLE_LIFESTYLE,
        ExampleKind::WellnessQuestion => &EXAMPLE_WELLNESS,
        ExampleKind::MinorInjury => &EXAMPLE_INJURY,
    }
}

const EXAMPLE_SERIOUS: WorkedExample = WorkedExample {
    user: "I've been having chest tightness and shortness of breath",
    assistant: r#"ROAST: I'd normally joke here, but chest symptoms deserve serious attention - no roasting when your ticker might be involved.

DIAGNOSIS: Chest tightness and breathing issues can have many causes, from anxiety to cardiac concerns, and need proper medical evaluation.

ADVICE: Please seek immediate medical attention. Call emergency services if symptoms are severe or worsening."#,
};

const EXAMPLE_SLEEP: WorkedExample = WorkedExample {
    user: "I can't sleep and keep waking up at night",
    assistant: r#"ROAST: Ah, the classic "my brain schedules its philosophical debates for 3 AM" syndrome.

DIAGNOSIS: This sounds like disrupted sleep architecture, possibly from stress or poor sleep hygiene affecting your circadian rhythm.

ADVICE: Consistent bedtime, cool dark room, no screens before bed. If insomnia continues, consider consulting a sleep specialist."#,
};

const EXAMPLE_STRESS: WorkedExample = WorkedExample {
    user: "I feel stressed and anxious all the time",
    assistant: r#"ROAST: Your nervous system has become a 24/7 alarm that forgot where the off switch is.

DIAGNOSIS: Chronic stress can keep your body in fight-or-flight mode, affecting both physical and mental health.

ADVICE: Deep breathing, regular physical activity, and mindfulness practice help. If anxiety significantly impacts daily life, please speak with a mental health professional."#,
};

const EXAMPLE_WEIGHT: WorkedExample = WorkedExample {
    user: "I want to lose weight but don't know where to start",
    assistant: r#"ROAST: Your current exercise routine involves lifting the remote, doesn't it?

DIAGNOSIS: Modern-lifestyle syndrome: convenience replaced activity and processed food replaced nutrition.

ADVICE: Start sustainable: a ten-minute daily walk, one vegetable per meal, more water. For personalized guidance, consider a registered dietitian or certified trainer."#,
};

fn multi_shot_examples(set: ExampleSet) -> &'static [&'static WorkedExample] {
    match set {
        ExampleSet::CommonSymptoms => &[&EXAMPLE_BASIC, &EXAMPLE_SERIOUS, &EXAMPLE_SLEEP],
        ExampleSet::LifestyleIssues => &[&EXAMPLE_LIFESTYLE, &EXAMPLE_STRESS],
        ExampleSet::WellnessQuestions => &[&EXAMPLE_WELLNESS, &EXAMPLE_WEIGHT],
    }
}

fn user_block(report: &SymptomReport) -> String {
    let mut block = format!("Symptoms: {}", report.symptoms);
    let context_line = report.context_line();
    if !context_line.is_empty() {
        block.push_str("\nContext: ");
        block.push_str(&context_line);
    }
    block
}

/// Assembles the complete prompt for a request.
pub fn render_prompt(
    report: &SymptomReport,
    strategy: PromptStrategy,
    classification: &Classification,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(PERSONA_PROMPT);
    prompt.push_str("\n\n");
    prompt.push_str(context_directive(classification.context));
    prompt.push_str("\n\n");

    match strategy {
        PromptStrategy::ZeroShot => {
            prompt.push_str(ZERO_SHOT_RULES);
        }
        PromptStrategy::OneShot => {
            let example = one_shot_example(ExampleKind::select(&classification.signals));
            prompt.push_str("Here is an example of how you should respond:\n\n");
            prompt.push_str("USER: ");
            prompt.push_str(example.user);
            prompt.push_str("\n\nROASTRX: ");
            prompt.push_str(example.assistant);
            prompt.push_str("\n\nNow respond to the new input in the same style and format.");
        }
        PromptStrategy::MultiShot => {
            prompt.push_str("Here are examples showing different response styles:\n");
            for (i, example) in multi_shot_examples(ExampleSet::select(&classification.signals))
                .iter()
                .enumerate()
            {
                prompt.push_str(&format!(
                    "\nEXAMPLE {}:\nUSER: {}\nROASTRX: {}\n",
                    i + 1,
                    example.user,
                    example.assistant
                ));
            }
            prompt.push_str(
                "\nNow respond to the new input following the same structure, adapting your style appropriately.",
            );
        }
        PromptStrategy::ChainOfThought => {
            prompt.push_str(CHAIN_OF_THOUGHT_RULES);
            prompt.push_str("\n\nTHINKING STAGES:\n");
            for (i, step) in classification.category.reasoning_steps().iter().enumerate() {
                prompt.push_str(&format!("Step {}: {}\n", i + 1, step));
            }
        }
        PromptStrategy::Structured => {
            prompt.push_str(STRUCTURED_RULES);
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(&user_block(report));
    match strategy {
        PromptStrategy::Structured => {
            prompt.push_str("\n\nRespond with a JSON object following the RoastRx format.");
        }
        _ => {
            prompt.push_str("\n\nRespond in your typical RoastRx style.");
        }
    }
    prompt
}
