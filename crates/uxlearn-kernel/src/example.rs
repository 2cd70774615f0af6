//! Lesson steps ("examples") as a tagged sum type.
//!
//! Content is authored as JSON objects discriminated by a `type` field. Every
//! tag maps to exactly one variant; an unknown tag is a parse error rather
//! than a silent fallback.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Example {
    Scenario(ScenarioExample),
    Interactive(InteractiveExample),
    Analysis(AnalysisExample),
    Layout(Comparison<LayoutSide>),
    Contrast(Comparison<ContrastSide>),
    Buttons(Comparison<ButtonsSide>),
    Fitts(Comparison<FittsSide>),
    Hicks(Comparison<HicksSide>),
    UxVisual(UxVisualExample),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExampleKind {
    Scenario,
    Interactive,
    Analysis,
    Layout,
    Contrast,
    Buttons,
    Fitts,
    Hicks,
    UxVisual,
}

impl ExampleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Interactive => "interactive",
            Self::Analysis => "analysis",
            Self::Layout => "layout",
            Self::Contrast => "contrast",
            Self::Buttons => "buttons",
            Self::Fitts => "fitts",
            Self::Hicks => "hicks",
            Self::UxVisual => "ux-visual",
        }
    }
}

impl std::fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a bad-vs-good comparison the learner picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Bad,
    Good,
}

impl std::str::FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bad" => Ok(Self::Bad),
            "good" => Ok(Self::Good),
            other => Err(format!("unknown choice `{other}` (expected bad or good)")),
        }
    }
}

impl Example {
    pub fn kind(&self) -> ExampleKind {
        match self {
            Self::Scenario(_) => ExampleKind::Scenario,
            Self::Interactive(_) => ExampleKind::Interactive,
            Self::Analysis(_) => ExampleKind::Analysis,
            Self::Layout(_) => ExampleKind::Layout,
            Self::Contrast(_) => ExampleKind::Contrast,
            Self::Buttons(_) => ExampleKind::Buttons,
            Self::Fitts(_) => ExampleKind::Fitts,
            Self::Hicks(_) => ExampleKind::Hicks,
            Self::UxVisual(_) => ExampleKind::UxVisual,
        }
    }

    pub fn as_interactive(&self) -> Option<&InteractiveExample> {
        match self {
            Self::Interactive(example) => Some(example),
            _ => None,
        }
    }

    /// Feedback text for one side of a bad-vs-good comparison.
    ///
    /// `None` for variants without a binary choice, and for scenario branches
    /// authored without feedback.
    pub fn choice_feedback(&self, choice: Choice) -> Option<&str> {
        fn pick<S>(cmp: &Comparison<S>, choice: Choice) -> &S {
            match choice {
                Choice::Bad => &cmp.bad,
                Choice::Good => &cmp.good,
            }
        }

        match self {
            Self::Scenario(s) => {
                let branch = match choice {
                    Choice::Bad => &s.bad,
                    Choice::Good => &s.good,
                };
                branch.feedback.as_deref()
            }
            Self::Layout(c) => Some(pick(c, choice).feedback.as_str()),
            Self::Contrast(c) => Some(pick(c, choice).feedback.as_str()),
            Self::Buttons(c) => Some(pick(c, choice).feedback.as_str()),
            Self::Fitts(c) => Some(pick(c, choice).feedback.as_str()),
            Self::Hicks(c) => Some(pick(c, choice).feedback.as_str()),
            Self::Interactive(_) | Self::Analysis(_) | Self::UxVisual(_) => None,
        }
    }

    /// Whether the step is answered by picking the bad or good side.
    pub fn has_binary_choice(&self) -> bool {
        matches!(
            self,
            Self::Scenario(_)
                | Self::Layout(_)
                | Self::Contrast(_)
                | Self::Buttons(_)
                | Self::Fitts(_)
                | Self::Hicks(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioExample {
    pub question: String,
    pub explanation: String,
    pub bad: ScenarioBranch,
    pub good: ScenarioBranch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioBranch {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CaseStudyData>,
}

/// A drag-and-drop sorting exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveExample {
    #[serde(alias = "task")]
    pub question: String,
    #[serde(alias = "description")]
    pub explanation: String,
    pub items: Vec<String>,
    pub categories: Vec<ExerciseCategory>,
    pub solution: BTreeMap<String, Vec<String>>,
    pub feedback: ExerciseFeedback,
}

impl InteractiveExample {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}

/// A named bucket in a sorting exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseCategory {
    pub name: String,
    pub description: String,
}

impl<'de> Deserialize<'de> for ExerciseCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Authored {
            Name(String),
            Full {
                name: String,
                #[serde(default)]
                description: String,
            },
        }

        Ok(match Authored::deserialize(deserializer)? {
            Authored::Name(name) => Self {
                name,
                description: String::new(),
            },
            Authored::Full { name, description } => Self { name, description },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFeedback {
    #[serde(alias = "correct")]
    pub success: String,
    #[serde(alias = "incorrect")]
    pub failure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisExample {
    pub case_study: CaseStudy,
    pub question: String,
    pub correct_analysis: Vec<String>,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub description: String,
    pub data: CaseStudyData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudyData {
    pub version_a: VariantMetrics,
    pub version_b: VariantMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantMetrics {
    pub description: String,
    pub conversion_rate: String,
    pub avg_time_to_purchase: String,
    pub cart_abandonment: String,
}

/// A bad-vs-good pair of display parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison<S> {
    pub bad: S,
    pub good: S,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSide {
    pub title: String,
    pub layout: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastSide {
    pub title: String,
    pub background: String,
    pub text_color: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonsSide {
    pub title: String,
    pub style: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FittsSide {
    pub title: String,
    pub button_size: String,
    pub button_position: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HicksSide {
    pub title: String,
    pub options: u32,
    pub layout: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UxVisualExample {
    pub principle: Principle,
}

/// Principles with a dedicated visual walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Principle {
    Fitts,
    Hicks,
    Jakobs,
}

impl Principle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fitts => "fitts",
            Self::Hicks => "hicks",
            Self::Jakobs => "jakobs",
        }
    }
}
