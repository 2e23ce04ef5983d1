use std::collections::VecDeque;

use dialoguer::{Confirm, Input};
use log::warn;

use crate::model::NutritionInfo;

/// Raw answer to the three-field nutrition prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualEntry {
    Values {
        carbs: String,
        fat: String,
        protein: String,
    },
    /// The user dismissed the prompt
    Cancelled,
}

impl ManualEntry {
    pub fn values(carbs: impl Into<String>, fat: impl Into<String>, protein: impl Into<String>) -> Self {
        ManualEntry::Values {
            carbs: carbs.into(),
            fat: fat.into(),
            protein: protein.into(),
        }
    }

    /// Parse the entered strings; `None` if any value is not a non-negative number
    pub fn parse(&self) -> Option<NutritionInfo> {
        match self {
            ManualEntry::Values {
                carbs,
                fat,
                protein,
            } => Some(NutritionInfo::new(
                parse_amount(carbs)?,
                parse_amount(fat)?,
                parse_amount(protein)?,
            )),
            ManualEntry::Cancelled => None,
        }
    }
}

/// Same coercion as remote payloads: blank is 0, otherwise a finite non-negative number
fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Everything the nutrition flow needs from the person at the keyboard
pub trait InputProvider: Send {
    /// Show a one-line notification
    fn notify(&mut self, message: &str);

    /// Ask for carbs, fat and protein of an ingredient
    fn nutrition_values(&mut self, ingredient: &str) -> ManualEntry;

    /// Ask a yes/no question
    fn confirm(&mut self, question: &str) -> bool;
}

/// Interactive prompts on the terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    fn ask(&self, prompt: &str) -> Option<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .default("0".to_string())
            .interact_text()
            .map_err(|e| warn!("Prompt failed: {}", e))
            .ok()
    }
}

impl InputProvider for TerminalInput {
    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }

    fn nutrition_values(&mut self, ingredient: &str) -> ManualEntry {
        let carbs = self.ask(&format!("Enter carbs (g) for {}", ingredient));
        let fat = self.ask(&format!("Enter fat (g) for {}", ingredient));
        let protein = self.ask(&format!("Enter protein (g) for {}", ingredient));

        match (carbs, fat, protein) {
            (Some(carbs), Some(fat), Some(protein)) => ManualEntry::Values {
                carbs,
                fat,
                protein,
            },
            _ => ManualEntry::Cancelled,
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Replays prepared answers and records what was shown, for tests and batch runs
#[derive(Debug, Default)]
pub struct ScriptedInput {
    entries: VecDeque<ManualEntry>,
    answers: VecDeque<bool>,
    /// Every notification passed to `notify`, in order
    pub notifications: Vec<String>,
    /// Number of times the nutrition prompt was shown
    pub prompts: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: ManualEntry) -> Self {
        self.entries.push_back(entry);
        self
    }

    pub fn with_answer(mut self, answer: bool) -> Self {
        self.answers.push_back(answer);
        self
    }
}

impl InputProvider for ScriptedInput {
    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn nutrition_values(&mut self, _ingredient: &str) -> ManualEntry {
        self.prompts += 1;
        self.entries.pop_front().unwrap_or(ManualEntry::Cancelled)
    }

    fn confirm(&mut self, _question: &str) -> bool {
        self.answers.pop_front().unwrap_or(false)
    }
}
