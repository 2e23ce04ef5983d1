mod client;
mod input;
mod resolver;

pub use client::{NewIngredient, NutritionClient};
pub use input::{InputProvider, ManualEntry, ScriptedInput, TerminalInput};
pub use resolver::{FailureReason, NutritionResolver, Outcome, NOT_FOUND_GUIDANCE};
