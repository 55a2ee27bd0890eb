use super::preferences::Field;

/// What the planner does with the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMode {
    /// Nothing has been said yet: greet and list the questions.
    Initial,
    /// Ask for the listed fields, in fixed order.
    Clarify(Vec<Field>),
    /// Everything is known: request suggestions, then the itinerary.
    SuggestThenItinerary,
}

impl ResponseMode {
    pub fn select(turn_count: usize, missing: &[Field]) -> Self {
        if turn_count == 0 {
            ResponseMode::Initial
        } else if !missing.is_empty() {
            ResponseMode::Clarify(missing.to_vec())
        } else {
            ResponseMode::SuggestThenItinerary
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseMode::Initial => "initial",
            ResponseMode::Clarify(_) => "clarify",
            ResponseMode::SuggestThenItinerary => "suggest_then_itinerary",
        }
    }
}
