use super::preferences::{Field, PreferenceSet};

pub const SYSTEM_PROMPT: &str = "You are an expert travel planner AI assistant. Your goal is to help users create personalized travel itineraries.
Follow these guidelines:
1. Ask clarifying questions to gather all necessary information
2. Be friendly and conversational
3. Focus on gathering:
   - Budget
   - Trip duration/dates
   - Destination
   - Purpose
   - Preferences (activities, food, accommodation)
4. Once you have enough information, provide personalized suggestions
5. Finally, create a detailed day-by-day itinerary

Keep responses concise and focused on gathering information or providing specific recommendations.";

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI travel planner. I'll help you create a personalized travel itinerary.
To get started, please tell me:
1. Where would you like to go?
2. When are you planning to travel?
3. What's your budget range?
4. What's the main purpose of your trip?
5. Any specific interests or preferences?

Feel free to share as much or as little as you'd like, and I'll ask follow-up questions as needed.";

pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I encountered an error while processing your request. Please try again or rephrase your question.";

pub fn clarification_message(missing: &[Field]) -> String {
    let names = missing.iter().map(Field::as_str).collect::<Vec<_>>().join(", ");
    format!(
        "I notice we're missing some important information. Could you please clarify:
{names}

This will help me provide more accurate and personalized recommendations."
    )
}

pub fn suggestion_prompt(prefs: &PreferenceSet) -> String {
    format!(
        "Based on the following preferences:
{}

Please provide:
1. Top 5 attractions/activities that match these preferences
2. 3 hidden gems or off-the-beaten-path experiences
3. Recommended accommodation options
4. Local food recommendations

Put each recommendation on its own line.
Focus on personalization and unique experiences that match the user's interests.",
        prefs.format()
    )
}

pub fn itinerary_prompt(prefs: &PreferenceSet, suggestions: &[String]) -> String {
    format!(
        "Create a detailed day-by-day itinerary based on:
Preferences: {}
Suggested Activities: {}

Include:
1. Logical grouping of activities
2. Estimated timing for each activity
3. Travel time between locations
4. Meal breaks
5. Flexibility for spontaneous changes

Format the itinerary in a clear, easy-to-follow structure.",
        prefs.format(),
        suggestions.join(", ")
    )
}

/// Split a suggestion reply into its non-blank lines.
pub fn split_suggestions(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
