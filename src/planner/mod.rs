//! Travel planning session: preference tracking and response generation.

pub mod conversation_state;
pub mod extraction;
pub mod mode;
pub mod preferences;
pub mod templates;

use tracing::{debug, error, info};

use crate::openai_client::{ChatClient, ChatRequest, ClientError};
use conversation_state::ConversationState;
use mode::ResponseMode;
use preferences::PreferenceSet;

pub use preferences::Field;

/// One conversation with one user.
///
/// Owns the preference set, the history and the text-generation client.
/// Each call to [`TravelPlanner::process_user_input`] runs its external
/// calls strictly one after another.
pub struct TravelPlanner {
    client: Box<dyn ChatClient>,
    conversation_state: ConversationState,
    preferences: PreferenceSet,
}

impl TravelPlanner {
    pub fn new(client: Box<dyn ChatClient>) -> Self {
        Self {
            client,
            conversation_state: ConversationState::default(),
            preferences: PreferenceSet::default(),
        }
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    pub fn history(&self) -> &ConversationState {
        &self.conversation_state
    }

    /// Handle one user message and produce the assistant's reply.
    ///
    /// Never fails: generation errors are logged and replaced by
    /// [`templates::APOLOGY_MESSAGE`].
    pub async fn process_user_input(&mut self, user_input: &str) -> String {
        let turn_count = self.conversation_state.len();
        self.conversation_state.add_user_message(user_input);

        if turn_count > 0 {
            let extracted = extraction::extract_preferences(self.client.as_ref(), user_input).await;
            self.preferences.merge(extracted);
        }

        let mode = ResponseMode::select(turn_count, &self.preferences.missing_fields());
        info!("Responding in {} mode", mode.name());

        let response = match mode {
            ResponseMode::Initial => templates::WELCOME_MESSAGE.to_string(),
            ResponseMode::Clarify(missing) => templates::clarification_message(&missing),
            ResponseMode::SuggestThenItinerary => match self.generate_itinerary().await {
                Ok(itinerary) => itinerary,
                Err(e) => {
                    error!("Error generating travel plan: {}", e);
                    return templates::APOLOGY_MESSAGE.to_string();
                }
            },
        };

        self.conversation_state.add_assistant_message(&response);
        response
    }

    /// Discard the conversation and preferences; the next reply is the welcome.
    pub fn reset(&mut self) {
        self.conversation_state.clear();
        self.preferences.clear();
    }

    async fn generate_itinerary(&self) -> Result<String, ClientError> {
        let suggestions = self.generate_suggestions().await?;
        debug!("Generated {} suggestion line(s)", suggestions.len());

        let request = ChatRequest::new(
            templates::SYSTEM_PROMPT,
            templates::itinerary_prompt(&self.preferences, &suggestions),
        );
        self.client.complete(request).await
    }

    async fn generate_suggestions(&self) -> Result<Vec<String>, ClientError> {
        let request = ChatRequest::new(templates::SYSTEM_PROMPT, templates::suggestion_prompt(&self.preferences));
        let reply = self.client.complete(request).await?;
        Ok(templates::split_suggestions(&reply))
    }
}
