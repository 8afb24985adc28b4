pub mod gateway;
mod orchestrator;
mod types;


use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::compose::Composer;
use crate::intent::Extractor;
use crate::session::{SessionKey, SessionStore};
use crate::weather::WeatherSource;

pub use types::{GENERIC_FAILURE_REPLY, TurnReply};

/// Runs conversation turns: extraction, weather lookup and reply
/// composition, with one dialog context per [`SessionKey`].
pub struct TurnEngine {
    gateway: Arc<dyn gateway::GenerationGateway>,
    weather: Arc<dyn WeatherSource>,
    extractor: Extractor,
    composer: Composer,
    sessions: SessionStore,
    clock: fn() -> NaiveDate,
}

impl TurnEngine {
    pub fn new(
        gateway: Arc<dyn gateway::GenerationGateway>,
        weather: Arc<dyn WeatherSource>,
        extraction_model: impl Into<String>,
        reply_model: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            weather,
            extractor: Extractor::new(extraction_model),
            composer: Composer::new(reply_model),
            sessions: SessionStore::new(),
            clock: local_today,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one turn. The session's context stays locked until the turn
    /// is finished so turns of one conversation never interleave.
    pub async fn handle_turn(&self, key: &SessionKey, user_input: &str) -> Result<TurnReply> {
        let context = self.sessions.context(key).await;
        let mut context = context.lock().await;
        orchestrator::run(
            orchestrator::EngineDeps {
                gateway: self.gateway.as_ref(),
                weather: self.weather.as_ref(),
                extractor: &self.extractor,
                composer: &self.composer,
            },
            user_input,
            &mut context,
            (self.clock)(),
        )
        .await
    }

    /// Like [`TurnEngine::handle_turn`] but always yields text for the user.
    pub async fn answer(&self, key: &SessionKey, user_input: &str) -> String {
        match self.handle_turn(key, user_input).await {
            Ok(reply) => {
                tracing::info!(
                    session = %key,
                    outcome = ?reply.outcome,
                    stage = %reply.stage,
                    "turn finished"
                );
                reply.text
            }
            Err(err) => {
                tracing::error!(session = %key, error = %err, "turn failed");
                GENERIC_FAILURE_REPLY.to_string()
            }
        }
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
