//! Score submission at the end of a session.
//!
//! Submissions are fire-and-forget: the game hands a record over and
//! returns to the splash screen without waiting for the outcome.

use crate::core::constants::SCORE_SUBMIT_TIMEOUT_SECONDS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: Uuid,
    pub score: u32,
    pub submitted_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(player_id: Uuid, score: u32) -> Self {
        Self {
            player_id,
            score,
            submitted_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreSinkError {
    #[error("score submission to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
}

pub trait ScoreSink: Send + Sync {
    fn submit(&self, record: ScoreRecord);
}

/// Only writes the score to the log. Used when no score URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogScoreSink;

impl ScoreSink for LogScoreSink {
    fn submit(&self, record: ScoreRecord) {
        info!(
            player_id = %record.player_id,
            score = record.score,
            "score_recorded"
        );
    }
}

/// POSTs the record as JSON from a blocking task on the telemetry runtime.
pub struct HttpScoreSink {
    agent: ureq::Agent,
    url: String,
    runtime: Handle,
}

impl HttpScoreSink {
    pub fn new(url: impl Into<String>, runtime: Handle) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(SCORE_SUBMIT_TIMEOUT_SECONDS))
            .build();
        Self {
            agent,
            url: url.into(),
            runtime,
        }
    }
}

impl ScoreSink for HttpScoreSink {
    fn submit(&self, record: ScoreRecord) {
        let agent = self.agent.clone();
        let url = self.url.clone();
        self.runtime.spawn_blocking(move || {
            match post_record(&agent, &url, &record) {
                Ok(()) => info!(score = record.score, "score_submitted"),
                Err(error) => warn!(%error, score = record.score, "score_submit_failed"),
            }
        });
    }
}

fn post_record(agent: &ureq::Agent, url: &str, record: &ScoreRecord) -> Result<(), ScoreSinkError> {
    agent
        .post(url)
        .set("User-Agent", "flappy-scores")
        .send_json(record)
        .map_err(|e| ScoreSinkError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;
    Ok(())
}
