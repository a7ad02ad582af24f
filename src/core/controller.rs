//! Dashboard-side driver for "generate matches".
//!
//! The controller owns a single [`GenerationState`]. Results from the last
//! successful generation ride along in `Loading` and `Failed` so that a failed
//! refresh keeps showing them, and "has generated" is derived from the state
//! rather than tracked as a separate flag.

use serde_json::Value;
use thiserror::Error;
use crate::models::{GenerateMatchesResponse, Match, Notification};
use crate::services::{Notifier, ProxyClient, SessionError, SessionProvider};

const GENERIC_FAILURE: &str = "Failed to generate matches";

/// Errors from a single generation cycle
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Not authenticated: please log in first")]
    NotAuthenticated,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The proxy answered with a non-2xx status
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Observable state of the generate action
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading {
        previous: Option<Vec<Match>>,
    },
    Completed {
        matches: Vec<Match>,
        is_empty: bool,
    },
    Failed {
        message: String,
        previous: Option<Vec<Match>>,
    },
}

impl GenerationState {
    fn completed(matches: Vec<Match>) -> Self {
        let is_empty = matches.is_empty();
        Self::Completed { matches, is_empty }
    }

    /// Results of the most recent successful generation, if any
    pub fn results(&self) -> Option<&[Match]> {
        match self {
            Self::Idle => None,
            Self::Completed { matches, .. } => Some(matches.as_slice()),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous.as_deref(),
        }
    }

    fn into_results(self) -> Option<Vec<Match>> {
        match self {
            Self::Idle => None,
            Self::Completed { matches, .. } => Some(matches),
            Self::Loading { previous } | Self::Failed { previous, .. } => previous,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn has_generated(&self) -> bool {
        self.results().is_some()
    }

    /// Matches to display, in ranking order
    pub fn matches(&self) -> &[Match] {
        self.results().unwrap_or(&[])
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Runs the generate/refresh flow and keeps the dashboard state
pub struct MatchController<S, N> {
    session: S,
    proxy: ProxyClient,
    notifier: N,
    state: GenerationState,
}

impl<S: SessionProvider, N: Notifier> MatchController<S, N> {
    pub fn new(session: S, proxy: ProxyClient, notifier: N) -> Self {
        Self {
            session,
            proxy,
            notifier,
            state: GenerationState::Idle,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Label for the dashboard's generate button
    pub fn trigger_label(&self) -> &'static str {
        if self.state.is_loading() {
            "Analyzing Profiles..."
        } else if self.state.has_generated() {
            "Refresh Matches"
        } else {
            "Generate AI Matches"
        }
    }

    /// Generate (or refresh) matches for the signed-in user.
    ///
    /// Taking `&mut self` means a second generation cannot start while one is
    /// in flight. If an earlier call was dropped mid-flight, this one replaces
    /// it. Every outcome lands in `Completed` or `Failed`; nothing is returned
    /// as an error.
    pub async fn generate(&mut self) -> &GenerationState {
        let previous = std::mem::take(&mut self.state).into_results();
        self.state = GenerationState::Loading { previous };
        tracing::debug!("Generation started");

        let outcome = self.run_cycle().await;
        let previous = std::mem::take(&mut self.state).into_results();

        self.state = match outcome {
            Ok(matches) => {
                tracing::debug!("Generation completed with {} matches", matches.len());
                if matches.is_empty() {
                    self.notifier
                        .notify(Notification::neutral("No matches yet, more participants needed"));
                } else {
                    self.notifier
                        .notify(Notification::success(format!("{} AI-curated matches found", matches.len())));
                }
                GenerationState::completed(matches)
            }
            Err(GenerateError::NotAuthenticated) => {
                tracing::warn!("Generation skipped: no active session");
                self.notifier
                    .notify(Notification::destructive("Please log in first", None));
                GenerationState::Failed {
                    message: GenerateError::NotAuthenticated.to_string(),
                    previous,
                }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Generation failed: {}", message);
                self.notifier.notify(Notification::destructive(
                    "Error generating matches",
                    Some(message.clone()),
                ));
                GenerationState::Failed { message, previous }
            }
        };

        &self.state
    }

    async fn run_cycle(&self) -> Result<Vec<Match>, GenerateError> {
        let session = self
            .session
            .current_session()
            .await?
            .ok_or(GenerateError::NotAuthenticated)?;

        let reply = self.proxy.request_matches(&session).await?;

        if !reply.is_success() {
            let body: Value = serde_json::from_str(&reply.body)?;
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FAILURE);
            return Err(GenerateError::Rejected(message.to_string()));
        }

        let body: GenerateMatchesResponse = serde_json::from_str(&reply.body)?;
        Ok(body.into_matches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[&str]) -> Vec<Match> {
        ids.iter().map(|id| Match::new(*id)).collect()
    }

    #[test]
    fn test_idle_has_not_generated() {
        let state = GenerationState::Idle;
        assert!(!state.has_generated());
        assert!(state.matches().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_empty_completion_still_counts_as_generated() {
        let state = GenerationState::completed(vec![]);
        assert!(state.has_generated());
        assert_eq!(state, GenerationState::Completed { matches: vec![], is_empty: true });
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let state = GenerationState::Failed {
            message: "rate limited".to_string(),
            previous: Some(ranked(&["u1", "u2"])),
        };
        assert!(state.has_generated());
        assert_eq!(state.matches().len(), 2);
        assert_eq!(state.error_message(), Some("rate limited"));
    }

    #[test]
    fn test_failure_before_any_success_is_not_generated() {
        let state = GenerationState::Failed {
            message: "boom".to_string(),
            previous: None,
        };
        assert!(!state.has_generated());
    }

    #[test]
    fn test_results_survive_round_trip_through_loading() {
        let completed = GenerationState::completed(ranked(&["a", "b", "c"]));
        let loading = GenerationState::Loading { previous: completed.into_results() };
        assert!(loading.is_loading());
        let ids: Vec<_> = loading.matches().iter().map(|m| m.matched_user_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
