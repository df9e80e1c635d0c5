//! Authentication via an external workflow webhook.
//!
//! Credential verification and one-time-code issuance are owned entirely by
//! an external automation workflow. This module models that collaborator as
//! an opaque capability: request a challenge for an identity, then verify the
//! code the user received out of band. No credential or code logic lives in
//! this application.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifies a pending challenge issued by the external webhook.
///
/// The value is opaque to this application; it is only ever echoed back to
/// the webhook during verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeId(String);

impl ChallengeId {
    /// Wrap a raw challenge ID received from the webhook.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw challenge ID as issued by the webhook.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChallengeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of verifying a one-time code against a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthOutcome {
    /// The webhook accepted the code.
    Granted,
    /// The webhook rejected the code.
    Denied,
}

/// A capability for delegating authentication to an external system.
///
/// Implementations must not interpret codes themselves; the external system
/// is the single authority on whether a code is valid.
pub trait ChallengeAuthenticator {
    /// Ask the external system to issue a one-time code for `identity` and
    /// return the ID of the pending challenge.
    fn request_challenge(
        &self,
        identity: &str,
    ) -> impl Future<Output = Result<ChallengeId, Error>> + Send;

    /// Ask the external system whether `code` answers the challenge with
    /// `challenge_id`.
    fn verify_challenge(
        &self,
        challenge_id: &ChallengeId,
        code: &str,
    ) -> impl Future<Output = Result<AuthOutcome, Error>> + Send;
}

/// Delegates authentication to a workflow-automation webhook over HTTPS.
#[derive(Debug, Clone)]
pub struct WebhookAuthenticator {
    client: reqwest::Client,
    base_url: String,
}

impl WebhookAuthenticator {
    /// Create an authenticator that calls the webhook at `base_url`.
    ///
    /// The webhook is expected to expose `POST {base_url}/challenge` and
    /// `POST {base_url}/verify`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Serialize)]
struct ChallengeRequest<'a> {
    identity: &'a str,
}

#[derive(Deserialize)]
struct ChallengeResponse {
    challenge_id: String,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    challenge_id: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    granted: bool,
}

impl ChallengeAuthenticator for WebhookAuthenticator {
    async fn request_challenge(&self, identity: &str) -> Result<ChallengeId, Error> {
        let response = self
            .client
            .post(format!("{}/challenge", self.base_url))
            .json(&ChallengeRequest { identity })
            .send()
            .await
            .map_err(|error| Error::ChallengeRequestFailed(error.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::ChallengeRequestFailed(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        let body: ChallengeResponse = response
            .json()
            .await
            .map_err(|error| Error::ChallengeRequestFailed(error.to_string()))?;

        Ok(ChallengeId(body.challenge_id))
    }

    async fn verify_challenge(
        &self,
        challenge_id: &ChallengeId,
        code: &str,
    ) -> Result<AuthOutcome, Error> {
        let response = self
            .client
            .post(format!("{}/verify", self.base_url))
            .json(&VerifyRequest {
                challenge_id: challenge_id.as_str(),
                code,
            })
            .send()
            .await
            .map_err(|error| Error::ChallengeRequestFailed(error.to_string()))?;

        // The webhook signals an unknown or expired challenge with 404/410;
        // a rejected code is a 200 with granted = false.
        if response.status() == reqwest::StatusCode::NOT_FOUND
            || response.status() == reqwest::StatusCode::GONE
        {
            return Err(Error::ChallengeExpired);
        }

        if !response.status().is_success() {
            return Err(Error::ChallengeRequestFailed(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|error| Error::ChallengeRequestFailed(error.to_string()))?;

        if body.granted {
            Ok(AuthOutcome::Granted)
        } else {
            Ok(AuthOutcome::Denied)
        }
    }
}

/// An authenticator with canned answers, for tests that must not hit the
/// network. The code "123456" is always accepted.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct StubAuthenticator;

#[cfg(test)]
impl ChallengeAuthenticator for StubAuthenticator {
    async fn request_challenge(&self, _identity: &str) -> Result<ChallengeId, Error> {
        Ok(ChallengeId::new("stub-challenge"))
    }

    async fn verify_challenge(
        &self,
        challenge_id: &ChallengeId,
        code: &str,
    ) -> Result<AuthOutcome, Error> {
        if challenge_id.as_str() != "stub-challenge" {
            return Err(Error::ChallengeExpired);
        }

        if code == "123456" {
            Ok(AuthOutcome::Granted)
        } else {
            Ok(AuthOutcome::Denied)
        }
    }
}
