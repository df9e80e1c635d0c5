//! Handlers for the one-time-code authentication flow.
//!
//! These handlers never see credentials or decide whether a code is valid;
//! they relay the request to the external webhook and report its answer. A
//! denied code is a normal outcome, not an error, so it is reported with a
//! 401 body rather than through the error type.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{AuthOutcome, ChallengeAuthenticator, ChallengeId},
    state::AuthState,
};

/// The payload for requesting a one-time-code challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengePayload {
    /// Who is trying to sign in, e.g., an email address. Opaque to this
    /// application; the webhook decides where to deliver the code.
    pub identity: String,
}

/// The response to a successful challenge request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDetails {
    /// The ID to echo back when verifying the code.
    pub challenge_id: ChallengeId,
}

/// The payload for verifying a one-time code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyPayload {
    /// The ID of the pending challenge.
    pub challenge_id: ChallengeId,
    /// The one-time code the user received out of band.
    pub code: String,
}

/// The response to a verification request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyDetails {
    /// Whether access was granted or denied.
    pub outcome: AuthOutcome,
}

/// Ask the external webhook to issue a one-time code for an identity.
pub async fn request_challenge<A>(
    State(state): State<AuthState<A>>,
    Json(payload): Json<ChallengePayload>,
) -> Result<Json<ChallengeDetails>, Error>
where
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    let challenge_id = state.authenticator.request_challenge(&payload.identity).await?;

    Ok(Json(ChallengeDetails { challenge_id }))
}

/// Verify a one-time code against a pending challenge.
///
/// Returns 200 with `"outcome": "granted"` when the webhook accepts the code
/// and 401 with `"outcome": "denied"` when it rejects it.
pub async fn verify_challenge<A>(
    State(state): State<AuthState<A>>,
    Json(payload): Json<VerifyPayload>,
) -> Result<(StatusCode, Json<VerifyDetails>), Error>
where
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    let outcome = state
        .authenticator
        .verify_challenge(&payload.challenge_id, &payload.code)
        .await?;

    let status_code = match outcome {
        AuthOutcome::Granted => StatusCode::OK,
        AuthOutcome::Denied => StatusCode::UNAUTHORIZED,
    };

    Ok((status_code, Json(VerifyDetails { outcome })))
}

#[cfg(test)]
mod auth_route_tests {
    use axum::{Json, extract::State, http::StatusCode};

    use crate::{
        Error,
        auth::{AuthOutcome, ChallengeId, StubAuthenticator},
        state::AuthState,
    };

    use super::{ChallengePayload, VerifyPayload, request_challenge, verify_challenge};

    fn get_test_state() -> AuthState<StubAuthenticator> {
        AuthState {
            authenticator: StubAuthenticator,
        }
    }

    #[tokio::test]
    async fn challenge_returns_challenge_id() {
        let state = get_test_state();

        let Json(details) = request_challenge(
            State(state),
            Json(ChallengePayload {
                identity: "user@example.com".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(details.challenge_id, ChallengeId::new("stub-challenge"));
    }

    #[tokio::test]
    async fn verify_grants_access_for_the_right_code() {
        let state = get_test_state();

        let (status_code, Json(details)) = verify_challenge(
            State(state),
            Json(VerifyPayload {
                challenge_id: ChallengeId::new("stub-challenge"),
                code: "123456".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status_code, StatusCode::OK);
        assert_eq!(details.outcome, AuthOutcome::Granted);
    }

    #[tokio::test]
    async fn verify_denies_access_for_the_wrong_code() {
        let state = get_test_state();

        let (status_code, Json(details)) = verify_challenge(
            State(state),
            Json(VerifyPayload {
                challenge_id: ChallengeId::new("stub-challenge"),
                code: "000000".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status_code, StatusCode::UNAUTHORIZED);
        assert_eq!(details.outcome, AuthOutcome::Denied);
    }

    #[tokio::test]
    async fn verify_reports_expired_challenges() {
        let state = get_test_state();

        let result = verify_challenge(
            State(state),
            Json(VerifyPayload {
                challenge_id: ChallengeId::new("long-gone"),
                code: "123456".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(Error::ChallengeExpired)));
    }
}
