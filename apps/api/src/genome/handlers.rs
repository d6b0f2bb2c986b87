use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::genome::models::CanonicalProfile;
use crate::state::AppState;

const GENOME_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=86400";

/// Trims and lowercases a requested username. Only `[A-Za-z0-9._-]` is accepted.
pub fn validate_username(raw: &str) -> Result<String, AppError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !valid {
        return Err(AppError::InvalidUsername(username.to_string()));
    }
    Ok(username.to_lowercase())
}

/// Fetches one upstream document and assembles it. Upstream failures are mapped
/// to their HTTP-facing kinds before the pipeline is ever reached.
pub async fn load_profile(state: &AppState, username: &str) -> Result<CanonicalProfile, AppError> {
    let raw = state
        .source
        .fetch_profile(username)
        .await
        .map_err(|e| AppError::from_upstream(e, username))?;

    if raw.person.is_none() {
        return Err(AppError::Upstream(format!(
            "Invalid user data received for {username}"
        )));
    }

    let profile = state.assembler.assemble(&raw);
    info!(
        "Processed {} skills and {} experiences for user {username}",
        profile.skills.len(),
        profile.experiences.len()
    );
    if profile.is_empty_state() {
        debug!("Profile for {username} has no skills and no name");
    }
    Ok(profile)
}

/// GET /api/genome/:username
pub async fn handle_get_genome(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let username = validate_username(&username)?;
    let profile = load_profile(&state, &username).await?;
    Ok(([(header::CACHE_CONTROL, GENOME_CACHE_CONTROL)], Json(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(" Renan ").unwrap(), "renan");
        assert_eq!(validate_username("a.b_c-d9").unwrap(), "a.b_c-d9");
        assert!(matches!(validate_username("  "), Err(AppError::Validation(_))));
        assert!(matches!(
            validate_username("bad name"),
            Err(AppError::InvalidUsername(_))
        ));
        assert!(matches!(
            validate_username("../etc"),
            Err(AppError::InvalidUsername(_))
        ));
    }
}
