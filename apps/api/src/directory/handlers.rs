use axum::{
    extract::{Query, State},
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::directory::{all_users, search_directory, DirectoryEntry, MIN_QUERY_LEN};
use crate::errors::AppError;
use crate::genome::handlers::validate_username;
use crate::genome::models::{Person, UNKNOWN_LOCATION};
use crate::state::AppState;

/// Usable upstream search hits kept per autocomplete query.
pub const UPSTREAM_SEARCH_LIMIT: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub suggestions: Vec<DirectoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<DirectoryEntry>,
    pub total: usize,
    pub message: String,
}

/// The static directory with a synthetic completion ratio in `[0.60, 1.00)`
/// per user, since the sample records carry none.
pub fn directory_listing<R: Rng>(rng: &mut R) -> UsersResponse {
    let users: Vec<DirectoryEntry> = all_users()
        .into_iter()
        .map(|user| DirectoryEntry {
            completion: Some(f64::from(rng.gen_range(60u8..100)) / 100.0),
            ..user
        })
        .collect();
    let total = users.len();
    UsersResponse {
        users,
        total,
        message: format!("Found {total} users"),
    }
}

fn entry_from_person(person: &Person) -> DirectoryEntry {
    DirectoryEntry {
        username: person.username.clone(),
        name: person.name.clone(),
        professional_headline: person.professional_headline.clone(),
        location: person
            .location
            .as_ref()
            .map(|l| l.name.clone())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        verified: person.verified,
        completion: Some(person.completion),
    }
}

/// Treats the query as an exact username. Any failure yields no suggestion.
/// A hit whose person has no public id keeps the queried username.
async fn direct_lookup(state: &AppState, query: &str) -> Option<DirectoryEntry> {
    let username = validate_username(query).ok()?;
    match state.source.fetch_profile(&username).await {
        Ok(raw) => {
            let has_public_id = raw
                .person
                .as_ref()?
                .public_id
                .as_deref()
                .is_some_and(|id| !id.trim().is_empty());
            let profile = state.assembler.assemble(&raw);
            debug!("Direct lookup matched {username}");
            let mut entry = entry_from_person(&profile.person);
            if !has_public_id {
                entry.username = username;
            }
            Some(entry)
        }
        Err(e) => {
            debug!("Direct lookup for {username} failed: {e}");
            None
        }
    }
}

/// GET /api/search?q=<query>
///
/// Upstream search first, then a direct username lookup, then the static
/// directory. Upstream errors never fail the request.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let q = query.q.trim();
    if q.chars().count() < MIN_QUERY_LEN {
        return Err(AppError::Validation(format!(
            "Query must be at least {MIN_QUERY_LEN} characters"
        )));
    }

    let mut suggestions = match state.source.search_people(q, UPSTREAM_SEARCH_LIMIT).await {
        Ok(hits) => hits,
        Err(e) => {
            warn!("Upstream search failed for '{q}': {e}");
            Vec::new()
        }
    };

    if suggestions.is_empty() {
        suggestions.extend(direct_lookup(&state, q).await);
    }
    if suggestions.is_empty() {
        suggestions = search_directory(&all_users(), q);
    }

    Ok(Json(SearchResponse { suggestions }))
}

/// GET /api/users/all
pub async fn handle_all_users() -> Json<UsersResponse> {
    let listing = directory_listing(&mut rand::thread_rng());
    info!("Returning {} directory users", listing.total);
    Json(listing)
}
