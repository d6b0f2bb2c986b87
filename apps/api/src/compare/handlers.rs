//! Axum route handlers for the radar and comparison views.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::compare::comparison::{compare_skills, ComparisonReport, SortMode};
use crate::compare::import::{parse_import, ImportedGenome};
use crate::compare::radar::{build_radar, RadarPoint};
use crate::compare::{comparable, ComparableSkill};
use crate::errors::AppError;
use crate::genome::handlers::{load_profile, validate_username};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RadarQuery {
    pub compare: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
}

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub against: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarResponse {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<String>,
    pub points: Vec<RadarPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonReport>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub genome: ImportedGenome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar: Option<RadarResponse>,
}

fn radar_response(
    primary_name: String,
    primary: &[ComparableSkill],
    compare: Option<(String, Vec<ComparableSkill>)>,
    sort: SortMode,
) -> RadarResponse {
    match compare {
        Some((compare_name, compare_skills_list)) => RadarResponse {
            primary: primary_name,
            points: build_radar(primary, Some(&compare_skills_list)),
            comparison: Some(compare_skills(primary, &compare_skills_list, sort)),
            compare: Some(compare_name),
        },
        None => RadarResponse {
            primary: primary_name,
            compare: None,
            points: build_radar(primary, None),
            comparison: None,
        },
    }
}

/// GET /api/radar/:username?compare=<username>&sort=<name|percentile>
///
/// Both profiles are fetched concurrently; either failing fails the request.
pub async fn handle_radar(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<RadarQuery>,
) -> Result<Json<RadarResponse>, AppError> {
    let primary_name = validate_username(&username)?;
    let compare_name = query
        .compare
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(validate_username)
        .transpose()?;

    let (primary, compare) = match &compare_name {
        Some(other) => {
            let (p, c) = tokio::try_join!(
                load_profile(&state, &primary_name),
                load_profile(&state, other)
            )?;
            (p, Some(c))
        }
        None => (load_profile(&state, &primary_name).await?, None),
    };

    let primary_skills = comparable(&primary.skills);
    let compare = compare_name.zip(compare.map(|c| comparable(&c.skills)));

    Ok(Json(radar_response(
        primary_name,
        &primary_skills,
        compare,
        query.sort,
    )))
}

/// POST /api/compare/import?against=<username>
///
/// Validates an uploaded comparison file. With `against`, the named profile is
/// fetched and the radar/comparison against the imported skills is returned too.
pub async fn handle_import(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<Json<ImportResponse>, AppError> {
    let genome = parse_import(&body, state.assembler.max_skills())?;

    let radar = match query.against.as_deref().filter(|a| !a.trim().is_empty()) {
        Some(against) => {
            let primary_name = validate_username(against)?;
            let primary = load_profile(&state, &primary_name).await?;
            Some(radar_response(
                primary_name,
                &comparable(&primary.skills),
                Some((genome.username.clone(), genome.skills.clone())),
                query.sort,
            ))
        }
        None => None,
    };

    Ok(Json(ImportResponse { genome, radar }))
}
