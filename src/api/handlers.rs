use crate::api::{views, AppState};
use crate::error::{AppError, Result};
use crate::models::Cause;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Draw a random incident and show it with the guess form
pub async fn select_incident(State(state): State<AppState>) -> Result<Html<String>> {
    let (record, display) = state.engine.draw()?;
    let key = record.key.clone();
    let token = state.selections.insert(record).await;

    info!(%token, incident = %key, "Incident drawn");

    Ok(Html(views::render_index(&display, &token)))
}

/// Score the visitor's guess against the model and the recorded outcome
pub async fn show_results(
    State(state): State<AppState>,
    query: std::result::Result<Query<ResultsQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let Query(params) = query?;
    params.validate()?;

    let choice = params
        .select
        .as_deref()
        .ok_or_else(|| AppError::Validation("missing required parameter 'select'".to_string()))?;
    let guess = Cause::parse_guess(choice)?;

    let token = params.token()?;
    let record = state.selections.get(&token).await?;
    let outcome = state.engine.evaluate(&record, guess)?;

    info!(
        %token,
        incident = %record.key,
        guess = %outcome.guess,
        prediction = %outcome.prediction,
        confidence = %outcome.confidence,
        reality = %outcome.reality,
        "Guess scored"
    );

    Ok(Html(views::render_results(&outcome, state.engine.model())))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResultsQuery {
    /// The visitor's guess, one of the `Cause` labels
    #[validate(length(min = 1, max = 64))]
    pub select: Option<String>,

    /// Selection token issued by the selection page
    pub incident: Option<String>,
}

impl ResultsQuery {
    fn token(&self) -> Result<Uuid> {
        let raw = self.incident.as_deref().ok_or_else(|| {
            AppError::NoActiveIncident(
                "no incident has been drawn yet; start from the quiz page".to_string(),
            )
        })?;
        Uuid::parse_str(raw)
            .map_err(|_| AppError::Validation(format!("malformed incident token '{}'", raw)))
    }
}
