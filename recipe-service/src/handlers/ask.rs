use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use crate::models::{AskRequest, AskResponse};
use crate::startup::AppState;

#[tracing::instrument(skip_all)]
pub async fn ask(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    if request.user_prompt.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "user_prompt must not be blank"
        )));
    }

    let response = state
        .text_provider
        .generate(state.system_instruction.as_str(), &request.user_prompt)
        .await?;

    tracing::info!(
        prompt_len = request.user_prompt.len(),
        response_len = response.len(),
        "Prompt answered"
    );

    Ok(Json(AskResponse { response }))
}
