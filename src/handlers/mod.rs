use thiserror::Error;
use tracing::{debug, info};

use crate::{
    AppState,
    models::prompt::{PromptRequest, PromptResponse},
    prompts::{self, Stage, render::problem_text},
    services::{CompletionError, CompletionRequest},
};

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Runs one prompt request: picks the stage, builds its conversation and
/// returns the model's text unchanged. Unknown stages are answered with a
/// fixed text and never reach the provider.
pub async fn dispatch_prompt(
    state: &AppState,
    request: &PromptRequest,
) -> Result<PromptResponse, HandleError> {
    let Some(stage) = request.stage() else {
        debug!(window_id = %request.window_id, "unknown window_id");
        return Ok(PromptResponse::unknown_window());
    };

    let problem = problem_text(&request.problem);
    let messages = match stage {
        Stage::Decompose => prompts::decompose_problem(&problem, &request.ideas),
        Stage::Diagnose => prompts::diagnose_problem(
            &problem,
            request.idea_list("idea_b"),
            request.idea_list("idea_c"),
        ),
        Stage::Reframe => prompts::reframe_problem(
            &problem,
            request.idea_list("idea_d"),
            request.idea_list("idea_e"),
        ),
        Stage::Suggest => prompts::suggest_solution(
            &problem,
            request.idea_list("idea_d"),
            request.idea_list("idea_e"),
        ),
    };

    info!(%stage, "prompting model");

    let cfg = &state.cfg;
    let completion = state
        .completion
        .complete(CompletionRequest {
            model: cfg.model.clone(),
            messages,
            temperature: cfg.temperature,
            max_tokens: Some(cfg.max_tokens),
        })
        .await?;

    debug!("---------- INPUT ----------\n{}", completion.input);
    debug!("---------- OUTPUT ----------\n{}", completion.output);
    if let Some(usage) = &completion.raw.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "token usage"
        );
    }

    Ok(PromptResponse {
        text: completion.output,
    })
}
