use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Idea Relay",
        version = "0.1.0",
        description = "Creativity-support backend. Turns a stage tag plus the idea history into a chat-completion prompt and returns the model's text."
    ),
    servers(
        (url = "http://localhost:8000", description = "Local dev")
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "prompts", description = "Stage prompts: B decompose, C diagnose, D reframe, E suggest")
    ),
    // Handlers (paths)
    paths(
        crate::routes::health::root,
        crate::routes::prompt::prompt_llm,
    ),
    // Schemas used in requests/responses
    components(
        schemas(
            crate::models::prompt::PromptRequest,
            crate::models::prompt::PromptResponse,
            crate::models::common::StatusMessage,
            crate::models::common::ErrorMessage
        )
    )
)]
pub struct ApiDoc;
