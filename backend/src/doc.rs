//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, tasks,
//!   health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`UserSchema`], [`TaskSchema`], [`TaskFormSchema`]) that provide OpenAPI
//!   definitions without coupling domain types to the utoipa framework, plus
//!   the request and response bodies of the task endpoints
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, TaskFormSchema, TaskSchema, UserSchema,
};
use crate::inbound::http::tasks::{
    CreateTaskRequest, CreateTaskResponse, HideCompletedResponse, IncompleteCountResponse,
    SetCheckedRequest, TaskListResponse,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Task list API",
        description = "Session-scoped task list: create, check and filter your own tasks.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::set_checked,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::tasks::incomplete_count,
        crate::inbound::http::tasks::toggle_hide_completed,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        TaskSchema,
        TaskFormSchema,
        LoginRequest,
        TaskListResponse,
        CreateTaskRequest,
        CreateTaskResponse,
        SetCheckedRequest,
        IncompleteCountResponse,
        HideCompletedResponse,
    )),
    tags(
        (name = "users", description = "Login, logout and the current user"),
        (name = "tasks", description = "The signed-in user's task list"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
