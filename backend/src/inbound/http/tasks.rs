//! Task list API handlers.
//!
//! ```text
//! GET    /api/v1/tasks?hideCompleted=true
//! POST   /api/v1/tasks {"text":"Buy milk"}
//! PATCH  /api/v1/tasks/{id} {"isChecked":true}
//! DELETE /api/v1/tasks/{id}
//! GET    /api/v1/tasks/incomplete-count
//! POST   /api/v1/view/hide-completed
//! ```
//!
//! Reads are open to anonymous callers, who receive an empty list and a blank
//! counter. Mutations require a session.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{HideCompleted, Task, TaskForm, TaskId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TaskFormSchema, TaskSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/tasks`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Overrides the session's hide-completed flag for this request only.
    pub hide_completed: Option<bool>,
}

/// Body of `GET /api/v1/tasks`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    /// Visible tasks, newest first.
    #[schema(value_type = Vec<TaskSchema>)]
    pub tasks: Vec<Task>,
    /// Flag applied to this listing.
    pub hide_completed: bool,
    /// Counter label: empty when nothing is pending, otherwise `"(n)"`.
    #[schema(example = "(2)")]
    pub incomplete_count: String,
    /// Whether the caller has a session.
    pub is_user_logged: bool,
}

/// Body of `POST /api/v1/tasks`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Text to submit.
    #[schema(example = "Buy milk")]
    pub text: String,
}

/// Response of `POST /api/v1/tasks`: the stored task and the cleared form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskResponse {
    /// Stored task.
    #[schema(value_type = TaskSchema)]
    pub task: Task,
    /// Form state after submission.
    #[schema(value_type = TaskFormSchema)]
    pub form: TaskForm,
}

/// Body of `PATCH /api/v1/tasks/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetCheckedRequest {
    /// New completion state.
    pub is_checked: bool,
}

/// Body of `GET /api/v1/tasks/incomplete-count`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncompleteCountResponse {
    /// Unchecked tasks owned by the caller.
    pub count: u64,
    /// Display form of `count`: `""` for zero, `"(n)"` otherwise.
    #[schema(example = "(3)")]
    pub label: String,
}

/// Body of `POST /api/v1/view/hide-completed`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HideCompletedResponse {
    /// Flag value after the toggle.
    pub hide_completed: bool,
}

/// List the caller's tasks with the view state needed to render them.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Task list; empty for anonymous callers", body = TaskListResponse),
        (status = 503, description = "Task store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks",
    security([])
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListTasksQuery>,
) -> ApiResult<web::Json<TaskListResponse>> {
    let viewer = session.user_id()?;
    let hide_completed = match query.hide_completed {
        Some(flag) => HideCompleted::from(flag),
        None => session.hide_completed()?,
    };

    let tasks = state
        .tasks
        .list_tasks(viewer.as_ref(), hide_completed)
        .await?;
    let count = state.tasks.incomplete_count(viewer.as_ref()).await?;

    Ok(web::Json(TaskListResponse {
        tasks,
        hide_completed: hide_completed.is_enabled(),
        incomplete_count: count.label(),
        is_user_logged: viewer.is_some(),
    }))
}

/// Submit the new-task form.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = CreateTaskResponse),
        (status = 400, description = "Empty or oversized text", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Task store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = session.user_id()?;
    let mut form = TaskForm::new(payload.into_inner().text);
    let task = state
        .commands
        .create_task(viewer.as_ref(), &mut form)
        .await?;
    info!(task_id = %task.id(), "task created");
    Ok(HttpResponse::Created().json(CreateTaskResponse { task, form }))
}

/// Check or uncheck one of the caller's tasks.
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    request_body = SetCheckedRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskSchema),
        (status = 400, description = "Malformed task id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such task for this user", body = ErrorSchema),
        (status = 503, description = "Task store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "setTaskChecked"
)]
#[patch("/tasks/{id}")]
pub async fn set_checked(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SetCheckedRequest>,
) -> ApiResult<web::Json<Task>> {
    let task_id = TaskId::parse(&path.into_inner())?;
    let viewer = session.user_id()?;
    let task = state
        .commands
        .set_checked(viewer.as_ref(), task_id, payload.is_checked)
        .await?;
    Ok(web::Json(task))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, description = "Malformed task id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such task for this user", body = ErrorSchema),
        (status = 503, description = "Task store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let task_id = TaskId::parse(&path.into_inner())?;
    let viewer = session.user_id()?;
    state
        .commands
        .delete_task(viewer.as_ref(), task_id)
        .await?;
    info!(%task_id, "task deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// Number of the caller's unchecked tasks.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/incomplete-count",
    responses(
        (status = 200, description = "Pending task count", body = IncompleteCountResponse),
        (status = 503, description = "Task store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "incompleteCount",
    security([])
)]
#[get("/tasks/incomplete-count")]
pub async fn incomplete_count(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<IncompleteCountResponse>> {
    let viewer = session.user_id()?;
    let count = state.tasks.incomplete_count(viewer.as_ref()).await?;
    Ok(web::Json(IncompleteCountResponse {
        count: count.get(),
        label: count.label(),
    }))
}

/// Flip the session's hide-completed flag.
#[utoipa::path(
    post,
    path = "/api/v1/view/hide-completed",
    responses(
        (status = 200, description = "New flag value", body = HideCompletedResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "toggleHideCompleted",
    security([])
)]
#[post("/view/hide-completed")]
pub async fn toggle_hide_completed(
    session: SessionContext,
) -> ApiResult<web::Json<HideCompletedResponse>> {
    let flag = session.hide_completed()?.toggled();
    session.set_hide_completed(flag)?;
    Ok(web::Json(HideCompletedResponse {
        hide_completed: flag.is_enabled(),
    }))
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
