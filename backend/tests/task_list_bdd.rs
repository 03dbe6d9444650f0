//! Behaviour tests for the session-scoped task list.
//!
//! These scenarios drive a real server over HTTP: anonymous visitors see an
//! empty list, signed-in users manage only their own tasks, and the
//! hide-completed flag and counter follow each change.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[path = "support/task_world.rs"]
mod task_world;

use actix_web::http::Method;
use awc::Client;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use todo_backend::middleware::TRACE_ID_HEADER;

use crate::task_world::{SharedWorld, WorldFixture, with_world_async};

#[fixture]
fn world() -> WorldFixture {
    task_world::world()
}

struct RequestSpec {
    method: Method,
    path: String,
    payload: Option<Value>,
    label: &'static str,
}

fn record_response(world: &SharedWorld, status: u16, trace_id: Option<String>, body: Value) {
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Send a request as `user`; users without a stored session go anonymous.
///
/// Like a browser, the user keeps whichever session cookie the server sends
/// back, so session-held view state carries over to the next request.
fn perform_json_request(world: &SharedWorld, user: &str, spec: RequestSpec) {
    let RequestSpec {
        method,
        path,
        payload,
        label,
    } = spec;
    let cookie = world.borrow().sessions.get(user).cloned();
    let (status, trace_id, body, renewed) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.cookie(cookie);
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(label),
            None => request.send().await.expect(label),
        };
        let status = response.status().as_u16();
        let renewed = response.cookie("session");
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let body = response.body().await.expect(label);
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect(label)
        };
        (status, trace_id, json, renewed)
    });

    if let Some(cookie) = renewed {
        world.borrow_mut().sessions.insert(user.to_owned(), cookie);
    }
    record_response(world, status, trace_id, body);
}

fn task_id(world: &SharedWorld, text: &str) -> String {
    world
        .borrow()
        .task_ids
        .get(text)
        .cloned()
        .expect("task created earlier in the scenario")
}

fn last_body(world: &SharedWorld) -> Value {
    world.borrow().last_body.clone().expect("response body")
}

fn listed_texts(world: &SharedWorld) -> Vec<String> {
    last_body(world)
        .get("tasks")
        .and_then(Value::as_array)
        .expect("tasks array")
        .iter()
        .filter_map(|task| task.get("text").and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

fn open_task_list(world: &SharedWorld, user: &str) {
    perform_json_request(
        world,
        user,
        RequestSpec {
            method: Method::GET,
            path: "/api/v1/tasks".to_owned(),
            payload: None,
            label: "list tasks request",
        },
    );
}

#[given("a running task list server")]
fn a_running_task_list_server(world: &WorldFixture) {
    let _ = world;
}

#[given("{user} is logged in")]
fn user_is_logged_in(world: &WorldFixture, user: String) {
    let world = world.world();
    let password = match user.as_str() {
        "ada" => "lovelace",
        "bob" => "builder",
        other => panic!("no fixture account for {other}"),
    };
    let username = user.clone();
    let (status, cookie) = with_world_async(&world, |base_url| async move {
        let response = Client::default()
            .post(format!("{base_url}/api/v1/login"))
            .send_json(&json!({ "username": username, "password": password }))
            .await
            .expect("login request");
        (response.status().as_u16(), response.cookie("session"))
    });

    assert_eq!(status, 200, "login should succeed for {user}");
    let cookie = cookie.expect("session cookie");
    world.borrow_mut().sessions.insert(user, cookie);
}

#[when("{user} opens the task list")]
fn user_opens_the_task_list(world: &WorldFixture, user: String) {
    open_task_list(&world.world(), &user);
}

fn add_task(world: &WorldFixture, user: String, text: String) {
    let world = world.world();
    perform_json_request(
        &world,
        &user,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/tasks".to_owned(),
            payload: Some(json!({ "text": text })),
            label: "create task request",
        },
    );

    let id = last_body(&world)
        .get("task")
        .and_then(|task| task.get("id"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    if let Some(id) = id {
        world.borrow_mut().task_ids.insert(text, id);
    }
}

fn check_task(world: &WorldFixture, user: String, text: String) {
    let world = world.world();
    let id = task_id(&world, &text);
    perform_json_request(
        &world,
        &user,
        RequestSpec {
            method: Method::PATCH,
            path: format!("/api/v1/tasks/{id}"),
            payload: Some(json!({ "isChecked": true })),
            label: "set checked request",
        },
    );
}

#[given("{user} adds the task \"{text}\"")]
fn user_has_added_the_task(world: &WorldFixture, user: String, text: String) {
    add_task(world, user, text);
}

#[when("{user} adds the task \"{text}\"")]
fn user_adds_the_task(world: &WorldFixture, user: String, text: String) {
    add_task(world, user, text);
}

#[given("{user} checks the task \"{text}\"")]
fn user_has_checked_the_task(world: &WorldFixture, user: String, text: String) {
    check_task(world, user, text);
}

#[when("{user} checks the task \"{text}\"")]
fn user_checks_the_task(world: &WorldFixture, user: String, text: String) {
    check_task(world, user, text);
}

#[when("{user} deletes the task \"{text}\"")]
fn user_deletes_the_task(world: &WorldFixture, user: String, text: String) {
    let world = world.world();
    let id = task_id(&world, &text);
    perform_json_request(
        &world,
        &user,
        RequestSpec {
            method: Method::DELETE,
            path: format!("/api/v1/tasks/{id}"),
            payload: None,
            label: "delete task request",
        },
    );
}

#[when("{user} toggles hide completed")]
fn user_toggles_hide_completed(world: &WorldFixture, user: String) {
    let world = world.world();
    perform_json_request(
        &world,
        &user,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/view/hide-completed".to_owned(),
            payload: None,
            label: "toggle hide completed request",
        },
    );
}

#[when("{user} logs out")]
fn user_logs_out(world: &WorldFixture, user: String) {
    let world = world.world();
    perform_json_request(
        &world,
        &user,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/logout".to_owned(),
            payload: None,
            label: "logout request",
        },
    );
    // The client honours the expired cookie by forgetting it.
    world.borrow_mut().sessions.remove(&user);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(world.world().borrow().last_status, Some(status));
}

#[then("the task list is empty")]
fn the_task_list_is_empty(world: &WorldFixture) {
    assert!(listed_texts(&world.world()).is_empty());
}

#[then("the incomplete counter is blank")]
fn the_incomplete_counter_is_blank(world: &WorldFixture) {
    let body = last_body(&world.world());
    assert_eq!(
        body.get("incompleteCount").and_then(Value::as_str),
        Some("")
    );
    assert_eq!(body.get("isUserLogged"), Some(&Value::Bool(false)));
}

#[then("the form text is cleared")]
fn the_form_text_is_cleared(world: &WorldFixture) {
    let body = last_body(&world.world());
    assert_eq!(
        body.get("form")
            .and_then(|form| form.get("text"))
            .and_then(Value::as_str),
        Some("")
    );
}

#[then("the incomplete counter for {user} reads \"{label}\"")]
fn the_incomplete_counter_reads(world: &WorldFixture, user: String, label: String) {
    let world = world.world();
    perform_json_request(
        &world,
        &user,
        RequestSpec {
            method: Method::GET,
            path: "/api/v1/tasks/incomplete-count".to_owned(),
            payload: None,
            label: "incomplete count request",
        },
    );
    let body = last_body(&world);
    assert_eq!(body.get("label").and_then(Value::as_str), Some(label.as_str()));
}

#[then("the tasks are listed as \"{expected}\"")]
fn the_tasks_are_listed_as(world: &WorldFixture, expected: String) {
    let expected: Vec<String> = expected.split(", ").map(str::to_owned).collect();
    assert_eq!(listed_texts(&world.world()), expected);
}

#[then("hide completed is off")]
fn hide_completed_is_off(world: &WorldFixture) {
    let body = last_body(&world.world());
    assert_eq!(body.get("hideCompleted"), Some(&Value::Bool(false)));
}

#[then("the response is unauthorised with a trace id")]
fn the_response_is_unauthorised_with_a_trace_id(world: &WorldFixture) {
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(ctx.last_status, Some(401));

    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("unauthorized")
    );
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Anonymous visitors see an empty list"
)]
fn anonymous_visitors_see_an_empty_list(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Adding a task clears the form and bumps the counter"
)]
fn adding_a_task_clears_the_form_and_bumps_the_counter(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Tasks are listed newest first"
)]
fn tasks_are_listed_newest_first(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Completed tasks can be hidden"
)]
fn completed_tasks_can_be_hidden(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Toggling hide completed twice restores the view"
)]
fn toggling_hide_completed_twice_restores_the_view(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Adding a task without a session is rejected"
)]
fn adding_a_task_without_a_session_is_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Blank task text is rejected"
)]
fn blank_task_text_is_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Users cannot touch each other's tasks"
)]
fn users_cannot_touch_each_others_tasks(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Deleting a task removes it from the list"
)]
fn deleting_a_task_removes_it_from_the_list(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/task_list.feature",
    name = "Logging out ends the session"
)]
fn logging_out_ends_the_session(world: WorldFixture) {
    drop(world);
}
