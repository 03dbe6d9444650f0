//! Server harness and shared world for task list behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use chrono::{Duration, TimeZone, Utc};
use mockable::MockClock;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use todo_backend::Trace;
use todo_backend::domain::{TaskService, Username};
use todo_backend::inbound::http::state::HttpState;
use todo_backend::inbound::http::{json_config, query_config};
use todo_backend::inbound::http::tasks::{
    create_task, delete_task, incomplete_count, list_tasks, set_checked, toggle_hide_completed,
};
use todo_backend::inbound::http::users::{current_user, login, logout};
use todo_backend::outbound::events::BroadcastTaskEvents;
use todo_backend::outbound::memory::{InMemoryAccounts, InMemoryTaskRepository};

pub(crate) struct TaskWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) sessions: HashMap<String, Cookie<'static>>,
    pub(crate) task_ids: HashMap<String, String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<TaskWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

/// Clock that advances one second per reading so creations stay ordered.
fn stepping_clock() -> MockClock {
    let start = Utc
        .timestamp_opt(1_750_000_000, 0)
        .single()
        .expect("valid timestamp");
    let ticks = AtomicI64::new(0);
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .returning(move || start + Duration::seconds(ticks.fetch_add(1, Ordering::SeqCst)));
    clock
}

fn accounts() -> InMemoryAccounts {
    InMemoryAccounts::new()
        .with_account(Username::new("ada").expect("valid username"), "lovelace")
        .with_account(Username::new("bob").expect("valid username"), "builder")
}

async fn spawn_task_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(login)
            .service(logout)
            .service(current_user)
            .service(incomplete_count)
            .service(list_tasks)
            .service(create_task)
            .service(set_checked)
            .service(delete_task)
            .service(toggle_hide_completed);

        App::new()
            .app_data(http_data.clone())
            .app_data(json_config())
            .app_data(query_config())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    (runtime, local)
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let service = Arc::new(TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(BroadcastTaskEvents::default()),
        Arc::new(stepping_clock()),
    ));
    let http_state = HttpState::new(Arc::new(accounts()), service.clone(), service);

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_task_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(TaskWorld {
        runtime,
        local,
        base_url,
        server,
        sessions: HashMap::new(),
        task_ids: HashMap::new(),
        last_status: None,
        last_body: None,
        last_trace_id: None,
    }));

    WorldFixture { world }
}
