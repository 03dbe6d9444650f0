//! Builders for HTTP and WebSocket state from the configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use todo_backend::domain::TaskService;
use todo_backend::domain::ports::{LoginService, TaskCommand, TaskQuery};
use todo_backend::inbound::http::state::HttpState;
use todo_backend::inbound::ws::state::WsState;
use todo_backend::outbound::events::BroadcastTaskEvents;
use todo_backend::outbound::memory::InMemoryTaskRepository;
use todo_backend::outbound::persistence::DieselTaskRepository;

use super::ServerConfig;

/// Build a command/query service pair using the pool-backed service when a
/// pool is available, otherwise using the fallback pair.
fn build_service_pair<Pool, S, Cmd, Query, MakeService, Fallback, Cast>(
    pool: &Option<Pool>,
    make_service: MakeService,
    fallback: Fallback,
    cast: Cast,
) -> (Arc<Cmd>, Arc<Query>)
where
    S: 'static,
    Cmd: ?Sized + 'static,
    Query: ?Sized + 'static,
    MakeService: FnOnce(&Pool) -> S,
    Fallback: FnOnce() -> (Arc<Cmd>, Arc<Query>),
    Cast: FnOnce(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
{
    match pool {
        Some(pool) => {
            let service = Arc::new(make_service(pool));
            cast(service)
        }
        None => fallback(),
    }
}

fn split_ports<S>(service: Arc<S>) -> (Arc<dyn TaskCommand>, Arc<dyn TaskQuery>)
where
    S: TaskCommand + TaskQuery + 'static,
{
    (
        service.clone() as Arc<dyn TaskCommand>,
        service as Arc<dyn TaskQuery>,
    )
}

/// Task ports over PostgreSQL when a pool is configured, otherwise over the
/// in-memory store. Both publish to `events`.
fn build_task_ports(
    config: &ServerConfig,
    events: Arc<BroadcastTaskEvents>,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn TaskCommand>, Arc<dyn TaskQuery>) {
    let memory_events = events.clone();
    let memory_clock = clock.clone();
    build_service_pair(
        &config.db_pool,
        |pool| {
            TaskService::new(
                Arc::new(DieselTaskRepository::new(pool.clone())),
                events,
                clock,
            )
        },
        || {
            split_ports(Arc::new(TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                memory_events,
                memory_clock,
            )))
        },
        split_ports,
    )
}

/// Adapter state shared by every worker.
pub(super) struct AppStates {
    pub(super) http: web::Data<HttpState>,
    pub(super) ws: web::Data<WsState>,
}

/// Build the shared HTTP and WebSocket state around one event hub.
pub(super) fn build_app_states(config: &ServerConfig) -> AppStates {
    let events = Arc::new(BroadcastTaskEvents::new(config.event_capacity));
    let (commands, tasks) = build_task_ports(config, events.clone(), Arc::new(DefaultClock));
    let login: Arc<dyn LoginService> = Arc::new(config.accounts.clone());

    AppStates {
        http: web::Data::new(HttpState::new(login, tasks, commands)),
        ws: web::Data::new(WsState::new(events)),
    }
}
