//! WebSocket inbound adapter streaming task changes to signed-in users.
//!
//! Responsibilities:
//! - validate upgrade requests (session and same-origin check)
//! - subscribe to the task event feed before the handshake completes
//! - keep WebSocket-specific concerns at the edge of the system

use actix_web::http::Uri;
use actix_web::http::header::{HeaderValue, ORIGIN};
use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get};
use tracing::{error, info, warn};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;

mod session;

pub mod messages;
pub mod state;

/// Handle WebSocket upgrade for the `/ws` endpoint.
#[get("/ws")]
pub async fn ws_entry(
    state: web::Data<state::WsState>,
    session: SessionContext,
    req: HttpRequest,
    stream: Payload,
) -> ApiResult<HttpResponse> {
    let viewer = session.require_user_id()?;

    let mut origin_iter = req.headers().get_all(ORIGIN);
    if let Some(origin_header) = origin_iter.next() {
        if origin_iter.next().is_some() {
            error!("Multiple Origin headers on WebSocket upgrade");
            return Err(Error::invalid_request("invalid Origin header"));
        }
        let host = req.connection_info().host().to_owned();
        validate_origin(origin_header, &host)?;
    }

    let feed = state.events.subscribe();
    let (response, ws_session, messages) = actix_ws::handle(&req, stream).map_err(|error| {
        error!(error = %error, "WebSocket upgrade failed");
        Error::internal("WebSocket upgrade failed")
    })?;

    info!(user_id = %viewer, "task feed connected");
    actix_web::rt::spawn(session::handle_ws_session(
        viewer, feed, ws_session, messages,
    ));
    Ok(response)
}

/// Accept an Origin only when its authority matches the host serving `/ws`.
fn validate_origin(origin_header: &HeaderValue, host: &str) -> Result<(), Error> {
    let origin_value = origin_header.to_str().map_err(|error| {
        error!(error = %error, "Failed to parse Origin header as string");
        Error::invalid_request("invalid Origin header")
    })?;

    let origin: Uri = origin_value.parse().map_err(|error| {
        error!(error = %error, "Failed to parse Origin header as URI");
        Error::invalid_request("invalid Origin header")
    })?;

    let same_origin = matches!(origin.scheme_str(), Some("http" | "https"))
        && origin
            .authority()
            .is_some_and(|authority| authority.as_str().eq_ignore_ascii_case(host));

    if same_origin {
        Ok(())
    } else {
        warn!(
            origin = origin_value,
            host, "Rejected WS upgrade due to cross-site Origin"
        );
        Err(Error::forbidden("origin not allowed"))
    }
}
