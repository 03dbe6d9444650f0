//! Per-connection WebSocket handler.
//!
//! Forwards the signed-in user's task events to the socket and keeps the
//! connection alive with heartbeats. The public contract pings every 5s and
//! considers a connection idle after 10s without client traffic. Tests shorten
//! these intervals to speed up feedback.

use std::time::{Duration, Instant};

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use futures_util::StreamExt;
use tokio::time;
use tracing::{debug, warn};

use crate::domain::ports::TaskEventStream;
use crate::domain::{TaskEvent, UserId};
use crate::inbound::ws::messages::TaskFeedMessage;

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_ws_session(
    viewer: UserId,
    feed: TaskEventStream,
    session: Session,
    stream: MessageStream,
) {
    WsSession::new(viewer).run(feed, session, stream).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    FeedClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    UnexpectedMessage,
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    viewer: UserId,
}

impl WsSession {
    fn new(viewer: UserId) -> Self {
        Self { viewer }
    }

    async fn run(&self, mut feed: TaskEventStream, mut session: Session, mut stream: MessageStream) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        loop {
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    self.handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message)
                        .await
                }
                event = feed.next() => {
                    self.handle_feed_event(&mut session, event).await
                }
            };

            if let Err(error) = result {
                self.log_shutdown_reason(&error);
                let close_action = close_action_for(&error);
                close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn handle_heartbeat_tick(
        &self,
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_stream_message(
        &self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(message) => handle_message(session, last_heartbeat, message).await,
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn handle_feed_event(
        &self,
        session: &mut Session,
        event: Option<TaskEvent>,
    ) -> Result<(), SessionError> {
        let Some(event) = event else {
            return Err(SessionError::FeedClosed);
        };
        if !event.is_visible_to(&self.viewer) {
            return Ok(());
        }

        debug!(task_id = %event.task_id, kind = ?event.kind, "forwarding task event");
        send_json(session, &TaskFeedMessage::from(&event))
            .await
            .map_err(SessionError::Network)
    }

    fn log_shutdown_reason(&self, error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!(user_id = %self.viewer, "WebSocket heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(error = %error, "WebSocket protocol error");
            }
            SessionError::Network(error) => {
                warn!(error = %error, "WebSocket send failed; closing connection");
            }
            SessionError::FeedClosed => {
                warn!("task event feed closed; closing connection");
            }
            SessionError::UnexpectedMessage
            | SessionError::ClientClosed(_)
            | SessionError::StreamClosed => {}
        }
    }
}

async fn handle_message(
    session: &mut Session,
    last_heartbeat: &mut Instant,
    message: Message,
) -> Result<(), SessionError> {
    *last_heartbeat = Instant::now();
    match message {
        Message::Ping(payload) => session.pong(&payload).await.map_err(SessionError::Network),
        Message::Pong(_) | Message::Continuation(_) | Message::Nop => Ok(()),
        // The feed is server-to-client only.
        Message::Text(_) | Message::Binary(_) => Err(SessionError::UnexpectedMessage),
        Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
    }
}

async fn send_json<T: serde::Serialize>(session: &mut Session, payload: &T) -> Result<(), Closed> {
    match serde_json::to_string(payload) {
        Ok(body) => session.text(body).await,
        Err(error) => {
            warn!(error = %error, "Failed to serialize WebSocket payload");
            Ok(())
        }
    }
}

fn close_action_for(error: &SessionError) -> CloseAction {
    match error {
        SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Normal,
            description: Some("heartbeat timeout".to_owned()),
        })),
        SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Protocol,
            description: Some("protocol error".to_owned()),
        })),
        SessionError::UnexpectedMessage => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Policy,
            description: Some("feed is read-only".to_owned()),
        })),
        SessionError::FeedClosed => CloseAction::Close(Some(CloseReason {
            code: CloseCode::Away,
            description: Some("server shutting down".to_owned()),
        })),
        SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
        SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
    }
}

async fn close_session_if_needed(session: Session, close_action: CloseAction) {
    if let CloseAction::Close(reason) = close_action {
        if let Err(error) = session.close(reason).await {
            warn!(error = %error, "Failed to close WebSocket session");
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
