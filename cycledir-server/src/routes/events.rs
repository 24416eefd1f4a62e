//! Server-sent event stream of the caller's data changes.
//!
//! Each store change for the caller arrives as a `change` event whose data
//! is the JSON `ChangeKind`. When the stream falls behind and changes are
//! dropped, a `resync` event carries the number of missed changes; clients
//! should refetch `/overview`.

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use tokio::sync::broadcast::{Receiver, error::RecvError};

use cycledir_core::{ChangeKind, StoreChange, UserId};

use crate::identity::CurrentIdentity;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(events))
}

/// What the stream tells a client next.
#[derive(Debug, PartialEq)]
enum StreamItem {
    Change(ChangeKind),
    /// This many changes were dropped before delivery.
    Resync(u64),
}

impl StreamItem {
    fn into_event(self) -> Option<Event> {
        match self {
            StreamItem::Change(change) => match Event::default().event("change").json_data(&change) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping unencodable change");
                    None
                }
            },
            StreamItem::Resync(missed) => {
                Some(Event::default().event("resync").data(missed.to_string()))
            }
        }
    }
}

/// Next item for `user`, or `None` once the feed closes.
async fn next_item(rx: &mut Receiver<StoreChange>, user: &UserId) -> Option<StreamItem> {
    loop {
        match rx.recv().await {
            Ok(StoreChange { user: owner, change }) if &owner == user => {
                return Some(StreamItem::Change(change));
            }
            Ok(_) => {}
            Err(RecvError::Lagged(missed)) => {
                tracing::debug!(%user, missed, "event stream lagged");
                return Some(StreamItem::Resync(missed));
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// GET /events - Stream the caller's changes
async fn events(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let user = identity.require_user()?.clone();
    let rx = state.tracker().subscribe();
    tracing::debug!(%user, "event stream opened");

    let stream = futures::stream::unfold((rx, user), |(mut rx, user)| async move {
        loop {
            if let Some(event) = next_item(&mut rx, &user).await?.into_event() {
                return Some((Ok::<_, Infallible>(event), (rx, user)));
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
