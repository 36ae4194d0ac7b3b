//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod accessories;
pub mod sse;

use axum::Router;
use axum::routing::{get, put};

use remobridge_app::ports::RemoteApi;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<A>() -> Router<AppState<A>>
where
    A: RemoteApi + 'static,
{
    Router::new()
        .route("/accessories", get(accessories::list::<A>))
        .route("/accessories/{name}", get(accessories::get::<A>))
        .route(
            "/accessories/{name}/characteristics/{kind}",
            put(accessories::write_characteristic::<A>),
        )
        .route("/events/stream", get(sse::stream::<A>))
}
