use std::sync::atomic::Ordering;

use axum::{extract::State, Json};
use serde_json::json;
use tokio::time::{timeout, Duration};

use crate::error::ApiError;
use crate::SharedState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn livez() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness: refuses while the process is draining, then proves a pooled
/// connection can answer a trivial query within the probe deadline.
pub async fn readyz(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.readiness.load(Ordering::SeqCst) {
        return Err(ApiError::ServiceUnavailable("draining".into()));
    }

    probe_database(&state).await?;

    Ok(Json(json!({
        "status": "ok",
        "database": "ok",
        "application": env!("CARGO_PKG_NAME"),
    })))
}

async fn probe_database(state: &SharedState) -> Result<(), ApiError> {
    let client = timeout(PROBE_TIMEOUT, state.pool.get())
        .await
        .map_err(|_| ApiError::ServiceUnavailable("pool checkout timed out".into()))?
        .map_err(|err| ApiError::ServiceUnavailable(format!("pool checkout failed: {err}")))?;

    timeout(PROBE_TIMEOUT, client.simple_query("SELECT 1"))
        .await
        .map_err(|_| ApiError::ServiceUnavailable("database probe timed out".into()))?
        .map_err(|err| ApiError::ServiceUnavailable(format!("database probe failed: {err}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn readyz_refuses_while_draining() {
        let state = crate::test_state();
        state.readiness.store(false, Ordering::SeqCst);

        match readyz(State(state)).await {
            Err(ApiError::ServiceUnavailable(reason)) => assert_eq!(reason, "draining"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
