//! Failure containment around a handler future.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;

use super::error::ToolError;

/// Run `future` so that neither a panic nor an overrun escapes.
///
/// A panic becomes [`ToolError::Internal`]; passing `deadline` turns expiry
/// into [`ToolError::Timeout`]. The future is dropped on expiry, which
/// releases whatever remote call it was waiting on.
pub async fn contain<T, F>(future: F, deadline: Option<Duration>) -> Result<T, ToolError>
where
    F: Future<Output = Result<T, ToolError>>,
{
    let guarded = AssertUnwindSafe(future).catch_unwind();

    let outcome = match deadline {
        Some(limit) => tokio::time::timeout(limit, guarded)
            .await
            .map_err(|_| ToolError::Timeout(limit))?,
        None => guarded.await,
    };

    outcome.unwrap_or_else(|panic| {
        Err(ToolError::internal(format!(
            "tool handler panicked: {}",
            panic_message(panic.as_ref())
        )))
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
