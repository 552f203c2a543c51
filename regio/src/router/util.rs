use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use regio_core::RegioError;
use tokio_util::sync::CancellationToken;

/// Drive one region future to a settled `Result`.
///
/// Rules:
/// - Deadline elapsed → `RegionTimeout { region, timeout_ms }`.
/// - Token triggered first → `Cancelled { region }`.
/// - Transport panicked → `Transport { region, "transport panicked: .." }`.
/// - Otherwise the future's own result.
pub async fn guarded_call<T, Fut>(
    region: &str,
    timeout: Duration,
    cancel: Option<&CancellationToken>,
    fut: Fut,
) -> Result<T, RegioError>
where
    Fut: core::future::Future<Output = Result<T, RegioError>>,
{
    let timed = tokio::time::timeout(timeout, AssertUnwindSafe(fut).catch_unwind());
    let settled = match cancel {
        Some(token) => tokio::select! {
            biased;
            () = token.cancelled() => return Err(RegioError::cancelled(region)),
            r = timed => r,
        },
        None => timed.await,
    };
    match settled {
        Err(_elapsed) => Err(RegioError::region_timeout(region, timeout)),
        Ok(Err(panic)) => Err(RegioError::transport(
            region,
            format!("transport panicked: {}", panic_message(panic.as_ref())),
        )),
        Ok(Ok(res)) => res,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
