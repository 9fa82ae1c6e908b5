use std::future::Future;

use vocab_core::ApiResult;

use crate::store::{Reducer, Store};

/// Apply a local change before the backend confirms it.
///
/// `apply` is dispatched immediately. If `request` fails, `rollback` is
/// dispatched; it must restore the exact value `apply` replaced. The
/// request's outcome is returned unchanged so each caller decides whether
/// the failure is surfaced.
///
/// # Errors
///
/// Returns the request's `AppError` after rolling back.
pub async fn optimistic<S, T, F>(
    store: &Store<S>,
    apply: S::Action,
    rollback: S::Action,
    request: F,
) -> ApiResult<T>
where
    S: Reducer,
    F: Future<Output = ApiResult<T>>,
{
    store.dispatch(apply);
    let result = request.await;
    if result.is_err() {
        store.dispatch(rollback);
    }
    result
}
