use pricetrail_core::PricetrailError;

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// On timeout returns `PricetrailError::RequestTimeout("request")`, which call
/// sites remap to a more specific operation label.
///
/// # Errors
/// Returns `RequestTimeout` if `deadline` elapses before every task finishes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, PricetrailError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse per-source errors into a single outcome once nothing succeeded.
///
/// Rules:
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllSourcesFailed(errors)`, nested aggregates flattened.
#[must_use]
pub fn collapse_errors(errors: Vec<PricetrailError>, not_found_what: Option<String>) -> PricetrailError {
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, PricetrailError::NotFound { .. }))
    {
        return PricetrailError::not_found(what);
    }
    PricetrailError::AllSourcesFailed(
        errors.into_iter().flat_map(PricetrailError::flatten).collect(),
    )
}
