use std::future::Future;

/// Awaits `request` then runs `complete` exactly once, whatever the outcome.
///
/// Success and error stay with the caller as the `Result` the request resolves to.
pub async fn with_completion<F, T, C>(request: F, complete: C) -> T
where
    F: Future<Output = T>,
    C: FnOnce(),
{
    let output = request.await;
    complete();
    output
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::with_completion;

    #[tokio::test]
    async fn completion_runs_on_success_and_error() {
        let calls = AtomicUsize::new(0);

        let ok: Result<u8, String> =
            with_completion(async { Ok(1) }, || {
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        let err: Result<u8, String> =
            with_completion(async { Err("boom".to_string()) }, || {
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(Ok(1), ok);
        assert_eq!(Err("boom".to_string()), err);
        assert_eq!(2, calls.load(Ordering::SeqCst));
    }
}
