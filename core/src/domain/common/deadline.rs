//! Deadline-bounded execution of external calls.
//!
//! A call that exceeds its budget is dropped, which cancels the in-flight
//! request, and reported as [`CoreError::Timeout`].

use std::{future::Future, time::Duration};

use tracing::{info, warn};

use crate::domain::common::entities::app_errors::CoreError;

pub async fn with_deadline<F, T>(operation: &str, budget: Duration, call: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                budget_secs = budget.as_secs(),
                "external call exceeded its budget"
            );
            Err(CoreError::Timeout {
                operation: operation.to_string(),
                budget_secs: budget.as_secs(),
            })
        }
    }
}

/// Runs `make_call` under `budget`; on timeout runs it once more under
/// `extended_budget`. Any other error is returned as is.
pub async fn with_deadline_retry<M, F, T>(
    operation: &str,
    budget: Duration,
    extended_budget: Duration,
    mut make_call: M,
) -> Result<T, CoreError>
where
    M: FnMut() -> F,
    F: Future<Output = Result<T, CoreError>>,
{
    match with_deadline(operation, budget, make_call()).await {
        Err(e) if e.is_timeout() => {
            info!(
                operation,
                extended_budget_secs = extended_budget.as_secs(),
                "retrying once with an extended budget"
            );
            with_deadline(operation, extended_budget, make_call()).await
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[tokio::test(start_paused = true)]
    async fn test_call_within_budget_returns_value() {
        let result = with_deadline("lookup", Duration::from_secs(30), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, CoreError>(42)
        })
        .await;

        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let result = with_deadline("lookup", Duration::from_secs(30), async {
            tokio::time::sleep(Duration::from_secs(120)).await;
            Ok::<_, CoreError>(42)
        })
        .await;

        assert_eq!(
            result,
            Err(CoreError::Timeout {
                operation: "lookup".to_string(),
                budget_secs: 30,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_inner_error_is_not_masked() {
        let result: Result<u32, CoreError> =
            with_deadline("lookup", Duration::from_secs(30), async {
                Err(CoreError::upstream("recipes", "quota exceeded"))
            })
            .await;

        assert!(matches!(result, Err(CoreError::Upstream { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_uses_extended_budget_once() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let result = with_deadline_retry(
            "analysis",
            Duration::from_secs(60),
            Duration::from_secs(90),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(75)).await;
                    Ok::<_, CoreError>("done")
                }
            },
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_second_timeout() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let result = with_deadline_retry(
            "analysis",
            Duration::from_secs(60),
            Duration::from_secs(90),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(600)).await;
                    Ok::<_, CoreError>("done")
                }
            },
        )
        .await;

        assert!(matches!(result, Err(CoreError::Timeout { budget_secs: 90, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_skipped_for_non_timeout_errors() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let result: Result<(), CoreError> = with_deadline_retry(
            "analysis",
            Duration::from_secs(60),
            Duration::from_secs(90),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(CoreError::upstream("gemini", "401 unauthorized"))
                }
            },
        )
        .await;

        assert!(matches!(result, Err(CoreError::Upstream { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
