use std::{fmt::Display, future::Future};

use coursehub_core::connection::{ConnectionError, RetryPolicy, Service};

/// Runs `attempt` until it succeeds or the policy's attempts are spent.
///
/// Each attempt is bounded by `policy.attempt_timeout`; a timed-out attempt
/// counts as a failure. Failed attempts wait `policy.delay` before the next
/// one. When every attempt failed, the last failure is reported through
/// [`ConnectionError::Exhausted`].
pub async fn retry_connect<T, E, F, Fut>(
    service: Service,
    target: &str,
    policy: &RetryPolicy,
    mut attempt: F,
) -> Result<T, ConnectionError>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempts = 0;

    loop {
        attempts += 1;

        let failure = match tokio::time::timeout(policy.attempt_timeout, attempt()).await {
            Ok(Ok(handle)) => {
                tracing::info!(%service, endpoint = %target, attempt = attempts, "Connected");
                return Ok(handle);
            }
            Ok(Err(e)) => ConnectionError::AttemptFailed {
                service,
                reason: e.to_string(),
            },
            Err(_) => ConnectionError::TimedOut {
                service,
                timeout_ms: u64::try_from(policy.attempt_timeout.as_millis()).unwrap_or(u64::MAX),
            },
        };

        if attempts >= max_attempts {
            tracing::error!(
                %service,
                endpoint = %target,
                attempts,
                error = %failure,
                "Giving up on connection"
            );
            return Err(ConnectionError::Exhausted {
                service,
                attempts,
                last_error: failure.to_string(),
            });
        }

        tracing::warn!(
            %service,
            endpoint = %target,
            attempt = attempts,
            retries_left = policy.retries_left(attempts),
            error = %failure,
            "Connection attempt failed, retrying"
        );
        tokio::time::sleep(policy.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn fast_policy(retries: u32) -> RetryPolicy {
        RetryPolicy::fixed(retries, Duration::from_millis(1))
            .with_attempt_timeout(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_first_attempt_succeeds() {
        let calls = &AtomicU32::new(0);

        let result = retry_connect(Service::Store, "memory", &fast_policy(3), || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(42)
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = &AtomicU32::new(0);

        let result = retry_connect(Service::Cache, "memory", &fast_policy(3), || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err("Connection refused".to_string())
            } else {
                Ok("handle")
            }
        })
        .await;

        assert_eq!(result, Ok("handle"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_error() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> =
            retry_connect(Service::Store, "memory", &fast_policy(2), || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(format!("failure {n}"))
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            result,
            Err(ConnectionError::Exhausted {
                service: Service::Store,
                attempts: 3,
                last_error: "store connection attempt failed: failure 3".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_zero_retries_makes_one_attempt() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> =
            retry_connect(Service::Cache, "memory", &fast_policy(0), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("nope")
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(ConnectionError::Exhausted { attempts: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_hanging_attempt_times_out() {
        let policy = RetryPolicy::fixed(1, Duration::from_millis(1))
            .with_attempt_timeout(Duration::from_millis(10));

        let result: Result<(), _> = retry_connect(Service::Store, "memory", &policy, || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, String>(())
        })
        .await;

        match result {
            Err(ConnectionError::Exhausted {
                attempts,
                last_error,
                ..
            }) => {
                assert_eq!(attempts, 2);
                assert!(last_error.contains("timed out after 10ms"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
