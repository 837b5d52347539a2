//! Timeout wrapper for page operations

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Run a page operation under a deadline.
///
/// A timeout and an operation failure both surface as errors; the message
/// names the operation so the two are distinguishable in logs.
pub async fn with_page_timeout<F, T>(operation: F, timeout: Duration, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {} seconds",
            timeout.as_secs()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_timeout_by_name() {
        let err = with_page_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            Duration::from_millis(10),
            "Navigation",
        )
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("Navigation timeout"));
    }

    #[tokio::test]
    async fn passes_through_result() {
        let value = with_page_timeout(async { Ok(7) }, Duration::from_secs(1), "op")
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
