use async_trait::async_trait;
use kfetch::{BeforeFetch, FetchOptions};

/// Logs each outgoing request before it is dispatched
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceBeforeFetch;

#[async_trait]
impl BeforeFetch for TraceBeforeFetch {
    async fn before_fetch(&self, options: Option<&FetchOptions>) -> anyhow::Result<()> {
        let header_count = options
            .and_then(|options| options.headers.as_ref())
            .map_or(0, |headers| headers.len());
        let body_len = options
            .and_then(|options| options.body.as_ref())
            .map(|body| body.len());

        tracing::info!(header_count, body_len = ?body_len, "Sending request");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trace_before_fetch_never_fails() {
        let hook = TraceBeforeFetch;
        assert!(hook.before_fetch(None).await.is_ok());

        let options = FetchOptions::new().header("a", "b").body("xyz");
        assert!(hook.before_fetch(Some(&options)).await.is_ok());
    }
}
