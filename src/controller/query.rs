//! Observable state of an asynchronous read

/// Fallback shown when a failed read carries no message
pub const GENERIC_QUERY_ERROR: &str = "Error getting dsync data";

/// State of a remote read: the last data received plus loading/error flags.
///
/// Data from a previous successful read is kept while a new read is loading
/// or after it fails, the same way a query cache keeps stale data around.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    /// A read that has been issued but not answered
    pub fn pending() -> Self {
        Self {
            data: None,
            is_loading: true,
            is_error: false,
            error: None,
        }
    }

    /// A successfully answered read
    #[cfg(test)]
    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            is_error: false,
            error: None,
        }
    }

    /// Mark a new read as in flight
    pub fn start(&mut self) {
        self.is_loading = true;
    }

    /// Record a successful answer
    pub fn resolve(&mut self, data: T) {
        self.data = Some(data);
        self.is_loading = false;
        self.is_error = false;
        self.error = None;
    }

    /// Record a failed read
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.is_error = true;
        self.error = Some(message.into());
    }

    /// Message to show for a failed read, or `None` if the read did not fail
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error && self.error.is_none() {
            return None;
        }
        Some(
            self.error
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_QUERY_ERROR),
        )
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_pending() {
        let q: QueryState<Vec<u8>> = QueryState::default();
        assert!(q.is_loading);
        assert!(q.data.is_none());
        assert!(q.error_message().is_none());
    }

    #[test]
    fn test_failure_keeps_stale_data() {
        let mut q = QueryState::ready(vec![1]);
        q.start();
        q.fail("timeout");

        assert!(!q.is_loading);
        assert!(q.is_error);
        assert_eq!(q.data, Some(vec![1]));
        assert_eq!(q.error_message(), Some("timeout"));
    }

    #[test]
    fn test_empty_message_uses_generic_fallback() {
        let mut q: QueryState<()> = QueryState::pending();
        q.fail("");
        assert_eq!(q.error_message(), Some(GENERIC_QUERY_ERROR));
    }

    #[test]
    fn test_resolve_clears_error() {
        let mut q: QueryState<u8> = QueryState::pending();
        q.fail("boom");
        q.start();
        q.resolve(3);

        assert!(!q.is_error);
        assert!(q.error_message().is_none());
        assert_eq!(q.data, Some(3));
    }
}
