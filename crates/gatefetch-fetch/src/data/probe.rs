use std::time::Duration;

/// Checks applied by the transport probe before a transfer starts.
///
/// # Examples
///
/// ```
/// use gatefetch_fetch::ProbeOptions;
/// use std::time::Duration;
///
/// let options = ProbeOptions::default()
///     .expected_content_type("application/x-msdos-program")
///     .require_content_length(true)
///     .timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Media type the resource must declare, compared without parameters.
    ///
    /// Default: None (any content type)
    pub expected_content_type: Option<String>,

    /// Reject resources that do not declare a Content-Length.
    ///
    /// Default: false
    pub require_content_length: bool,

    /// Timeout for the HEAD request.
    ///
    /// Default: 5s
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            expected_content_type: None,
            require_content_length: false,
            timeout: Duration::from_secs(5),
        }
    }
}

impl ProbeOptions {
    #[must_use]
    pub fn expected_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.expected_content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn require_content_length(mut self, require: bool) -> Self {
        self.require_content_length = require;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What the probe learned about an accepted resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
}
