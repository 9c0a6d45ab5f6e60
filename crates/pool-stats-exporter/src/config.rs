//! Exporter configuration.

use std::collections::HashMap;

/// Configuration for a [`PoolStatsExporter`](crate::PoolStatsExporter).
///
/// The namespace is prefixed to every metric name and the constant labels are
/// attached, unchanged, to all eight metrics. Names are not checked here;
/// malformed ones are rejected when the exporter builds its descriptors.
///
/// # Example
///
/// ```rust
/// use pool_stats_exporter::ExporterConfig;
///
/// let config = ExporterConfig::new("app")
///     .const_label("pool", "primary")
///     .const_label("db", "orders");
///
/// assert_eq!(config.const_labels.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExporterConfig {
    /// Prefix for every metric name (may be empty).
    pub namespace: String,

    /// Labels applied identically to every exported metric.
    pub const_labels: HashMap<String, String>,
}

impl ExporterConfig {
    /// Create a configuration with the given namespace and no labels.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            const_labels: HashMap::new(),
        }
    }

    /// Set the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add a single constant label, replacing any previous value for `name`.
    #[must_use]
    pub fn const_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.const_labels.insert(name.into(), value.into());
        self
    }

    /// Replace the whole set of constant labels.
    #[must_use]
    pub fn const_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.const_labels = labels;
        self
    }
}
