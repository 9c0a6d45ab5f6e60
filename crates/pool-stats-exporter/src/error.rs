//! Exporter error types.

use thiserror::Error;

/// Errors raised by a [`StatsProvider`](crate::StatsProvider) when it cannot
/// produce a snapshot.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The pool has been closed and no longer reports statistics.
    #[error("connection pool is closed")]
    PoolClosed,

    /// Statistics could not be read for another reason.
    #[error("pool statistics unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while building or running the exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// A metric descriptor could not be created.
    #[error("failed to build descriptor for metric '{metric}': {source}")]
    Descriptor {
        /// Short metric name from the metric table.
        metric: &'static str,
        /// Underlying Prometheus error.
        #[source]
        source: prometheus::Error,
    },

    /// The statistics provider failed during collection.
    #[error("failed to read pool statistics: {0}")]
    Stats(#[from] StatsError),

    /// The exporter could not be registered with a registry.
    #[error("failed to register exporter: {0}")]
    Registration(#[source] prometheus::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_error_converts() {
        let err: ExporterError = StatsError::PoolClosed.into();
        assert!(matches!(err, ExporterError::Stats(StatsError::PoolClosed)));
        assert_eq!(
            err.to_string(),
            "failed to read pool statistics: connection pool is closed"
        );
    }

    #[test]
    fn test_descriptor_error_names_metric() {
        let err = ExporterError::Descriptor {
            metric: "in_use",
            source: prometheus::Error::Msg("bad name".into()),
        };
        assert!(err.to_string().contains("'in_use'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
