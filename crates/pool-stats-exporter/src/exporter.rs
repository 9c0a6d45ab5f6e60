//! Prometheus collector for connection pool statistics.
//!
//! [`PoolStatsExporter`] builds its eight descriptors once, at construction,
//! and reads one fresh [`PoolStats`](crate::PoolStats) snapshot from its
//! provider on every collection cycle.

use std::collections::HashMap;

use prometheus::Registry;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;

use crate::config::ExporterConfig;
use crate::error::ExporterError;
use crate::metric::{METRICS, MetricDef, MetricKind, MetricSample, SUBSYSTEM, build_fq_name};
use crate::stats::StatsProvider;

/// Exposes a connection pool's statistics as eight gauge metrics.
///
/// The exporter holds no mutable state after construction, so concurrent
/// collections are safe whenever the provider allows concurrent reads.
///
/// # Example
///
/// ```rust
/// use pool_stats_exporter::{ExporterConfig, PoolStats, PoolStatsExporter, stats};
/// use prometheus::Registry;
///
/// let provider = stats::from_fn(|| PoolStats {
///     max_open_connections: 10,
///     open_connections: 7,
///     in_use: 3,
///     idle: 4,
///     ..PoolStats::default()
/// });
///
/// let exporter = PoolStatsExporter::new(
///     provider,
///     ExporterConfig::new("app").const_label("pool", "primary"),
/// )?;
///
/// let registry = Registry::new();
/// exporter.register(&registry)?;
/// assert_eq!(registry.gather().len(), 8);
/// # Ok::<(), pool_stats_exporter::ExporterError>(())
/// ```
pub struct PoolStatsExporter<P> {
    provider: P,
    config: ExporterConfig,
    descs: Vec<Desc>,
}

impl<P: StatsProvider> PoolStatsExporter<P> {
    /// Create an exporter reading from `provider`.
    ///
    /// Either all eight descriptors are built or an error is returned. A
    /// malformed namespace or label name surfaces as
    /// [`ExporterError::Descriptor`] for the first metric in the table. The
    /// provider is not called.
    pub fn new(provider: P, config: ExporterConfig) -> Result<Self, ExporterError> {
        let descs = METRICS
            .iter()
            .map(|def| {
                build_desc(&config, def).map_err(|source| ExporterError::Descriptor {
                    metric: def.name,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            namespace = %config.namespace,
            const_labels = config.const_labels.len(),
            metrics = descs.len(),
            "pool stats exporter created"
        );

        Ok(Self {
            provider,
            config,
            descs,
        })
    }

    /// Create an exporter from a namespace and a constant label map.
    pub fn with_namespace(
        provider: P,
        namespace: impl Into<String>,
        const_labels: HashMap<String, String>,
    ) -> Result<Self, ExporterError> {
        Self::new(
            provider,
            ExporterConfig::new(namespace).const_labels(const_labels),
        )
    }

    /// The eight metric descriptors, in export order.
    #[must_use]
    pub fn descriptors(&self) -> &[Desc] {
        &self.descs
    }

    /// Write every descriptor into `sink`, in export order.
    ///
    /// Never calls the provider.
    pub fn describe_into<'a, E>(&'a self, sink: &mut E)
    where
        E: Extend<&'a Desc>,
    {
        sink.extend(self.descs.iter());
    }

    /// Read one snapshot and turn it into eight samples.
    ///
    /// The provider is called exactly once. A provider failure is returned
    /// as-is; no zero-valued or partial samples are produced.
    pub fn samples(&self) -> Result<Vec<MetricSample<'_>>, ExporterError> {
        let stats = self.provider.stats()?;

        tracing::trace!(
            open = stats.open_connections,
            in_use = stats.in_use,
            idle = stats.idle,
            "collected pool statistics"
        );

        Ok(METRICS
            .iter()
            .zip(&self.descs)
            .map(|(def, desc)| MetricSample {
                desc,
                value: (def.value)(&stats),
                kind: MetricKind::Gauge,
            })
            .collect())
    }

    /// Collect the current metric families, surfacing provider failures.
    pub fn try_collect(&self) -> Result<Vec<MetricFamily>, ExporterError> {
        Ok(self
            .samples()?
            .iter()
            .map(MetricSample::to_metric_family)
            .collect())
    }

    /// Get the exporter configuration.
    #[must_use]
    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Get the underlying statistics provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: StatsProvider + 'static> PoolStatsExporter<P> {
    /// Register the exporter with a Prometheus registry.
    ///
    /// `Registry::gather` cannot report errors: when the provider fails, the
    /// failure is logged and this exporter contributes no families to that
    /// scrape. Use [`try_collect`](Self::try_collect) to observe the error.
    pub fn register(self, registry: &Registry) -> Result<(), ExporterError> {
        registry
            .register(Box::new(self))
            .map_err(ExporterError::Registration)
    }
}

/// Build the descriptor for one table row.
///
/// `Desc::new` checks metric and label name syntax; names starting with `__`
/// are reserved by Prometheus and rejected here.
fn build_desc(config: &ExporterConfig, def: &MetricDef) -> prometheus::Result<Desc> {
    if let Some(name) = config.const_labels.keys().find(|name| name.starts_with("__")) {
        return Err(prometheus::Error::Msg(format!(
            "'{name}' is a reserved label name"
        )));
    }

    Desc::new(
        build_fq_name(&config.namespace, SUBSYSTEM, def.name),
        def.help.to_string(),
        Vec::new(),
        config.const_labels.clone(),
    )
}

impl<P: StatsProvider> Collector for PoolStatsExporter<P> {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = Vec::with_capacity(self.descs.len());
        self.describe_into(&mut descs);
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        // The registry has no error channel; report and emit nothing.
        match self.try_collect() {
            Ok(families) => families,
            Err(e) => {
                tracing::error!(
                    namespace = %self.config.namespace,
                    error = %e,
                    "failed to collect pool statistics"
                );
                Vec::new()
            }
        }
    }
}

impl<P> std::fmt::Debug for PoolStatsExporter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolStatsExporter")
            .field("namespace", &self.config.namespace)
            .field("const_labels", &self.config.const_labels)
            .field("metrics", &self.descs.len())
            .finish_non_exhaustive()
    }
}
