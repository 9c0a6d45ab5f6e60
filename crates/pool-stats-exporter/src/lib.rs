//! # pool-stats-exporter
//!
//! Prometheus collector for database connection pool statistics.
//!
//! On every scrape the exporter asks a [`StatsProvider`] for one
//! [`PoolStats`] snapshot and turns it into eight gauges named
//! `{namespace}_conn_pool_{metric}`:
//!
//! | Metric | Value |
//! |---|---|
//! | `max_open_conns` | configured connection limit |
//! | `open_conns` | established connections, in use and idle |
//! | `in_use` | connections currently checked out |
//! | `idle` | idle connections |
//! | `wait_count` | total number of waits for a connection |
//! | `wait_duration_microseconds` | total wait time in microseconds |
//! | `max_idle_closed` | connections closed by the max idle setting |
//! | `max_lifetime_closed` | connections closed by the max lifetime setting |
//!
//! ## Example
//!
//! ```rust
//! use pool_stats_exporter::{ExporterConfig, PoolStats, PoolStatsExporter, stats};
//! use prometheus::Registry;
//!
//! // Any `StatsProvider` works here; a real pool would report live numbers.
//! let pool = stats::from_fn(|| PoolStats {
//!     max_open_connections: 20,
//!     open_connections: 5,
//!     in_use: 2,
//!     idle: 3,
//!     ..PoolStats::default()
//! });
//!
//! let exporter = PoolStatsExporter::new(
//!     pool,
//!     ExporterConfig::new("app").const_label("pool", "primary"),
//! )?;
//!
//! let registry = Registry::new();
//! exporter.register(&registry)?;
//!
//! let names: Vec<String> = registry
//!     .gather()
//!     .iter()
//!     .map(|mf| mf.get_name().to_string())
//!     .collect();
//! assert!(names.contains(&"app_conn_pool_in_use".to_string()));
//! # Ok::<(), pool_stats_exporter::ExporterError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod exporter;
pub mod metric;
pub mod stats;

// Configuration
pub use config::ExporterConfig;

// Error types
pub use error::{ExporterError, StatsError};

// Exporter types
pub use exporter::PoolStatsExporter;
pub use metric::{MetricKind, MetricSample, SUBSYSTEM, build_fq_name};

// Provider capability
pub use stats::{PoolStats, StatsProvider};
