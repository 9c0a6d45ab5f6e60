//! The fixed metric table and per-cycle samples.
//!
//! Every exported metric is a row in [`METRICS`]. Describe and collect both
//! walk this table in order.

use prometheus::core::Desc;
use prometheus::proto::{Gauge, Metric, MetricFamily, MetricType};

use crate::stats::PoolStats;

/// Subsystem label inserted between the namespace and the metric name.
pub const SUBSYSTEM: &str = "conn_pool";

/// One row of the metric table.
#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    /// Metric name without namespace or subsystem.
    pub name: &'static str,
    /// Help text shown by the exposition format.
    pub help: &'static str,
    /// Reads the metric value out of a snapshot.
    pub value: fn(&PoolStats) -> f64,
}

/// All exported metrics, in export order.
///
/// The cumulative counters (waits and closures) are exported as gauges.
pub const METRICS: [MetricDef; 8] = [
    MetricDef {
        name: "max_open_conns",
        help: "Maximum number of open connections to the database",
        value: |s| f64::from(s.max_open_connections),
    },
    MetricDef {
        name: "open_conns",
        help: "The number of established connections both in use and idle",
        value: |s| f64::from(s.open_connections),
    },
    MetricDef {
        name: "in_use",
        help: "The number of connections currently in use",
        value: |s| f64::from(s.in_use),
    },
    MetricDef {
        name: "idle",
        help: "The number of idle connections",
        value: |s| f64::from(s.idle),
    },
    MetricDef {
        name: "wait_count",
        help: "The total number of connections waited for",
        value: |s| s.wait_count as f64,
    },
    MetricDef {
        name: "wait_duration_microseconds",
        help: "The total time blocked waiting for a new connection",
        value: |s| s.wait_duration_micros() as f64,
    },
    MetricDef {
        name: "max_idle_closed",
        help: "The total number of connections closed due to the max idle setting",
        value: |s| s.max_idle_closed as f64,
    },
    MetricDef {
        name: "max_lifetime_closed",
        help: "The total number of connections closed due to the max lifetime setting",
        value: |s| s.max_lifetime_closed as f64,
    },
];

/// Join namespace, subsystem and name with underscores, skipping empty parts.
///
/// Returns an empty string when `name` is empty.
#[must_use]
pub fn build_fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Type of an exported sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Value sampled at collection time; may go up or down.
    Gauge,
}

impl MetricKind {
    fn proto_type(self) -> MetricType {
        match self {
            MetricKind::Gauge => MetricType::GAUGE,
        }
    }
}

/// A single value produced during one collection cycle.
#[derive(Debug, Clone, Copy)]
pub struct MetricSample<'a> {
    /// Descriptor the value belongs to.
    pub desc: &'a Desc,
    /// Sampled value.
    pub value: f64,
    /// Metric type.
    pub kind: MetricKind,
}

impl MetricSample<'_> {
    /// Convert the sample into a single-metric Prometheus family carrying the
    /// descriptor's constant labels.
    #[must_use]
    pub fn to_metric_family(&self) -> MetricFamily {
        let mut gauge = Gauge::default();
        gauge.set_value(self.value);

        let mut metric = Metric::default();
        metric.set_label(self.desc.const_label_pairs.clone().into());
        metric.set_gauge(gauge);

        let mut family = MetricFamily::default();
        family.set_name(self.desc.fq_name.clone());
        family.set_help(self.desc.help.clone());
        family.set_field_type(self.kind.proto_type());
        family.mut_metric().push(metric);
        family
    }
}
