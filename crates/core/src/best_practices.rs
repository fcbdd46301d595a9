// Best-practice thresholds and the cluster recommendation calculator
//
// Everything here is a pure function of the static instance-spec table and
// the caller's arguments. The only failure mode is an identifier that is
// absent from the table, which is returned as a value rather than raised.

use crate::instance_specs::{instance_spec, InstanceSpec, INSTANCE_SPECS};
use serde_json::{json, Map, Value};
use thiserror::Error;

// Utilization and reliability thresholds. Fixed guidance, not derived from
// any input.
pub const RECOMMENDED_CPU_UTILIZATION_PERCENT: u32 = 60;
pub const MAX_CPU_UTILIZATION_PERCENT: u32 = 70;
pub const STORAGE_UTILIZATION_WARNING_PERCENT: u32 = 85;
pub const STORAGE_UTILIZATION_CRITICAL_PERCENT: u32 = 90;
pub const RECOMMENDED_REPLICATION_FACTOR: u32 = 3;
pub const RECOMMENDED_MIN_INSYNC_REPLICAS: u32 = 2;
pub const UNDER_REPLICATED_PARTITIONS_TOLERANCE: u32 = 0;
pub const LEADER_IMBALANCE_TOLERANCE_PERCENT: u32 = 10;

const INPUT_NOTE: &str = "provided as input";
const HOST_NOTE: &str = "available on the host";
const THROUGHPUT_NOTE: &str = "Note: CloudWatch metrics may be in bytes; ensure proper conversion between bytes and megabytes";
const MAX_PARTITIONS_NOTE: &str = "Note: Each partition should be 3-way replicated. For example, 1000 total partitions with three brokers will mean each broker has 1000 partitions.";
const EXPRESS_REPLICATION_NOTE: &str =
    "Note: For express clusters, replication factor should always be 3";

/// The requested identifier is not in the instance-spec table.
///
/// This is guidance data, not a fault: callers render the message and carry
/// on. The offending identifier is embedded in the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Instance type '{0}' is not supported or recognized.")]
pub struct UnsupportedInstanceType(pub String);

impl UnsupportedInstanceType {
    /// Render the error the way the resource surface publishes it.
    pub fn to_document(&self) -> Value {
        json!({ "Error": self.to_string() })
    }
}

/// Derived best-practice recommendation for one cluster shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRecommendation {
    pub instance_type: String,
    pub number_of_brokers: u32,
    pub spec: &'static InstanceSpec,
    pub recommended_cluster_partitions: u64,
    pub max_cluster_partitions: u64,
    pub replication_factor: u32,
    /// True when the express override forced the replication factor to 3.
    pub express_forced_replication: bool,
    pub min_insync_replicas: u32,
}

/// Compute the recommendation for a cluster of `number_of_brokers` brokers
/// of the given instance type.
///
/// Replication guidance degrades for clusters smaller than the recommended
/// factor of 3: both the factor and the minimum ISR drop to the broker
/// count. Express instance types force the factor back to 3, but the
/// minimum ISR keeps the value from the broker-count branch.
pub fn cluster_best_practices(
    instance_type: &str,
    number_of_brokers: u32,
) -> Result<ClusterRecommendation, UnsupportedInstanceType> {
    let spec = instance_spec(instance_type)
        .ok_or_else(|| UnsupportedInstanceType(instance_type.to_string()))?;

    let recommended_cluster_partitions =
        spec.partitions_per_broker_recommended * u64::from(number_of_brokers);
    let max_cluster_partitions = spec.partitions_per_broker_max * u64::from(number_of_brokers);

    let mut replication_factor = if number_of_brokers >= RECOMMENDED_REPLICATION_FACTOR {
        RECOMMENDED_REPLICATION_FACTOR
    } else {
        number_of_brokers
    };
    let min_insync_replicas = if number_of_brokers >= RECOMMENDED_REPLICATION_FACTOR {
        RECOMMENDED_MIN_INSYNC_REPLICAS
    } else {
        number_of_brokers
    };

    let express_forced_replication = spec.is_express();
    if express_forced_replication {
        replication_factor = RECOMMENDED_REPLICATION_FACTOR;
    }

    Ok(ClusterRecommendation {
        instance_type: instance_type.to_string(),
        number_of_brokers,
        spec,
        recommended_cluster_partitions,
        max_cluster_partitions,
        replication_factor,
        express_forced_replication,
        min_insync_replicas,
    })
}

/// Compute the recommendation and render it as the published JSON document.
///
/// An unrecognized instance type renders as `{"Error": ...}` so the caller
/// can pass the document through unchanged.
pub fn cluster_best_practices_document(instance_type: &str, number_of_brokers: u32) -> Value {
    match cluster_best_practices(instance_type, number_of_brokers) {
        Ok(recommendation) => recommendation.to_document(),
        Err(err) => err.to_document(),
    }
}

impl ClusterRecommendation {
    /// Render the recommendation with the published field names and the
    /// guidance annotations embedded in the values.
    pub fn to_document(&self) -> Value {
        let spec = self.spec;
        let replication_factor = if self.express_forced_replication {
            format!("{} ({})", self.replication_factor, EXPRESS_REPLICATION_NOTE)
        } else {
            format!("{} (recommended)", self.replication_factor)
        };

        json!({
            "Instance Type": format!("{} ({})", self.instance_type, INPUT_NOTE),
            "Number of Brokers": format!("{} ({})", self.number_of_brokers, INPUT_NOTE),
            "vCPU per Broker": spec.vcpu,
            "Memory (GB) per Broker": format!("{} ({})", spec.memory_gb, HOST_NOTE),
            "Network Bandwidth (Gbps) per Broker":
                format!("{:.1} ({})", spec.network_bandwidth_gbps, HOST_NOTE),
            "Ingress Throughput Recommended (MBps)":
                format!("{:.1} ({})", spec.ingress_recommended_mbps, THROUGHPUT_NOTE),
            "Ingress Throughput Max (MBps)":
                format!("{:.1} ({})", spec.ingress_max_mbps, THROUGHPUT_NOTE),
            "Egress Throughput Recommended (MBps)":
                format!("{:.1} ({})", spec.egress_recommended_mbps, THROUGHPUT_NOTE),
            "Egress Throughput Max (MBps)":
                format!("{:.1} ({})", spec.egress_max_mbps, THROUGHPUT_NOTE),
            "Recommended Partitions per Broker": spec.partitions_per_broker_recommended,
            "Max Partitions per Broker":
                format!("{} ({})", spec.partitions_per_broker_max, MAX_PARTITIONS_NOTE),
            "Recommended Max Partitions per Cluster": self.recommended_cluster_partitions,
            "Max Partitions per Cluster": self.max_cluster_partitions,
            "CPU Utilization Guidelines": cpu_utilization_guidelines(),
            "Disk Utilization Guidelines": disk_utilization_guidelines(),
            "Replication Factor": replication_factor,
            "Minimum In-Sync Replicas": self.min_insync_replicas,
            "Under-Replicated Partitions Tolerance": UNDER_REPLICATED_PARTITIONS_TOLERANCE,
            "Leader Imbalance Tolerance (%)": LEADER_IMBALANCE_TOLERANCE_PERCENT,
        })
    }
}

fn cpu_utilization_guidelines() -> String {
    format!(
        "Keep below {}% regularly; never exceed {}%.",
        RECOMMENDED_CPU_UTILIZATION_PERCENT, MAX_CPU_UTILIZATION_PERCENT
    )
}

fn disk_utilization_guidelines() -> String {
    format!(
        "Warning at {}%, critical at {}%.",
        STORAGE_UTILIZATION_WARNING_PERCENT, STORAGE_UTILIZATION_CRITICAL_PERCENT
    )
}

/// Render the full knowledge base: thresholds with descriptions, the whole
/// instance-spec table, and the identifiers partitioned by category prefix.
pub fn best_practices_catalog() -> Value {
    let mut instance_specs = Map::new();
    for spec in INSTANCE_SPECS {
        instance_specs.insert(spec.instance_type.to_string(), spec.to_document());
    }

    let standard: Vec<&str> = INSTANCE_SPECS
        .iter()
        .filter(|s| s.is_standard())
        .map(|s| s.instance_type)
        .collect();
    let express: Vec<&str> = INSTANCE_SPECS
        .iter()
        .filter(|s| s.is_express())
        .map(|s| s.instance_type)
        .collect();

    json!({
        "thresholds": {
            "cpu_utilization": {
                "recommended_max": RECOMMENDED_CPU_UTILIZATION_PERCENT,
                "critical_max": MAX_CPU_UTILIZATION_PERCENT,
                "description": cpu_utilization_guidelines(),
            },
            "disk_utilization": {
                "warning": STORAGE_UTILIZATION_WARNING_PERCENT,
                "critical": STORAGE_UTILIZATION_CRITICAL_PERCENT,
                "description": disk_utilization_guidelines(),
            },
            "replication": {
                "recommended_factor": RECOMMENDED_REPLICATION_FACTOR,
                "min_insync_replicas": RECOMMENDED_MIN_INSYNC_REPLICAS,
                "description": "For optimal resilience, use replication factor 3 with minimum ISR of 2.",
            },
            "under_replicated_partitions": {
                "tolerance": UNDER_REPLICATED_PARTITIONS_TOLERANCE,
                "description": "Any deviation from zero indicates potential replication health issues.",
            },
            "leader_imbalance": {
                "tolerance_percent": LEADER_IMBALANCE_TOLERANCE_PERCENT,
                "description": format!(
                    "Maintain leader distribution within {}% balance to avoid performance bottlenecks.",
                    LEADER_IMBALANCE_TOLERANCE_PERCENT
                ),
            },
        },
        "instance_specs": instance_specs,
        "instance_categories": {
            "standard": standard,
            "express": express,
        },
    })
}
