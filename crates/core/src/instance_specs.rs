// Static resource specifications for supported MSK broker instance types

use serde_json::{json, Value};

/// Identifier prefix for standard (provisioned) broker instance types.
pub const STANDARD_PREFIX: &str = "kafka.";

/// Identifier prefix for express broker instance types.
pub const EXPRESS_PREFIX: &str = "express.";

/// Per-broker resource specification for one supported instance type.
///
/// All values are fixed at compile time; the table below is the only source
/// of these records and carries no mutation API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceSpec {
    pub instance_type: &'static str,
    pub vcpu: u32,
    pub memory_gb: u32,
    pub network_bandwidth_gbps: f64,
    pub ingress_recommended_mbps: f64,
    pub ingress_max_mbps: f64,
    pub egress_recommended_mbps: f64,
    pub egress_max_mbps: f64,
    pub partitions_per_broker_recommended: u64,
    pub partitions_per_broker_max: u64,
}

impl InstanceSpec {
    /// Whether this is an express instance type.
    pub fn is_express(&self) -> bool {
        self.instance_type.starts_with(EXPRESS_PREFIX)
    }

    /// Whether this is a standard (provisioned) instance type.
    pub fn is_standard(&self) -> bool {
        self.instance_type.starts_with(STANDARD_PREFIX)
    }

    /// Render the spec as a JSON document keyed by the published field names.
    pub fn to_document(&self) -> Value {
        json!({
            "vCPU": self.vcpu,
            "Memory (GB)": self.memory_gb,
            "Network Bandwidth (Gbps)": self.network_bandwidth_gbps,
            "Ingress Recommended (MBps)": self.ingress_recommended_mbps,
            "Ingress Max (MBps)": self.ingress_max_mbps,
            "Egress Recommended (MBps)": self.egress_recommended_mbps,
            "Egress Max (MBps)": self.egress_max_mbps,
            "Partitions per Broker Recommended": self.partitions_per_broker_recommended,
            "Partitions per Broker Max": self.partitions_per_broker_max,
        })
    }
}

const fn spec(
    instance_type: &'static str,
    vcpu: u32,
    memory_gb: u32,
    network_bandwidth_gbps: f64,
    ingress: (f64, f64),
    egress: (f64, f64),
    partitions: (u64, u64),
) -> InstanceSpec {
    InstanceSpec {
        instance_type,
        vcpu,
        memory_gb,
        network_bandwidth_gbps,
        ingress_recommended_mbps: ingress.0,
        ingress_max_mbps: ingress.1,
        egress_recommended_mbps: egress.0,
        egress_max_mbps: egress.1,
        partitions_per_broker_recommended: partitions.0,
        partitions_per_broker_max: partitions.1,
    }
}

/// Supported broker instance types.
///
/// Columns: vCPU, memory (GB), network bandwidth (Gbps),
/// ingress (recommended, max) MBps, egress (recommended, max) MBps,
/// partitions per broker (recommended, max).
pub const INSTANCE_SPECS: &[InstanceSpec] = &[
    spec("kafka.t3.small", 2, 2, 5.0, (4.8, 7.2), (9.6, 18.0), (300, 300)),
    spec("kafka.m5.large", 2, 8, 10.0, (4.8, 7.2), (9.6, 18.0), (1000, 1500)),
    spec("kafka.m5.xlarge", 4, 16, 10.0, (9.6, 14.4), (19.2, 36.0), (1000, 1500)),
    spec("kafka.m5.2xlarge", 8, 32, 10.0, (19.2, 28.8), (38.4, 72.0), (2000, 3000)),
    spec("kafka.m5.4xlarge", 16, 64, 10.0, (38.4, 57.6), (76.8, 144.0), (4000, 6000)),
    spec("kafka.m5.8xlarge", 32, 128, 10.0, (76.9, 115.4), (153.8, 288.5), (4000, 6000)),
    spec("kafka.m5.12xlarge", 48, 192, 12.0, (115.4, 173.1), (230.8, 432.7), (4000, 6000)),
    spec("kafka.m5.16xlarge", 64, 256, 20.0, (153.8, 230.7), (307.7, 576.9), (4000, 6000)),
    spec("kafka.m5.24xlarge", 96, 384, 25.0, (153.8, 230.7), (307.7, 576.9), (4000, 6000)),
    spec("kafka.m7g.large", 2, 8, 12.5, (4.8, 7.2), (9.6, 18.0), (1000, 1500)),
    spec("kafka.m7g.xlarge", 4, 16, 15.0, (9.6, 14.4), (19.2, 36.0), (1000, 1500)),
    spec("kafka.m7g.2xlarge", 8, 32, 15.0, (19.2, 28.8), (38.4, 72.0), (2000, 3000)),
    spec("kafka.m7g.4xlarge", 16, 64, 15.0, (38.4, 57.6), (76.8, 144.0), (4000, 6000)),
    spec("kafka.m7g.8xlarge", 32, 128, 15.0, (76.9, 115.4), (153.8, 288.5), (4000, 6000)),
    spec("kafka.m7g.12xlarge", 48, 192, 22.5, (115.4, 173.1), (230.8, 432.7), (4000, 6000)),
    spec("kafka.m7g.16xlarge", 64, 256, 30.0, (153.8, 230.7), (307.7, 576.9), (4000, 6000)),
    spec("express.m7g.large", 2, 8, 12.5, (15.6, 23.4), (31.2, 58.5), (1000, 1500)),
    spec("express.m7g.xlarge", 4, 16, 15.0, (31.2, 46.8), (62.5, 117.0), (1000, 1500)),
    spec("express.m7g.2xlarge", 8, 32, 15.0, (62.5, 93.7), (125.0, 234.2), (2000, 3000)),
    spec("express.m7g.4xlarge", 16, 64, 15.0, (124.9, 187.5), (249.8, 468.7), (4000, 6000)),
    spec("express.m7g.8xlarge", 32, 128, 15.0, (250.0, 375.0), (500.0, 937.5), (4000, 6000)),
    spec("express.m7g.12xlarge", 48, 192, 22.5, (375.0, 562.5), (750.0, 1406.2), (4000, 6000)),
    spec("express.m7g.16xlarge", 64, 256, 30.0, (500.0, 750.0), (1000.0, 1875.0), (4000, 6000)),
];

/// Look up a spec by exact instance type identifier.
pub fn instance_spec(instance_type: &str) -> Option<&'static InstanceSpec> {
    INSTANCE_SPECS
        .iter()
        .find(|s| s.instance_type == instance_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_types() {
        let spec = instance_spec("kafka.m5.large").unwrap();
        assert_eq!(spec.vcpu, 2);
        assert_eq!(spec.memory_gb, 8);
        assert_eq!(spec.partitions_per_broker_recommended, 1000);
        assert_eq!(spec.partitions_per_broker_max, 1500);
    }

    #[test]
    fn lookup_is_exact_match() {
        assert!(instance_spec("kafka.m5.LARGE").is_none());
        assert!(instance_spec("m5.large").is_none());
        assert!(instance_spec("").is_none());
    }

    #[test]
    fn identifiers_are_unique() {
        for (i, a) in INSTANCE_SPECS.iter().enumerate() {
            for b in &INSTANCE_SPECS[i + 1..] {
                assert_ne!(a.instance_type, b.instance_type);
            }
        }
    }

    #[test]
    fn every_spec_is_standard_or_express() {
        for spec in INSTANCE_SPECS {
            assert!(
                spec.is_standard() ^ spec.is_express(),
                "{} must carry exactly one known prefix",
                spec.instance_type
            );
        }
    }

    #[test]
    fn document_uses_published_field_names() {
        let doc = instance_spec("kafka.t3.small").unwrap().to_document();
        assert_eq!(doc["vCPU"], 2);
        assert_eq!(doc["Memory (GB)"], 2);
        assert_eq!(doc["Network Bandwidth (Gbps)"], 5.0);
        assert_eq!(doc["Partitions per Broker Max"], 300);
    }
}
