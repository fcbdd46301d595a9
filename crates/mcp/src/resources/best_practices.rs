// Best-practice resources for MSK cluster sizing and health evaluation

use crate::protocol::{ReadResourceResult, ResourceContents};
use crate::resources::{Resource, ResourceError, ResourceSchema, TemplateParams};
use msk_mcp_core::best_practices::{best_practices_catalog, cluster_best_practices_document};
use tracing::debug;

pub const CATALOG_URI: &str = "resource://msk-best-practices";
pub const CLUSTER_URI_TEMPLATE: &str =
    "resource://msk-best-practices/cluster/{instance_type}/{number_of_brokers}";

/// The full knowledge base: thresholds, the complete instance-spec table,
/// and the standard/express category split.
pub struct BestPracticesCatalogResource;

#[async_trait::async_trait]
impl Resource for BestPracticesCatalogResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            uri: CATALOG_URI.to_string(),
            name: "MSKBestPractices".to_string(),
            description: "Comprehensive best practices, thresholds, and instance \
                          specifications for MSK clusters in a single JSON document."
                .to_string(),
            mime_type: "application/json".to_string(),
        }
    }

    async fn read(
        &self,
        uri: &str,
        _params: &TemplateParams,
    ) -> Result<ReadResourceResult, ResourceError> {
        debug!("Reading best-practices catalog");
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::json(uri, &best_practices_catalog())],
        })
    }
}

/// Per-cluster recommendation, parameterized by instance type and broker
/// count.
///
/// An unrecognized instance type is not a protocol error: the read succeeds
/// and yields the structured `{"Error": ...}` document, so clients can
/// render it directly.
pub struct ClusterBestPracticesResource;

#[async_trait::async_trait]
impl Resource for ClusterBestPracticesResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            uri: CLUSTER_URI_TEMPLATE.to_string(),
            name: "MSKClusterBestPractices".to_string(),
            description: "Best practices and recommended quotas for an MSK cluster \
                          of the given broker instance type and broker count."
                .to_string(),
            mime_type: "application/json".to_string(),
        }
    }

    async fn read(
        &self,
        uri: &str,
        params: &TemplateParams,
    ) -> Result<ReadResourceResult, ResourceError> {
        let instance_type = params
            .get("instance_type")
            .ok_or_else(|| ResourceError::InvalidParams("missing instance_type".to_string()))?;
        let raw_brokers = params
            .get("number_of_brokers")
            .ok_or_else(|| ResourceError::InvalidParams("missing number_of_brokers".to_string()))?;
        let number_of_brokers: u32 = raw_brokers.parse().map_err(|_| {
            ResourceError::InvalidParams(format!(
                "number_of_brokers must be a non-negative integer, got '{}'",
                raw_brokers
            ))
        })?;

        debug!(
            instance_type = %instance_type,
            number_of_brokers,
            "Reading cluster best practices"
        );

        let document = cluster_best_practices_document(instance_type, number_of_brokers);
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::json(uri, &document)],
        })
    }
}
