// Resource registry with URI template resolution

use crate::protocol::{ReadResourceResult, ResourceDescriptor, ResourceTemplateDescriptor};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Parameters captured from `{placeholder}` segments of a templated URI.
pub type TemplateParams = HashMap<String, String>;

/// Error from reading a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A captured parameter failed validation (wrong type, missing).
    #[error("{0}")]
    InvalidParams(String),

    /// Anything else.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// What a resource publishes about itself.
///
/// The URI may contain `{placeholder}` path segments, in which case the
/// resource lists as a template and concrete URIs are resolved against it.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

impl ResourceSchema {
    pub fn is_template(&self) -> bool {
        self.uri.contains('{')
    }
}

/// Resource executor trait
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Get the resource schema for MCP
    fn schema(&self) -> ResourceSchema;

    /// Read the resource at the given concrete URI
    async fn read(
        &self,
        uri: &str,
        params: &TemplateParams,
    ) -> Result<ReadResourceResult, ResourceError>;
}

/// Registry of available resources, fixed and templated.
pub struct ResourceRegistry {
    resources: Vec<Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Register a resource
    pub fn register(&mut self, resource: Arc<dyn Resource>) {
        self.resources.push(resource);
    }

    /// Descriptors of all fixed-URI resources
    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.resources
            .iter()
            .map(|r| r.schema())
            .filter(|s| !s.is_template())
            .map(|s| ResourceDescriptor {
                uri: s.uri,
                name: s.name,
                description: s.description,
                mime_type: s.mime_type,
            })
            .collect()
    }

    /// Descriptors of all templated resources
    pub fn list_templates(&self) -> Vec<ResourceTemplateDescriptor> {
        self.resources
            .iter()
            .map(|r| r.schema())
            .filter(ResourceSchema::is_template)
            .map(|s| ResourceTemplateDescriptor {
                uri_template: s.uri,
                name: s.name,
                description: s.description,
                mime_type: s.mime_type,
            })
            .collect()
    }

    /// Resolve a concrete URI to a resource and its captured parameters.
    pub fn resolve(&self, uri: &str) -> Option<(Arc<dyn Resource>, TemplateParams)> {
        self.resources.iter().find_map(|resource| {
            match_uri_template(&resource.schema().uri, uri)
                .map(|params| (resource.clone(), params))
        })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a concrete URI against a pattern, segment by segment.
///
/// `{name}` segments capture the corresponding (non-empty) URI segment;
/// every other segment must match exactly. A fixed pattern matches only
/// itself.
pub fn match_uri_template(pattern: &str, uri: &str) -> Option<TemplateParams> {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let uri_segments: Vec<&str> = uri.split('/').collect();

    if pattern_segments.len() != uri_segments.len() {
        return None;
    }

    let mut params = TemplateParams::new();
    for (pat, seg) in pattern_segments.iter().zip(&uri_segments) {
        if let Some(name) = pat.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            if seg.is_empty() {
                return None;
            }
            params.insert(name.to_string(), (*seg).to_string());
        } else if pat != seg {
            return None;
        }
    }

    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_pattern_matches_only_itself() {
        let params = match_uri_template("resource://msk-best-practices", "resource://msk-best-practices");
        assert_eq!(params, Some(TemplateParams::new()));

        assert!(match_uri_template("resource://msk-best-practices", "resource://other").is_none());
        assert!(match_uri_template(
            "resource://msk-best-practices",
            "resource://msk-best-practices/extra"
        )
        .is_none());
    }

    #[test]
    fn template_captures_segments() {
        let params = match_uri_template(
            "resource://msk-best-practices/cluster/{instance_type}/{number_of_brokers}",
            "resource://msk-best-practices/cluster/kafka.m5.large/3",
        )
        .unwrap();
        assert_eq!(params["instance_type"], "kafka.m5.large");
        assert_eq!(params["number_of_brokers"], "3");
    }

    #[test]
    fn template_rejects_empty_and_missing_segments() {
        let pattern = "resource://msk-best-practices/cluster/{instance_type}/{number_of_brokers}";
        assert!(match_uri_template(pattern, "resource://msk-best-practices/cluster/kafka.m5.large").is_none());
        assert!(match_uri_template(pattern, "resource://msk-best-practices/cluster//3").is_none());
        assert!(match_uri_template(pattern, "resource://other/cluster/kafka.m5.large/3").is_none());
    }
}
