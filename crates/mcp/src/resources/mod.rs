pub mod best_practices;
mod registry;

pub use best_practices::{BestPracticesCatalogResource, ClusterBestPracticesResource};
pub use registry::{Resource, ResourceError, ResourceRegistry, ResourceSchema, TemplateParams};
