// Core domain logic for the MSK best-practices server

pub mod best_practices;
pub mod instance_specs;

pub use best_practices::*;
pub use instance_specs::{
    instance_spec, InstanceSpec, EXPRESS_PREFIX, INSTANCE_SPECS, STANDARD_PREFIX,
};
