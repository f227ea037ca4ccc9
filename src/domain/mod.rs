//! Domain logic: naming, feature selection and the project-mutation pipeline.

pub mod env_file;
mod error;
pub mod features;
pub mod manifest;
pub mod name;
pub mod packages;
pub mod patch;
pub mod project;

pub use error::AppError;
pub use features::{FeatureFlags, FeatureSelection};
pub use project::Project;
