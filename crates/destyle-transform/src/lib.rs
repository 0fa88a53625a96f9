//! Transform pipeline for migrating styled-components definitions to
//! CSS Modules.
//!
//! The pipeline recognizes `const <Name> = styled.<tag>` template
//! definitions, converts each eligible one into a plain component plus a
//! stylesheet rule, rewrites literal `className` references through the
//! generated stylesheet, and commits the result in place or into a
//! dedicated component directory.

pub mod classref;
pub mod component;
pub mod ident;
pub mod matcher;
pub mod naming;
pub mod placement;
pub mod runner;
pub mod splice;

pub use classref::{rewrite_class_attributes, ClassRewrite};
pub use component::{rewrite_component, ClassNameTable, ComponentTransform};
pub use ident::{class_name_to_camel_case, lower_first};
pub use matcher::{eligibility, find_definitions, SkipReason, StyledDefinition};
pub use naming::StylesheetNaming;
pub use placement::{classify, FileRewriteResult, Placement, PlacementError};
pub use runner::{migrate, transform_source, MigrateError, MigrateOptions, MigrateSummary};
