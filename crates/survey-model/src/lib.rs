//! Survey variable model.
//!
//! This crate provides the descriptors the analysis builder works with:
//! - **Variables**: name, label, measurement type, value labels, valid count
//! - **Catalog**: the ordered, read-only list of variables of a dataset
//!
//! # Module Organization
//!
//! - [`measurement`]: Measurement levels (nominal, ordinal, scale, string)
//! - [`variable`]: [`Variable`] and its [`ValueLabels`] codebook
//! - [`catalog`]: [`VariableCatalog`] and the [`CatalogProvider`] seam
//! - [`error`]: Construction errors
//!
//! # Example
//!
//! ```
//! use survey_model::{CatalogProvider, MeasurementType, MockCatalog};
//!
//! let catalog = MockCatalog.load().unwrap();
//! let region = catalog.get("Region").unwrap();
//!
//! assert_eq!(region.measurement_type, MeasurementType::Nominal);
//! assert_eq!(region.value_labels().map(|labels| labels.len()), Some(4));
//! ```

pub mod catalog;
pub mod error;
pub mod measurement;
pub mod variable;

pub use catalog::{CatalogProvider, MockCatalog, VariableCatalog};
pub use error::{ModelError, Result};
pub use measurement::MeasurementType;
pub use variable::{ValueLabel, ValueLabels, Variable};
