//! Analysis configuration library.
//!
//! This crate holds everything behind the analysis canvas:
//!
//! - **Types** (`types`): analysis types, roles, confidence levels, report options
//! - **Rules** (`rules`): which measurement levels each role accepts per analysis type
//! - **Builder** (`builder`): guarded assignment, run readiness, run requests
//! - **Preview** (`preview`): placeholder output skeletons
//! - **Session** (`session`): a catalog plus a builder driven by discrete commands
//!
//! # Error Handling
//!
//! Rejected drops are ordinary values ([`Rejection`]). Everything that can
//! actually fail returns the crate's [`AnalysisError`], built with `thiserror`.
//!
//! # Example
//!
//! ```
//! use survey_analysis::{AnalysisDefaults, AnalysisSession, SessionCommand};
//! use survey_model::{CatalogProvider, MockCatalog};
//!
//! let catalog = MockCatalog.load().unwrap();
//! let mut session = AnalysisSession::new(&catalog, AnalysisDefaults::default());
//!
//! for line in ["type t-test", "assign dependent Age", "assign groups Gender"] {
//!     let command: SessionCommand = line.parse().unwrap();
//!     session.apply(command).unwrap();
//! }
//! let request = session.builder().prepare_run().unwrap();
//! assert_eq!(request.dependent.as_deref(), Some("Age"));
//! ```

pub mod builder;
pub mod configuration;
pub mod error;
pub mod preview;
pub mod rules;
pub mod session;
pub mod types;

// Re-export unified error type
pub use error::{AnalysisError, Result};

// Re-export commonly used types
pub use builder::{
    AnalysisBuilder, AnalysisRequest, AssignOutcome, Readiness, Rejection, weight_candidates,
};
pub use configuration::{AnalysisConfiguration, AnalysisDefaults};
pub use preview::{
    CrosstabPreview, CrosstabRow, GroupStatistics, PLACEHOLDER, Preview, PreviewCell,
    TOTAL_LABEL, TTestPreview, TestStatistics, render_preview,
};
pub use rules::{ROLE_RULES, RoleRule};
pub use session::{AnalysisSession, CommandOutcome, SessionCommand};
pub use types::{AnalysisType, ConfidenceLevel, ReportOptions, Role};
