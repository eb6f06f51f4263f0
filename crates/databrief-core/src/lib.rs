//! DataBrief AI domain layer.
//!
//! Data model, pure transforms, and the trait seams the session engine
//! is orchestrated over. No I/O lives in this crate.

pub mod analysis;
pub mod capability;
pub mod chart;
pub mod error;
pub mod history;
pub mod report;
pub mod service;
pub mod simulation;

// Re-export common error type
pub use error::{BriefError, Result};

pub use analysis::{AnalysisResult, ChartType, SeriesPoint};
pub use chart::ChartModel;
pub use history::{HistoryEntry, MessageRole};
pub use report::SessionReport;
pub use service::{AnalysisService, AnalyzeRequest, Attachment};
pub use simulation::{SimulatedPoint, SimulationFactor, simulate};
