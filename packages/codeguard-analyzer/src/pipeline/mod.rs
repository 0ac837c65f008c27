//! Pipeline orchestration
//!
//! Glue between the Rule Engine and the History Store, plus the outputs
//! built on top of batch results (text reports, summaries, trends).

pub mod history;
pub mod orchestrator;
pub mod report;
pub mod result;
pub mod summary;

pub use history::open_history_store;
pub use orchestrator::AnalysisOrchestrator;
pub use report::{render_lines, schedule_removal, timestamped_filename, write_report};
pub use result::{FileOutcome, FileReport};
pub use summary::{AnalysisSummary, FileIssues, LongFunction, TrendPoint, TrendSeries};
