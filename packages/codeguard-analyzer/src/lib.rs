/*
 * CodeGuard - Python Source Linter
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, CodeguardError)
 * - features/    : Vertical slices (parsing → rules)
 * - pipeline/    : Orchestration (history recording, batch, reports)
 * - config/      : YAML + env configuration
 *
 * History persistence lives in the `codeguard-storage` crate.
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing, rules)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{CodeguardConfig, HistoryBackend, HistoryConfig, ReportConfig, RuleConfig};
pub use features::parsing::{Parser, TreeSitterParser};
pub use features::rules::{Alert, AlertDetail, AlertKind, IdentifierRole, RuleEngine};
pub use pipeline::{
    open_history_store, AnalysisOrchestrator, AnalysisSummary, FileOutcome, FileReport,
    TrendSeries,
};
pub use shared::models::{CodeguardError, ErrorKind, Result};

pub use codeguard_storage::{HistoryRecord, HistoryStore};
