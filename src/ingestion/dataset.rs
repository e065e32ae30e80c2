//! Unified dataset loading.
//!
//! [`load_dataset`] is the entrypoint entity tables are built on: it resolves
//! a dataset's file inside a data directory, reads the CSV, normalizes column
//! types, and promotes the natural key (or attaches a positional index).
//!
//! When an observer is configured, this function reports:
//!
//! - `on_success` on success, with row count stats
//! - `on_coercion_failure` for each column left uncoerced (non-fatal)
//! - `on_failure` on failure, with a computed severity
//! - `on_alert` on failure when the computed severity is >=
//!   [`LoadOptions::alert_at_or_above`]

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataType, Table};

use super::csv;
use super::normalize::normalize_columns;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Static descriptor of one source dataset.
///
/// One spec per entity, known at compile time: file name, natural key column
/// (or none), and the per-column target types.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSpec {
    /// Dataset name used in diagnostics.
    pub name: &'static str,
    /// File name resolved inside the data directory.
    pub filename: &'static str,
    /// Natural key column promoted to the row index, if any.
    pub key: Option<&'static str>,
    /// Declared columns and their target types, in order.
    pub columns: &'static [(&'static str, DataType)],
}

/// Options controlling dataset loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load one dataset: read CSV, normalize types, attach the row index.
pub fn load_dataset(
    data_dir: impl AsRef<Path>,
    spec: &DatasetSpec,
    options: &LoadOptions,
) -> LoadResult<Table> {
    let path = data_dir.as_ref().join(spec.filename);
    let ctx = LoadContext {
        dataset: spec.name.to_owned(),
        path: path.clone(),
    };

    let result = load_stages(&path, spec, options, &ctx);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn load_stages(
    path: &Path,
    spec: &DatasetSpec,
    options: &LoadOptions,
    ctx: &LoadContext,
) -> LoadResult<Table> {
    let names: Vec<&str> = spec.columns.iter().map(|(name, _)| *name).collect();
    let mut table = csv::read_csv_from_path(path, &names)?;

    normalize_columns(&mut table, spec.columns, |failure| {
        if let Some(obs) = options.observer.as_ref() {
            obs.on_coercion_failure(ctx, failure);
        }
    });

    match spec.key {
        Some(key) => table.index_by(key),
        // Tables without a natural key keep the dense positional index.
        None => Ok(table),
    }
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        LoadError::SchemaMismatch { .. }
        | LoadError::DuplicateKey { .. }
        | LoadError::InvalidKey { .. } => LoadSeverity::Error,
    }
}
