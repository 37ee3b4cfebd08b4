//! Range entry point: validation, batch chunking, progress, merge.
//!
//! Chunking exists purely for progress reporting and cancellation
//! granularity; it never changes per-record semantics. Within a chunk the
//! reconciler is strictly sequential.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use crmnorm_model::{
    ContactId, NormalizationResult, NormalizeError, NormalizeOptions, Result,
};
use crmnorm_rules::PhoneCapability;

use crate::change_log::ChangeLog;
use crate::reconciler::Reconciler;
use crate::store::ContactStore;

/// Parameters of one batch request.
#[derive(Debug, Clone)]
pub struct RunnerParams {
    pub from: ContactId,
    pub to: ContactId,
    /// Records per chunk; coerced to at least 1.
    pub batch_size: u32,
    /// Report what would change without persisting anything.
    pub dry_run: bool,
    /// Optional change-log destination; appended to, never truncated.
    pub log_file: Option<PathBuf>,
    /// Render a progress bar (off in library/test use).
    pub progress: bool,
}

impl RunnerParams {
    pub fn new(from: ContactId, to: ContactId) -> Self {
        Self {
            from,
            to,
            batch_size: 100,
            dry_run: false,
            log_file: None,
            progress: false,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Run a normalization batch over the inclusive id range.
///
/// Rejects an out-of-order range before any work; everything after that is
/// per-record and never aborts the range.
pub fn run_range<S: ContactStore, P: PhoneCapability>(
    store: &mut S,
    provider: &P,
    options: &NormalizeOptions,
    params: &RunnerParams,
) -> Result<NormalizationResult> {
    if params.from > params.to {
        return Err(NormalizeError::InvalidRange {
            from: params.from,
            to: params.to,
        });
    }
    let batch_size = params.batch_size.max(1);
    let change_log = params.log_file.as_ref().map(ChangeLog::new);

    let total = u64::from(params.to.0) - u64::from(params.from.0) + 1;
    let chunk_count = total.div_ceil(u64::from(batch_size));
    let bar = if params.progress {
        let bar = ProgressBar::new(chunk_count);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} chunks {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let mut result = NormalizationResult::new();
    let mut chunk_from = params.from.0;
    while chunk_from <= params.to.0 {
        let chunk_to = chunk_from
            .saturating_add(batch_size - 1)
            .min(params.to.0);
        let span = info_span!("chunk", from = chunk_from, to = chunk_to);
        let _guard = span.enter();

        let chunk_result = Reconciler::new(store, provider, options)
            .with_change_log(change_log.as_ref())
            .run(ContactId(chunk_from), ContactId(chunk_to), params.dry_run)?;
        result.merge(chunk_result);

        if let Some(bar) = &bar {
            bar.inc(1);
        }
        if chunk_to == u32::MAX {
            break;
        }
        chunk_from = chunk_to + 1;
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    info!(
        names = result.names.len(),
        phones = result.phones.len(),
        addresses = result.addresses.len(),
        warnings = result.warnings.len(),
        dry_run = params.dry_run,
        "normalization range complete"
    );
    Ok(result)
}
