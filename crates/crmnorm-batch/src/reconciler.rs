//! Per-record reconciliation: fetch, normalize, diff, apply or simulate,
//! log, aggregate.

use tracing::{debug, warn};

use crmnorm_model::{
    ContactId, NormalizationResult, NormalizeOptions, NormalizeWarning, Result,
};
use crmnorm_rules::{PhoneCapability, normalize_address, normalize_contact, normalize_phone};

use crate::change_log::{Category, ChangeLog};
use crate::diff::diff_fields;
use crate::store::ContactStore;

/// Drives one normalization run over a contact-id range.
///
/// Single-threaded by design: each record is fully processed before the
/// next id. The only cross-record state is the accumulating result and the
/// change-log destination.
pub struct Reconciler<'a, S, P> {
    store: &'a mut S,
    provider: &'a P,
    options: &'a NormalizeOptions,
    change_log: Option<&'a ChangeLog>,
}

impl<'a, S: ContactStore, P: PhoneCapability> Reconciler<'a, S, P> {
    pub fn new(store: &'a mut S, provider: &'a P, options: &'a NormalizeOptions) -> Self {
        Self {
            store,
            provider,
            options,
            change_log: None,
        }
    }

    #[must_use]
    pub fn with_change_log(mut self, log: Option<&'a ChangeLog>) -> Self {
        self.change_log = log;
        self
    }

    /// Process the inclusive range in ascending order.
    ///
    /// An out-of-order range yields an empty result; range validation with
    /// an error belongs to the entry point ([`crate::runner::run_range`]).
    /// Missing contacts are skipped, as are sub-records without a stored
    /// identifier (orphans).
    pub fn run(&mut self, from: ContactId, to: ContactId, dry_run: bool) -> Result<NormalizationResult> {
        let mut result = NormalizationResult::new();

        for id in from.range_to(to) {
            let Some(contact) = self.store.fetch_contact(id)? else {
                continue;
            };
            self.reconcile_names(&contact, dry_run, &mut result)?;
            self.reconcile_phones(id, dry_run, &mut result)?;
            self.reconcile_addresses(id, dry_run, &mut result)?;
        }

        Ok(result)
    }

    fn reconcile_names(
        &mut self,
        original: &crmnorm_model::ContactRecord,
        dry_run: bool,
        result: &mut NormalizationResult,
    ) -> Result<()> {
        let mut normalized = original.clone();
        normalize_contact(&mut normalized, self.options);

        let diff = diff_fields(
            &original.normalizable_fields(),
            &normalized.normalizable_fields(),
        );
        if diff.is_empty() {
            return Ok(());
        }

        if dry_run {
            result.names.insert(original.id);
        } else if let Some(confirmed) = self.store.update_contact(&normalized)? {
            result.names.insert(confirmed);
        } else {
            warn!(contact = %original.id, "contact write not confirmed, omitted from result");
        }
        self.log_change(original.id.0, Category::Name, &diff, result);
        Ok(())
    }

    fn reconcile_phones(
        &mut self,
        contact: ContactId,
        dry_run: bool,
        result: &mut NormalizationResult,
    ) -> Result<()> {
        for original in self.store.fetch_phones(contact)? {
            if original.id.0 == 0 {
                debug!(%contact, "skipping phone without a stored id");
                continue;
            }
            let mut normalized = original.clone();
            normalize_phone(&mut normalized, self.provider, self.options);

            let diff = diff_fields(
                &original.normalizable_fields(),
                &normalized.normalizable_fields(),
            );
            if diff.is_empty() {
                continue;
            }

            if dry_run {
                result.phones.insert(original.id);
            } else if let Some(confirmed) = self.store.update_phone(&normalized)? {
                result.phones.insert(confirmed);
            } else {
                warn!(phone = %original.id, "phone write not confirmed, omitted from result");
            }
            self.log_change(original.id.0, Category::Phone, &diff, result);
        }
        Ok(())
    }

    fn reconcile_addresses(
        &mut self,
        contact: ContactId,
        dry_run: bool,
        result: &mut NormalizationResult,
    ) -> Result<()> {
        for original in self.store.fetch_addresses(contact)? {
            if original.id.0 == 0 {
                debug!(%contact, "skipping address without a stored id");
                continue;
            }
            let mut normalized = original.clone();
            // Postal mismatches warn but never block the other changes.
            result
                .warnings
                .extend(normalize_address(&mut normalized, self.options));

            let diff = diff_fields(
                &original.normalizable_fields(),
                &normalized.normalizable_fields(),
            );
            if diff.is_empty() {
                continue;
            }

            if dry_run {
                result.addresses.insert(original.id);
            } else if let Some(confirmed) = self.store.update_address(&normalized)? {
                result.addresses.insert(confirmed);
            } else {
                warn!(address = %original.id, "address write not confirmed, omitted from result");
            }
            self.log_change(original.id.0, Category::Address, &diff, result);
        }
        Ok(())
    }

    /// Best-effort change logging; failures become warnings, never errors.
    fn log_change(
        &self,
        record_id: u32,
        category: Category,
        diff: &crate::diff::FieldDiff,
        result: &mut NormalizationResult,
    ) {
        let Some(log) = self.change_log else {
            return;
        };
        if let Err(error) = log.append(record_id, category, diff) {
            warn!(%error, path = %log.path().display(), "change log append failed");
            result.warnings.push(NormalizeWarning::LogWrite {
                message: error.to_string(),
            });
        }
    }
}
