//! Subcommand implementations.

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use crmnorm_batch::{ChangeLog, RunnerParams, run_range};
use crmnorm_model::{
    CaseMode, ContactId, JsonSettings, NORMALIZE_PREFERENCES, NormalizationResult,
    NormalizeOptions, SettingsStore,
};
use crmnorm_rules::RegionPhoneProvider;

use crate::cli::{RunArgs, SettingsArgs};
use crmnorm_cli::csv_store::CsvStore;
use crmnorm_cli::summary::apply_table_style;

pub fn run_batch(args: &RunArgs) -> Result<NormalizationResult> {
    let options = build_options(args)?;
    let span = info_span!("run", from = args.from, to = args.to, dry_run = args.dry_run);
    let _guard = span.enter();

    let mut store = CsvStore::load(&args.data_dir)
        .with_context(|| format!("load data directory {}", args.data_dir.display()))?;
    info!(contacts = store.contact_count(), "data directory loaded");

    let provider = RegionPhoneProvider::new();
    let params = RunnerParams::new(ContactId(args.from), ContactId(args.to))
        .with_batch_size(args.batch_size)
        .with_dry_run(args.dry_run)
        .with_log_file(args.change_log.clone())
        .with_progress(true);

    let result = run_range(&mut store, &provider, &options, &params)
        .context("normalization run failed")?;

    if !args.dry_run {
        store.save().context("write data files back")?;
    }
    Ok(result)
}

/// Options come from the settings file when given, then CLI flags override.
fn build_options(args: &RunArgs) -> Result<NormalizeOptions> {
    let mut options = match &args.settings {
        Some(path) => {
            let settings = JsonSettings::load(path)
                .with_context(|| format!("load settings {}", path.display()))?;
            NormalizeOptions::from_settings(&settings)
        }
        None => NormalizeOptions::default(),
    };

    if args.full_first {
        options.full_first = true;
    }
    if args.org_caps {
        options.org_caps = true;
    }
    if let Some(mode) = args.city_caps {
        options.city_caps = CaseMode::from_setting(i64::from(mode));
    }
    if let Some(mode) = args.street_caps {
        options.street_caps = CaseMode::from_setting(i64::from(mode));
    }
    if args.validate_postal {
        options.validate_postal = true;
    }
    if args.intl_prefix {
        options.intl_prefix = true;
    }
    if args.phone_normalize {
        options.phone_normalize = true;
    }
    if let Some(region) = &args.region {
        options.default_region = region.to_uppercase();
    }
    Ok(options)
}

pub fn run_settings(args: &SettingsArgs) -> Result<()> {
    if let Some(log_path) = &args.delete_log {
        ChangeLog::delete(log_path)
            .with_context(|| format!("delete change log {}", log_path.display()))?;
        println!("deleted {}", log_path.display());
        return Ok(());
    }

    let mut settings = JsonSettings::load(&args.path)
        .with_context(|| format!("load settings {}", args.path.display()))?;

    if args.set.is_empty() {
        let mut table = Table::new();
        apply_table_style(&mut table);
        table.set_header(vec!["Option", "Value"]);
        if let Some(namespace) = settings.namespace(NORMALIZE_PREFERENCES) {
            for (key, value) in namespace {
                table.add_row(vec![key.clone(), value.to_string()]);
            }
        }
        println!("{table}");
        return Ok(());
    }

    for assignment in &args.set {
        let Some((key, raw)) = assignment.split_once('=') else {
            bail!("expected KEY=VALUE, got {assignment:?}");
        };
        // Values are JSON when they parse as such (true, 2), strings
        // otherwise (US).
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        settings.set(NORMALIZE_PREFERENCES, key, value);
    }
    settings
        .save(&args.path)
        .with_context(|| format!("write settings {}", args.path.display()))?;
    println!("updated {}", args.path.display());
    Ok(())
}
