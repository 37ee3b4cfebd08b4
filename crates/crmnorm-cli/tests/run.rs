//! CSV store round trip through the batch runner.

use std::fs;
use std::path::Path;

use crmnorm_batch::{RunnerParams, run_range};
use crmnorm_cli::csv_store::CsvStore;
use crmnorm_model::{CaseMode, ContactId, NormalizeOptions, PhoneId};
use crmnorm_rules::RegionPhoneProvider;

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("contacts.csv"),
        "id,contact_type,first_name,middle_name,last_name,organization_name,household_name,legal_name,nick_name\n\
         1,Individual,jean-pierre,,DE castignac,,,,\n\
         2,Organization,,,,\"it bliss, llc\",,,\n",
    )
    .unwrap();
    fs::write(
        dir.join("phones.csv"),
        "id,contact_id,phone,phone_type_id\n\
         11,1,2025551234,\n\
         ,1,3015550000,\n",
    )
    .unwrap();
    fs::write(
        dir.join("addresses.csv"),
        "id,contact_id,city,postal_code,street_address,supplemental_address_1,supplemental_address_2,country_id\n\
         21,1,WASHINGTON,20500,123 main st ne,,,840\n",
    )
    .unwrap();
}

fn options() -> NormalizeOptions {
    NormalizeOptions::new()
        .with_full_first(true)
        .with_phone_normalize(true)
        .with_city_caps(CaseMode::Titlecase)
        .with_street_caps(CaseMode::Titlecase)
        .with_postal_validation(true)
}

#[test]
fn csv_round_trip_applies_changes() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let mut store = CsvStore::load(dir.path()).unwrap();
    assert_eq!(store.contact_count(), 2);
    assert_eq!(store.max_contact_id(), Some(ContactId(2)));

    let provider = RegionPhoneProvider::new();
    let params = RunnerParams::new(ContactId(1), ContactId(2));
    let result = run_range(&mut store, &provider, &options(), &params).unwrap();

    assert_eq!(result.names.len(), 2);
    assert_eq!(result.phones.iter().copied().collect::<Vec<_>>(), [PhoneId(11)]);
    assert_eq!(result.addresses.len(), 1);
    assert!(result.warnings.is_empty());

    store.save().unwrap();

    let contacts = fs::read_to_string(dir.path().join("contacts.csv")).unwrap();
    assert!(contacts.contains("Jean-Pierre"));
    assert!(contacts.contains("de Castignac"));
    assert!(contacts.contains("\"It Bliss, LLC\""));

    let phones = fs::read_to_string(dir.path().join("phones.csv")).unwrap();
    assert!(phones.contains("(202) 555-1234"));
    // Orphan row (no id): loaded, skipped, written back untouched.
    assert!(phones.contains(",1,3015550000,"));

    let addresses = fs::read_to_string(dir.path().join("addresses.csv")).unwrap();
    assert!(addresses.contains("Washington"));
    assert!(addresses.contains("123 Main St NE"));
    assert!(addresses.contains("20500"));
}

#[test]
fn dry_run_leaves_files_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let before = fs::read_to_string(dir.path().join("contacts.csv")).unwrap();

    let mut store = CsvStore::load(dir.path()).unwrap();
    let provider = RegionPhoneProvider::new();
    let params = RunnerParams::new(ContactId(1), ContactId(2)).with_dry_run(true);
    let result = run_range(&mut store, &provider, &options(), &params).unwrap();

    assert_eq!(result.names.len(), 2);
    // No save in a dry run; the file on disk is bitwise identical.
    let after = fs::read_to_string(dir.path().join("contacts.csv")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn change_log_lines_reference_record_ids() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let log_path = dir.path().join("changes.csv");

    let mut store = CsvStore::load(dir.path()).unwrap();
    let provider = RegionPhoneProvider::new();
    let params = RunnerParams::new(ContactId(1), ContactId(2))
        .with_log_file(Some(log_path.clone()));
    run_range(&mut store, &provider, &options(), &params).unwrap();

    let log = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 4, "{log}");
    assert!(lines[0].starts_with("1,name,"));
    assert!(lines.iter().any(|l| l.starts_with("11,phone,")));
    assert!(lines.iter().any(|l| l.starts_with("21,address,")));
    assert!(lines.iter().any(|l| l.starts_with("2,name,")));
}
