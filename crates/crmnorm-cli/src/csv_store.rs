//! CSV-file-backed contact store.
//!
//! A data directory holds `contacts.csv`, `phones.csv`, and
//! `addresses.csv`. Everything is loaded up front, the batch runs against
//! memory, and [`CsvStore::save`] writes the files back. Sub-record rows
//! without an `id` load as orphans (id 0) and are never normalized.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crmnorm_batch::ContactStore;
use crmnorm_model::{
    AddressId, AddressRecord, ContactId, ContactRecord, ContactType, CountryId, PhoneId,
    PhoneRecord, PhoneType,
};

const CONTACTS_FILE: &str = "contacts.csv";
const PHONES_FILE: &str = "phones.csv";
const ADDRESSES_FILE: &str = "addresses.csv";

#[derive(Debug, Deserialize, Serialize)]
struct ContactRow {
    id: u32,
    contact_type: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    middle_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    organization_name: Option<String>,
    #[serde(default)]
    household_name: Option<String>,
    #[serde(default)]
    legal_name: Option<String>,
    #[serde(default)]
    nick_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct PhoneRow {
    #[serde(default)]
    id: Option<u32>,
    contact_id: u32,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    phone_type_id: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct AddressRow {
    #[serde(default)]
    id: Option<u32>,
    contact_id: u32,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    street_address: Option<String>,
    #[serde(default)]
    supplemental_address_1: Option<String>,
    #[serde(default)]
    supplemental_address_2: Option<String>,
    #[serde(default)]
    country_id: Option<u32>,
}

/// All three record families, loaded from one data directory.
#[derive(Debug)]
pub struct CsvStore {
    dir: PathBuf,
    contacts: BTreeMap<ContactId, ContactRecord>,
    phones: BTreeMap<ContactId, Vec<PhoneRecord>>,
    addresses: BTreeMap<ContactId, Vec<AddressRecord>>,
}

impl CsvStore {
    /// Load the data directory. `phones.csv` and `addresses.csv` are
    /// optional; `contacts.csv` is not.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut store = Self {
            dir: dir.to_path_buf(),
            contacts: BTreeMap::new(),
            phones: BTreeMap::new(),
            addresses: BTreeMap::new(),
        };

        let contacts_path = dir.join(CONTACTS_FILE);
        let mut reader = csv::Reader::from_path(&contacts_path)
            .with_context(|| format!("open {}", contacts_path.display()))?;
        for row in reader.deserialize() {
            let row: ContactRow =
                row.with_context(|| format!("parse {}", contacts_path.display()))?;
            let contact_type: ContactType = row
                .contact_type
                .parse()
                .with_context(|| format!("contact {}", row.id))?;
            let mut contact = ContactRecord::new(ContactId(row.id), contact_type);
            contact.first_name = row.first_name;
            contact.middle_name = row.middle_name;
            contact.last_name = row.last_name;
            contact.organization_name = row.organization_name;
            contact.household_name = row.household_name;
            contact.legal_name = row.legal_name;
            contact.nick_name = row.nick_name;
            store.contacts.insert(contact.id, contact);
        }

        let phones_path = dir.join(PHONES_FILE);
        if phones_path.exists() {
            let mut reader = csv::Reader::from_path(&phones_path)
                .with_context(|| format!("open {}", phones_path.display()))?;
            for row in reader.deserialize() {
                let row: PhoneRow =
                    row.with_context(|| format!("parse {}", phones_path.display()))?;
                let phone_type = match row.phone_type_id {
                    Some(raw) => Some(PhoneType::from_id(raw).with_context(|| {
                        format!("phone {} of contact {}", row.id.unwrap_or(0), row.contact_id)
                    })?),
                    None => None,
                };
                store
                    .phones
                    .entry(ContactId(row.contact_id))
                    .or_default()
                    .push(PhoneRecord {
                        id: PhoneId(row.id.unwrap_or(0)),
                        phone: row.phone,
                        phone_type,
                    });
            }
        }

        let addresses_path = dir.join(ADDRESSES_FILE);
        if addresses_path.exists() {
            let mut reader = csv::Reader::from_path(&addresses_path)
                .with_context(|| format!("open {}", addresses_path.display()))?;
            for row in reader.deserialize() {
                let row: AddressRow =
                    row.with_context(|| format!("parse {}", addresses_path.display()))?;
                store
                    .addresses
                    .entry(ContactId(row.contact_id))
                    .or_default()
                    .push(AddressRecord {
                        id: AddressId(row.id.unwrap_or(0)),
                        city: row.city,
                        postal_code: row.postal_code,
                        street_address: row.street_address,
                        supplemental_address_1: row.supplemental_address_1,
                        supplemental_address_2: row.supplemental_address_2,
                        country_id: row.country_id.map(CountryId),
                    });
            }
        }

        Ok(store)
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Highest contact id present, for defaulting a whole-store run.
    pub fn max_contact_id(&self) -> Option<ContactId> {
        self.contacts.keys().next_back().copied()
    }

    /// Write all three files back to the data directory.
    pub fn save(&self) -> Result<()> {
        let contacts_path = self.dir.join(CONTACTS_FILE);
        let mut writer = csv::Writer::from_path(&contacts_path)
            .with_context(|| format!("write {}", contacts_path.display()))?;
        for contact in self.contacts.values() {
            writer.serialize(ContactRow {
                id: contact.id.0,
                contact_type: contact.contact_type.to_string(),
                first_name: contact.first_name.clone(),
                middle_name: contact.middle_name.clone(),
                last_name: contact.last_name.clone(),
                organization_name: contact.organization_name.clone(),
                household_name: contact.household_name.clone(),
                legal_name: contact.legal_name.clone(),
                nick_name: contact.nick_name.clone(),
            })?;
        }
        writer.flush()?;

        let phones_path = self.dir.join(PHONES_FILE);
        let mut writer = csv::Writer::from_path(&phones_path)
            .with_context(|| format!("write {}", phones_path.display()))?;
        for (contact_id, phones) in &self.phones {
            for phone in phones {
                writer.serialize(PhoneRow {
                    id: Some(phone.id.0).filter(|raw| *raw != 0),
                    contact_id: contact_id.0,
                    phone: phone.phone.clone(),
                    phone_type_id: phone.phone_type.map(|t| i64::from(t.as_id())),
                })?;
            }
        }
        writer.flush()?;

        let addresses_path = self.dir.join(ADDRESSES_FILE);
        let mut writer = csv::Writer::from_path(&addresses_path)
            .with_context(|| format!("write {}", addresses_path.display()))?;
        for (contact_id, addresses) in &self.addresses {
            for address in addresses {
                writer.serialize(AddressRow {
                    id: Some(address.id.0).filter(|raw| *raw != 0),
                    contact_id: contact_id.0,
                    city: address.city.clone(),
                    postal_code: address.postal_code.clone(),
                    street_address: address.street_address.clone(),
                    supplemental_address_1: address.supplemental_address_1.clone(),
                    supplemental_address_2: address.supplemental_address_2.clone(),
                    country_id: address.country_id.map(|c| c.0),
                })?;
            }
        }
        writer.flush()?;

        Ok(())
    }
}

impl ContactStore for CsvStore {
    fn fetch_contact(&self, id: ContactId) -> crmnorm_model::Result<Option<ContactRecord>> {
        Ok(self.contacts.get(&id).cloned())
    }

    fn fetch_phones(&self, contact: ContactId) -> crmnorm_model::Result<Vec<PhoneRecord>> {
        Ok(self.phones.get(&contact).cloned().unwrap_or_default())
    }

    fn fetch_addresses(&self, contact: ContactId) -> crmnorm_model::Result<Vec<AddressRecord>> {
        Ok(self.addresses.get(&contact).cloned().unwrap_or_default())
    }

    fn update_contact(&mut self, record: &ContactRecord) -> crmnorm_model::Result<Option<ContactId>> {
        // An unknown id is a rejected write: no confirmed identifier.
        if !self.contacts.contains_key(&record.id) {
            return Ok(None);
        }
        self.contacts.insert(record.id, record.clone());
        Ok(Some(record.id))
    }

    fn update_phone(&mut self, record: &PhoneRecord) -> crmnorm_model::Result<Option<PhoneId>> {
        for phones in self.phones.values_mut() {
            if let Some(slot) = phones.iter_mut().find(|p| p.id == record.id) {
                *slot = record.clone();
                return Ok(Some(record.id));
            }
        }
        Ok(None)
    }

    fn update_address(&mut self, record: &AddressRecord) -> crmnorm_model::Result<Option<AddressId>> {
        for addresses in self.addresses.values_mut() {
            if let Some(slot) = addresses.iter_mut().find(|a| a.id == record.id) {
                *slot = record.clone();
                return Ok(Some(record.id));
            }
        }
        Ok(None)
    }
}
