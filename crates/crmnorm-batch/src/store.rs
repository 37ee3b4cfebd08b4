//! Storage seam.
//!
//! Contact, phone, and address persistence is an external collaborator; the
//! reconciler only needs fetch-by-id and field-level update. Updates return
//! the persisted identifier, or `None` when the store rejected the write —
//! only confirmed identifiers end up in a run's result sets.

use std::collections::BTreeMap;

use crmnorm_model::{
    AddressId, AddressRecord, ContactId, ContactRecord, PhoneId, PhoneRecord, Result,
};

pub trait ContactStore {
    fn fetch_contact(&self, id: ContactId) -> Result<Option<ContactRecord>>;
    fn fetch_phones(&self, contact: ContactId) -> Result<Vec<PhoneRecord>>;
    fn fetch_addresses(&self, contact: ContactId) -> Result<Vec<AddressRecord>>;
    fn update_contact(&mut self, record: &ContactRecord) -> Result<Option<ContactId>>;
    fn update_phone(&mut self, record: &PhoneRecord) -> Result<Option<PhoneId>>;
    fn update_address(&mut self, record: &AddressRecord) -> Result<Option<AddressId>>;
}

/// In-memory store for tests and small one-off runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: BTreeMap<ContactId, ContactRecord>,
    phones: BTreeMap<ContactId, Vec<PhoneRecord>>,
    addresses: BTreeMap<ContactId, Vec<AddressRecord>>,
    /// Number of update calls that reached the store, across all kinds.
    write_count: usize,
    /// When set, every update is rejected (returns no confirmed id).
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_contact(&mut self, contact: ContactRecord) {
        self.contacts.insert(contact.id, contact);
    }

    pub fn insert_phone(&mut self, contact: ContactId, phone: PhoneRecord) {
        self.phones.entry(contact).or_default().push(phone);
    }

    pub fn insert_address(&mut self, contact: ContactId, address: AddressRecord) {
        self.addresses.entry(contact).or_default().push(address);
    }

    pub fn contact(&self, id: ContactId) -> Option<&ContactRecord> {
        self.contacts.get(&id)
    }

    pub fn write_count(&self) -> usize {
        self.write_count
    }

    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }
}

impl ContactStore for MemoryStore {
    fn fetch_contact(&self, id: ContactId) -> Result<Option<ContactRecord>> {
        Ok(self.contacts.get(&id).cloned())
    }

    fn fetch_phones(&self, contact: ContactId) -> Result<Vec<PhoneRecord>> {
        Ok(self.phones.get(&contact).cloned().unwrap_or_default())
    }

    fn fetch_addresses(&self, contact: ContactId) -> Result<Vec<AddressRecord>> {
        Ok(self.addresses.get(&contact).cloned().unwrap_or_default())
    }

    fn update_contact(&mut self, record: &ContactRecord) -> Result<Option<ContactId>> {
        self.write_count += 1;
        if self.reject_writes || !self.contacts.contains_key(&record.id) {
            return Ok(None);
        }
        self.contacts.insert(record.id, record.clone());
        Ok(Some(record.id))
    }

    fn update_phone(&mut self, record: &PhoneRecord) -> Result<Option<PhoneId>> {
        self.write_count += 1;
        if self.reject_writes {
            return Ok(None);
        }
        for phones in self.phones.values_mut() {
            if let Some(slot) = phones.iter_mut().find(|p| p.id == record.id) {
                *slot = record.clone();
                return Ok(Some(record.id));
            }
        }
        Ok(None)
    }

    fn update_address(&mut self, record: &AddressRecord) -> Result<Option<AddressId>> {
        self.write_count += 1;
        if self.reject_writes {
            return Ok(None);
        }
        for addresses in self.addresses.values_mut() {
            if let Some(slot) = addresses.iter_mut().find(|a| a.id == record.id) {
                *slot = record.clone();
                return Ok(Some(record.id));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmnorm_model::ContactType;

    #[test]
    fn update_replaces_by_id() {
        let mut store = MemoryStore::new();
        let mut contact = ContactRecord::new(ContactId(1), ContactType::Individual);
        contact.first_name = Some("ada".to_string());
        store.insert_contact(contact.clone());

        contact.first_name = Some("Ada".to_string());
        let confirmed = store.update_contact(&contact).unwrap();
        assert_eq!(confirmed, Some(ContactId(1)));
        assert_eq!(
            store.contact(ContactId(1)).unwrap().first_name.as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn rejected_writes_confirm_nothing() {
        let mut store = MemoryStore::new();
        let contact = ContactRecord::new(ContactId(1), ContactType::Individual);
        store.insert_contact(contact.clone());
        store.reject_writes(true);
        assert_eq!(store.update_contact(&contact).unwrap(), None);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn unknown_sub_record_update_confirms_nothing() {
        let mut store = MemoryStore::new();
        let phone = PhoneRecord::new(PhoneId(99), "2025551234");
        assert_eq!(store.update_phone(&phone).unwrap(), None);
    }
}
