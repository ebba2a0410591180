use shared::domain::{Contact, ContactId};

/// Client-held copy of the remote contact list, in the order the remote store returned it.
#[derive(Debug, Default, Clone)]
pub struct ContactCache {
    contacts: Vec<Contact>,
}

impl ContactCache {
    pub fn snapshot(&self) -> Vec<Contact> {
        self.contacts.clone()
    }

    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    pub fn append(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Swaps in `contact` for the entry with the same id. Returns false when no entry matched.
    pub fn replace(&mut self, contact: Contact) -> bool {
        match self.contacts.iter_mut().find(|entry| entry.id == contact.id) {
            Some(entry) => {
                *entry = contact;
                true
            }
            None => false,
        }
    }

    /// Returns true when an entry was removed.
    pub fn remove(&mut self, id: ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|entry| entry.id != id);
        self.contacts.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i64, name: &str) -> Contact {
        Contact {
            id: ContactId(id),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone_number: "555-0000".into(),
            tags: String::new(),
        }
    }

    #[test]
    fn replace_all_discards_previous_entries() {
        let mut cache = ContactCache::default();
        cache.append(contact(1, "Old"));
        cache.replace_all(vec![contact(2, "New"), contact(3, "Newer")]);
        assert_eq!(cache.snapshot(), vec![contact(2, "New"), contact(3, "Newer")]);
    }

    #[test]
    fn replace_only_touches_matching_id() {
        let mut cache = ContactCache::default();
        cache.replace_all(vec![contact(1, "Ann"), contact(2, "Bob")]);
        assert!(cache.replace(contact(2, "Robert")));
        assert_eq!(cache.snapshot(), vec![contact(1, "Ann"), contact(2, "Robert")]);
        assert!(!cache.replace(contact(9, "Ghost")));
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[test]
    fn remove_drops_exactly_one_entry() {
        let mut cache = ContactCache::default();
        cache.replace_all(vec![contact(1, "Ann"), contact(2, "Bob"), contact(3, "Cy")]);
        assert!(cache.remove(ContactId(2)));
        assert_eq!(cache.snapshot(), vec![contact(1, "Ann"), contact(3, "Cy")]);
        assert!(!cache.remove(ContactId(2)));
    }
}
