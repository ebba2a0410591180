use shared::domain::Contact;

/// A keystroke the incremental search accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Letter(char),
    Backspace,
}

impl SearchKey {
    /// Parses a key name as reported by the input layer (`"a"`, `"Backspace"`, `"Shift"`, ...).
    pub fn parse(key: &str) -> Option<Self> {
        if key == "Backspace" {
            return Some(SearchKey::Backspace);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(SearchKey::Letter(c)),
            _ => None,
        }
    }
}

/// Whether the input layer should let the keystroke through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Accepted,
    Rejected,
}

/// Contacts whose name starts with `search_text`, ignoring case, in cache order.
pub fn filter_by_name_prefix(contacts: &[Contact], search_text: &str) -> Vec<Contact> {
    let prefix = search_text.to_lowercase();
    contacts
        .iter()
        .filter(|contact| contact.name_starts_with(&prefix))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::ContactId;

    fn named(id: i64, name: &str) -> Contact {
        Contact {
            id: ContactId(id),
            full_name: name.into(),
            email: "x@y".into(),
            phone_number: "1".into(),
            tags: String::new(),
        }
    }

    #[test]
    fn accepts_single_letters_and_backspace_only() {
        assert_eq!(SearchKey::parse("a"), Some(SearchKey::Letter('a')));
        assert_eq!(SearchKey::parse("Z"), Some(SearchKey::Letter('Z')));
        assert_eq!(SearchKey::parse("Backspace"), Some(SearchKey::Backspace));
        for rejected in ["1", " ", "ab", "Shift", "Enter", "", "é", "-"] {
            assert_eq!(SearchKey::parse(rejected), None, "{rejected:?}");
        }
    }

    #[test]
    fn prefix_filter_is_case_insensitive() {
        let contacts = vec![named(1, "Alice"), named(2, "alfred"), named(3, "Bob")];
        let hits = filter_by_name_prefix(&contacts, "al");
        assert_eq!(hits, vec![named(1, "Alice"), named(2, "alfred")]);
        assert_eq!(filter_by_name_prefix(&contacts, "AL").len(), 2);
        assert!(filter_by_name_prefix(&contacts, "c").is_empty());
    }

    #[test]
    fn prefix_must_start_the_name() {
        let contacts = vec![named(1, "Mary Alice")];
        assert!(filter_by_name_prefix(&contacts, "al").is_empty());
        assert_eq!(filter_by_name_prefix(&contacts, "mary a").len(), 1);
    }
}
