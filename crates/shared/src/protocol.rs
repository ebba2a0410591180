use serde::{Deserialize, Serialize};

use crate::domain::{join_tags, ContactDraft, ContactId};

pub const CONTACTS_PATH: &str = "api/contacts";

/// Path of the collection used for creation; the remote store expects the trailing slash.
pub fn contacts_collection_path() -> String {
    format!("{CONTACTS_PATH}/")
}

/// The contact's own path, used for fetch, update and delete.
pub fn contact_path(id: ContactId) -> String {
    format!("{CONTACTS_PATH}/{}", id.0)
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub tags: String,
}

impl From<&ContactDraft> for ContactPayload {
    fn from(draft: &ContactDraft) -> Self {
        Self {
            full_name: draft.name.clone(),
            email: draft.email.clone(),
            phone_number: draft.phone.clone(),
            tags: join_tags(&draft.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;

    #[test]
    fn payload_uses_wire_field_names_and_joined_tags() {
        let draft = ContactDraft {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            phone: "555-1234".into(),
            tags: vec![Tag::parse("work").unwrap(), Tag::parse("family").unwrap()],
        };
        let value = serde_json::to_value(ContactPayload::from(&draft)).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({
                "full_name": "John Doe",
                "email": "john@example.com",
                "phone_number": "555-1234",
                "tags": "work,family",
            })
        );
    }

    #[test]
    fn paths_match_remote_routes() {
        assert_eq!(contacts_collection_path(), "api/contacts/");
        assert_eq!(contact_path(ContactId(9)), "api/contacts/9");
    }
}
