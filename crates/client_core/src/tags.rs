use shared::domain::Tag;

use crate::error::TagSelectionConflict;

/// Tags chosen while the contact form is open, in selection order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDraft {
    tags: Vec<Tag>,
}

impl TagDraft {
    /// Starts a draft from existing tags, keeping the first occurrence of each.
    pub fn seeded(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut draft = Self::default();
        for tag in tags {
            let _ = draft.add(tag);
        }
        draft
    }

    pub fn add(&mut self, tag: Tag) -> Result<(), TagSelectionConflict> {
        if self.contains(&tag) {
            return Err(TagSelectionConflict(tag));
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Returns false when the tag was not in the draft.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    fn contains(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(label: &str) -> Tag {
        Tag::parse(label).expect("valid tag")
    }

    #[test]
    fn adding_same_tag_twice_is_rejected() {
        let mut draft = TagDraft::default();
        draft.add(tag("work")).expect("first add");
        let err = draft.add(tag("work")).expect_err("duplicate");
        assert_eq!(err, TagSelectionConflict(tag("work")));
        assert_eq!(draft.tags(), &[tag("work")]);
    }

    #[test]
    fn removing_absent_tag_keeps_the_rest() {
        let mut draft = TagDraft::seeded([tag("work"), tag("family")]);
        assert!(!draft.remove(&tag("friend")));
        assert_eq!(draft.tags(), &[tag("work"), tag("family")]);

        assert!(draft.remove(&tag("work")));
        assert_eq!(draft.tags(), &[tag("family")]);
    }

    #[test]
    fn seeding_drops_duplicates_and_keeps_order() {
        let draft = TagDraft::seeded([tag("friend"), tag("work"), tag("friend")]);
        assert_eq!(draft.tags(), &[tag("friend"), tag("work")]);
    }
}
