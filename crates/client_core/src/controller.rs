//! Turns discrete UI actions and search keystrokes into store calls and renders.

use std::sync::Arc;

use shared::domain::{ContactDraft, ContactId, Tag};
use tracing::{debug, error, info, warn};

use crate::{
    error::{RemoteError, TagSelectionConflict, ValidationError},
    render::{FormFields, Renderer},
    search::{filter_by_name_prefix, KeyDisposition, SearchKey},
    store::ContactService,
    tags::TagDraft,
    validation::ValidationErrorSet,
};

pub const CREATED_NOTICE: &str = "Successfully created new contact!";
pub const UPDATED_NOTICE: &str = "Successfully updated contact!";
pub const DELETED_NOTICE: &str = "Contact deleted successfully.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenCreateForm,
    ShowAll,
    SubmitForm,
    ClearSearch,
    EditContact(ContactId),
    DeleteContact(ContactId),
    SelectTag,
    RemoveTag(Tag),
}

impl UiAction {
    /// Decodes the action declared on a clicked control.
    ///
    /// `contact_id` and `tag` carry the control's data attributes; actions that
    /// need one and do not get a parseable value decode to `None`.
    pub fn from_control(
        action: &str,
        contact_id: Option<&str>,
        tag: Option<&str>,
    ) -> Option<Self> {
        let action = match action {
            "createcontactform" => UiAction::OpenCreateForm,
            "showallcontacts" => UiAction::ShowAll,
            "submitform" => UiAction::SubmitForm,
            "clearsearch" => UiAction::ClearSearch,
            "editcontact" => UiAction::EditContact(contact_id?.parse().ok()?),
            "deletecontact" => UiAction::DeleteContact(contact_id?.parse().ok()?),
            "addtag" => UiAction::SelectTag,
            "removetag" => UiAction::RemoveTag(Tag::parse(tag?)?),
            _ => return None,
        };
        Some(action)
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiAction::OpenCreateForm => "open_create_form",
            UiAction::ShowAll => "show_all",
            UiAction::SubmitForm => "submit_form",
            UiAction::ClearSearch => "clear_search",
            UiAction::EditContact(_) => "edit_contact",
            UiAction::DeleteContact(_) => "delete_contact",
            UiAction::SelectTag => "select_tag",
            UiAction::RemoveTag(_) => "remove_tag",
        }
    }
}

/// What a submit of the open form will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormBinding {
    Create,
    Edit(ContactId),
}

/// Owns the transient UI state (open form, tag draft, last validation verdicts)
/// and dispatches one action or keystroke at a time.
///
/// Handlers take `&mut self`, so a handler waiting on the store holds off the
/// next action until it returns. Front-ends that must keep taking input during a
/// remote call share the `ContactService` between several controllers or tasks
/// instead; the store itself applies each response when it arrives.
pub struct InteractionController<R: Renderer> {
    store: Arc<dyn ContactService>,
    renderer: R,
    form: Option<FormBinding>,
    tag_draft: TagDraft,
    form_errors: ValidationErrorSet,
}

impl<R: Renderer> InteractionController<R> {
    pub fn new(store: Arc<dyn ContactService>, renderer: R) -> Self {
        Self {
            store,
            renderer,
            form: None,
            tag_draft: TagDraft::default(),
            form_errors: ValidationErrorSet::default(),
        }
    }

    /// Clears the display and primes the cache. A failed fetch leaves the cache
    /// empty; the next search keystroke fetches again.
    pub async fn start(&mut self) {
        self.clear_area();
        match self.store.fetch_all().await {
            Ok(contacts) => info!(count = contacts.len(), "contact cache primed"),
            Err(err) => {
                warn!(%err, "initial contact fetch failed");
                self.renderer.log_error(&err.to_string());
            }
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn form_binding(&self) -> Option<FormBinding> {
        self.form
    }

    pub fn tag_draft(&self) -> &TagDraft {
        &self.tag_draft
    }

    pub fn form_errors(&self) -> &ValidationErrorSet {
        &self.form_errors
    }

    pub async fn handle_action(&mut self, action: UiAction) {
        debug!(action = action.name(), "dispatching ui action");
        match action {
            UiAction::OpenCreateForm => self.open_create_form(),
            UiAction::ShowAll => self.show_all().await,
            UiAction::SubmitForm => self.submit_form().await,
            UiAction::ClearSearch => self.clear_search(),
            UiAction::EditContact(id) => self.edit_contact(id).await,
            UiAction::DeleteContact(id) => self.delete_contact(id).await,
            UiAction::SelectTag => {
                if let Err(conflict) = self.select_tag() {
                    debug!(%conflict, "tag selection ignored");
                }
            }
            UiAction::RemoveTag(tag) => self.remove_tag(&tag),
        }
    }

    /// Runs the incremental search for one keystroke in the search field.
    ///
    /// Only single letters and backspace are accepted; anything else is
    /// rejected without touching any state, and the caller should drop the input.
    pub async fn handle_keystroke(&mut self, key: &str) -> KeyDisposition {
        let Some(key) = SearchKey::parse(key) else {
            debug!(key, "search keystroke rejected");
            return KeyDisposition::Rejected;
        };
        debug!(?key, "search keystroke accepted");

        self.renderer.close_form();
        self.forget_form();

        let search_text = self.renderer.read_search_text().to_lowercase();
        if search_text.is_empty() {
            self.renderer.clear_display();
        } else {
            self.search_name(&search_text).await;
        }
        KeyDisposition::Accepted
    }

    async fn search_name(&mut self, search_text: &str) {
        let mut contacts = self.store.current_cache();
        if contacts.is_empty() {
            contacts = match self.store.fetch_all().await {
                Ok(contacts) => contacts,
                Err(err) => {
                    self.report(&err);
                    return;
                }
            };
        }

        let matches = filter_by_name_prefix(&contacts, search_text);
        debug!(search_text, hits = matches.len(), "search finished");
        self.renderer.clear_display();
        if matches.is_empty() {
            self.renderer.render_no_results(search_text);
        } else {
            self.renderer.render_contact_list(&matches);
        }
    }

    fn open_create_form(&mut self) {
        self.clear_area();
        self.form = Some(FormBinding::Create);
        self.renderer.render_create_form(None);
        self.renderer.render_tag_list(self.tag_draft.tags());
    }

    async fn show_all(&mut self) {
        self.clear_area();
        match self.store.fetch_all().await {
            Ok(contacts) => self.renderer.render_contact_list(&contacts),
            Err(err) => self.report(&err),
        }
    }

    async fn submit_form(&mut self) {
        let Some(binding) = self.form else {
            warn!("submit requested with no open contact form");
            return;
        };

        let fields = self.renderer.read_form_fields();
        if let Err(err) = self.validate(&fields) {
            warn!(%err, "contact form rejected");
            for message in err.0.messages() {
                self.renderer.log_error(message);
            }
            return;
        }

        let draft = ContactDraft {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            tags: self.tag_draft.tags().to_vec(),
        };
        let (result, notice) = match binding {
            FormBinding::Create => (self.store.create(&draft).await, CREATED_NOTICE),
            FormBinding::Edit(id) => (self.store.update(id, &draft).await, UPDATED_NOTICE),
        };

        match result {
            Ok(contact) => {
                self.clear_area();
                self.renderer
                    .render_contact_list(std::slice::from_ref(&contact));
                self.renderer.notify_user(notice);
            }
            Err(err) => self.report(&err),
        }
    }

    /// Recomputes every field's verdict from scratch.
    fn validate(&mut self, fields: &FormFields) -> Result<(), ValidationError> {
        self.form_errors = ValidationErrorSet::check(fields);
        if self.form_errors.is_valid() {
            Ok(())
        } else {
            Err(ValidationError(self.form_errors.clone()))
        }
    }

    fn clear_search(&mut self) {
        self.clear_area();
        self.renderer.reset_search_text();
    }

    async fn edit_contact(&mut self, id: ContactId) {
        self.clear_area();
        match self.store.fetch_one(id).await {
            Ok(contact) => {
                self.form = Some(FormBinding::Edit(id));
                self.tag_draft = TagDraft::seeded(contact.tag_list());
                self.renderer.render_create_form(Some(&contact));
                self.renderer.render_tag_list(self.tag_draft.tags());
            }
            Err(err) => self.report(&err),
        }
    }

    async fn delete_contact(&mut self, id: ContactId) {
        match self.store.delete(id).await {
            Ok(()) => {
                self.clear_area();
                self.renderer.notify_user(DELETED_NOTICE);
            }
            Err(err) => self.report(&err),
        }
    }

    fn select_tag(&mut self) -> Result<(), TagSelectionConflict> {
        if self.form.is_none() {
            debug!("tag selected with no open contact form");
            return Ok(());
        }
        let Some(tag) = self.renderer.read_selected_tag() else {
            debug!("tag selector holds no valid tag");
            return Ok(());
        };
        self.tag_draft.add(tag)?;
        self.renderer.render_tag_list(self.tag_draft.tags());
        Ok(())
    }

    fn remove_tag(&mut self, tag: &Tag) {
        if !self.tag_draft.remove(tag) {
            debug!(%tag, "removed tag was not selected");
        }
        self.renderer.render_tag_list(self.tag_draft.tags());
    }

    fn clear_area(&mut self) {
        self.renderer.clear_display();
        self.forget_form();
    }

    fn forget_form(&mut self) {
        self.form = None;
        self.tag_draft.clear();
    }

    fn report(&mut self, err: &RemoteError) {
        error!(%err, "contact operation failed");
        self.renderer.log_error(&err.to_string());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
