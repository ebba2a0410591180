//! Presentation seam consumed by the interaction controller.

use shared::domain::{Contact, Tag};

/// Text inputs of the contact form, as currently entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl FormFields {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.full_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone_number.clone(),
        }
    }
}

/// Display surface plus read access to the form and search inputs.
///
/// Rendering a form with `Some(contact)` means the form edits that contact:
/// its inputs are pre-populated and the submit control reads "Save Changes".
pub trait Renderer {
    fn render_contact_list(&mut self, contacts: &[Contact]);
    fn render_create_form(&mut self, contact: Option<&Contact>);
    fn render_tag_list(&mut self, tags: &[Tag]);
    fn render_no_results(&mut self, search_text: &str);
    /// Removes the result list, the no-results notice and the form.
    fn clear_display(&mut self);
    /// Removes only the form.
    fn close_form(&mut self);
    fn reset_search_text(&mut self);
    fn read_form_fields(&self) -> FormFields;
    fn read_search_text(&self) -> String;
    /// Value of the tag selector control, if it holds a valid tag.
    fn read_selected_tag(&self) -> Option<Tag>;
    fn notify_user(&mut self, message: &str);
    fn log_error(&mut self, message: &str);
}

/// Notice shown in place of the result list when a search matches nothing.
pub fn no_results_message(search_text: &str) -> String {
    format!("No results found for \"{search_text}\"")
}
