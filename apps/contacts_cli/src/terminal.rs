//! Line-oriented renderer for the command-line front-end.

use std::io::{self, Stdout, Write};

use client_core::{render::no_results_message, FormFields, Renderer};
use shared::domain::{Contact, Tag};
use tracing::warn;

/// Prints lists, forms and notices to `out` and errors to stderr.
///
/// Form, search and tag-selector inputs are held here and set by the command
/// driver, standing in for the input controls of an interactive page.
pub struct TerminalRenderer<W: Write> {
    out: W,
    fields: FormFields,
    search_text: String,
    selected_tag: Option<Tag>,
    error_count: usize,
    write_failures: usize,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fields: FormFields::default(),
            search_text: String::new(),
            selected_tag: None,
            error_count: 0,
            write_failures: 0,
        }
    }

    pub fn set_form_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_text.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_text.pop();
    }

    pub fn choose_tag(&mut self, tag: Tag) {
        self.selected_tag = Some(tag);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Forgets errors reported so far, e.g. those of a warm-up fetch.
    pub fn reset_error_count(&mut self) {
        self.error_count = 0;
    }

    /// Lines that could not be written to `out`.
    pub fn write_failures(&self) -> usize {
        self.write_failures
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            self.write_failures += 1;
            warn!(%err, "failed to write to terminal");
        }
    }
}

fn describe_tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_contact_list(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            let block = format!(
                "[{}] {}\n    email: {}\n    phone: {}\n    tags:  {}",
                contact.id,
                contact.full_name,
                contact.email,
                contact.phone_number,
                describe_tags(&contact.tag_list()),
            );
            self.line(&block);
        }
    }

    fn render_create_form(&mut self, contact: Option<&Contact>) {
        let (title, submit) = match contact {
            Some(contact) => (format!("Edit Contact #{}", contact.id), "Save Changes"),
            None => ("Create Contact".to_string(), "Submit"),
        };
        self.fields = contact.map(FormFields::from_contact).unwrap_or_default();
        let form = format!(
            "== {title} ==\n    name:  {}\n    email: {}\n    phone: {}\n    tag options: {}\n    [{submit}]",
            self.fields.name,
            self.fields.email,
            self.fields.phone,
            describe_tags(&Tag::vocabulary()),
        );
        self.line(&form);
    }

    fn render_tag_list(&mut self, tags: &[Tag]) {
        let text = format!("    selected tags: {}", describe_tags(tags));
        self.line(&text);
    }

    fn render_no_results(&mut self, search_text: &str) {
        self.line(&no_results_message(search_text));
    }

    fn clear_display(&mut self) {
        self.fields = FormFields::default();
        self.selected_tag = None;
    }

    fn close_form(&mut self) {
        self.fields = FormFields::default();
        self.selected_tag = None;
    }

    fn reset_search_text(&mut self) {
        self.search_text.clear();
    }

    fn read_form_fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn read_search_text(&self) -> String {
        self.search_text.clone()
    }

    fn read_selected_tag(&self) -> Option<Tag> {
        self.selected_tag.clone()
    }

    fn notify_user(&mut self, message: &str) {
        self.line(message);
    }

    fn log_error(&mut self, message: &str) {
        self.error_count += 1;
        eprintln!("error: {message}");
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
