//! Submission-time checks for the contact form.

use crate::render::FormFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Phone];

    pub fn error_message(self) -> &'static str {
        match self {
            FormField::Name => "Invalid Name.",
            FormField::Email => "Invalid Email.",
            FormField::Phone => "Invalid Phone Number.",
        }
    }
}

/// Outcome of one validation pass, one slot per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    name: Option<&'static str>,
    email: Option<&'static str>,
    phone: Option<&'static str>,
}

impl ValidationErrorSet {
    /// Checks every field; no check short-circuits another.
    pub fn check(fields: &FormFields) -> Self {
        let verdict = |valid: bool, field: FormField| (!valid).then(|| field.error_message());
        Self {
            name: verdict(is_valid_name(&fields.name), FormField::Name),
            email: verdict(is_valid_email(&fields.email), FormField::Email),
            phone: verdict(is_valid_phone(&fields.phone), FormField::Phone),
        }
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Phone => self.phone,
        }
    }

    pub fn is_valid(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    /// Messages of every invalid field, in form order.
    pub fn messages(&self) -> Vec<&'static str> {
        FormField::ALL
            .iter()
            .filter_map(|field| self.get(*field))
            .collect()
    }
}

/// Letters and whitespace only, at least one character.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || is_form_whitespace(c))
}

/// Something, then `@`, then something, all on one line.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_line_terminator) {
        return false;
    }
    email
        .char_indices()
        .any(|(idx, c)| c == '@' && idx > 0 && idx + 1 < email.len())
}

/// Digits and hyphens only, at least one character.
pub fn is_valid_phone(phone: &str) -> bool {
    !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit() || c == '-')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace accepted inside a name: the ECMAScript WhiteSpace and
/// LineTerminator sets. Differs from `char::is_whitespace` on U+0085 and U+FEFF.
fn is_form_whitespace(c: char) -> bool {
    is_line_terminator(c)
        || matches!(
            c,
            '\t' | '\u{0b}'
                | '\u{0c}'
                | ' '
                | '\u{a0}'
                | '\u{1680}'
                | '\u{2000}'..='\u{200a}'
                | '\u{202f}'
                | '\u{205f}'
                | '\u{3000}'
                | '\u{feff}'
        )
}
