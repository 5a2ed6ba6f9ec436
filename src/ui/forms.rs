use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::strings;

/// Internal representation of the login form fields.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
    /// True while a login call is in flight. Submission is disabled until the
    /// outcome arrives so the user cannot stack requests.
    pub(crate) submitting: bool,
}

/// Fields available within the login form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum LoginField {
    Username,
    Password,
}

impl Default for LoginField {
    fn default() -> Self {
        LoginField::Username
    }
}

impl LoginForm {
    /// Swap focus between the username and password fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Append a character to the active field. Control characters are
    /// rejected; everything else is free text.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Validate that both fields are filled and hand back the credentials.
    /// This is the whole of client-side validation; anything beyond presence
    /// is the backend's call.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(anyhow!(strings::LOGIN_REQUIRED));
        }
        Ok((self.username.clone(), self.password.clone()))
    }

    /// Render a single line for the form widget. The password field is
    /// masked; only its length shows.
    pub(crate) fn build_line(&self, field_name: &str, field: LoginField) -> Line<'static> {
        let (value, is_active) = match field {
            LoginField::Username => (self.username.clone(), self.active == LoginField::Username),
            LoginField::Password => (
                "•".repeat(self.password.chars().count()),
                self.active == LoginField::Password,
            ),
        };

        let display = if value.is_empty() {
            "<хоосон>".to_string()
        } else {
            value
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if display.starts_with('<') {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Username => self.username.chars().count(),
            LoginField::Password => self.password.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut form = LoginForm::default();
        assert!(form.push_char('a'));
        form.toggle_field();
        assert!(form.push_char('b'));
        assert_eq!(form.username, "a");
        assert_eq!(form.password, "b");
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut form = LoginForm::default();
        assert!(!form.push_char('\u{8}'));
        assert!(form.username.is_empty());
    }

    #[test]
    fn backspace_edits_the_focused_field_only() {
        let mut form = LoginForm::default();
        form.username = "ab".into();
        form.password = "cd".into();
        form.backspace();
        assert_eq!(form.username, "a");
        assert_eq!(form.password, "cd");
    }

    #[test]
    fn both_fields_are_required_before_submission() {
        let mut form = LoginForm::default();
        assert!(form.parse_inputs().is_err());
        form.username = "a".into();
        assert!(form.parse_inputs().is_err());
        form.password = "b".into();
        let (username, password) = form.parse_inputs().expect("filled form should parse");
        assert_eq!(username, "a");
        assert_eq!(password, "b");
    }

    #[test]
    fn password_line_is_masked() {
        let mut form = LoginForm::default();
        form.password = "secret".into();
        let line = form.build_line("Нууц үг", LoginField::Password);
        let rendered: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("••••••"));
    }
}
