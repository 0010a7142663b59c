#[cfg(test)]
#[path = "auth_forms_test.rs"]
mod tests;

use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use tui_textarea::Input;
use tui_textarea::TextArea as TuiTextArea;

use crate::domain::models::Action;
use crate::domain::models::AuthKind;
use crate::domain::models::Loading;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;
use crate::domain::models::TextArea;
use crate::domain::models::PASSWORD_MASK;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

struct FormField {
    title: &'static str,
    input: TuiTextArea<'static>,
    secret: bool,
}

impl FormField {
    fn new(title: &'static str, secret: bool) -> FormField {
        let mut input = TextArea::with_title(title);
        if secret {
            input = TextArea::password(title);
        }

        return FormField {
            title,
            input,
            secret,
        };
    }

    fn value(&self) -> String {
        return TextArea::content(&self.input);
    }
}

/// Login and register screens. Every field is required and nothing else is
/// validated client side.
pub struct AuthForm {
    kind: AuthKind,
    fields: Vec<FormField>,
    focus: usize,
    error: Option<String>,
    loading: bool,
    show_password: bool,
}

impl AuthForm {
    pub fn login() -> AuthForm {
        return AuthForm::new(
            AuthKind::Login,
            vec![FormField::new("Email", false), FormField::new("Password", true)],
        );
    }

    pub fn register() -> AuthForm {
        return AuthForm::new(
            AuthKind::Register,
            vec![
                FormField::new("Name", false),
                FormField::new("Email", false),
                FormField::new("Password", true),
            ],
        );
    }

    fn new(kind: AuthKind, fields: Vec<FormField>) -> AuthForm {
        let mut form = AuthForm {
            kind,
            fields,
            focus: 0,
            error: None,
            loading: false,
            show_password: false,
        };
        form.sync_focus();

        return form;
    }

    pub fn kind(&self) -> AuthKind {
        return self.kind;
    }

    pub fn error(&self) -> Option<&str> {
        return self.error.as_deref();
    }

    pub fn is_loading(&self) -> bool {
        return self.loading;
    }

    pub fn is_password_visible(&self) -> bool {
        return self.show_password;
    }

    pub fn values(&self) -> Vec<String> {
        return self.fields.iter().map(|field| return field.value()).collect();
    }

    fn sync_focus(&mut self) {
        for (idx, field) in self.fields.iter_mut().enumerate() {
            TextArea::set_focus(&mut field.input, idx == self.focus, field.title);
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
        self.sync_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        self.sync_focus();
    }

    pub fn toggle_password(&mut self) {
        self.show_password = !self.show_password;
        for field in self.fields.iter_mut().filter(|field| return field.secret) {
            if self.show_password {
                field.input.clear_mask_char();
            } else {
                field.input.set_mask_char(PASSWORD_MASK);
            }
        }
    }

    pub fn input(&mut self, input: Input) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.input.input(input);
        }
    }

    /// Fields are single line, so pasted line breaks are dropped.
    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.input.insert_str(text.replace(['\r', '\n'], ""));
        }
    }

    pub fn submit(&mut self) -> Option<Action> {
        if self.loading {
            return None;
        }

        let values = self.values();
        if values.iter().any(|value| return value.trim().is_empty()) {
            self.error = Some(REQUIRED_FIELDS_MESSAGE.to_string());
            return None;
        }

        self.error = None;
        self.loading = true;

        match (self.kind, values.as_slice()) {
            (AuthKind::Register, [name, email, password]) => {
                return Some(Action::Register(RegisterRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                }));
            }
            (_, [email, password]) => {
                return Some(Action::Login(LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                }));
            }
            _ => {
                self.loading = false;
                return None;
            }
        }
    }

    /// Only offered on the login screen.
    pub fn guest(&mut self) -> Option<Action> {
        if self.loading || self.kind != AuthKind::Login {
            return None;
        }

        self.error = None;
        self.loading = true;
        return Some(Action::GuestLogin());
    }

    pub fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Resets the form once a token was issued.
    pub fn succeeded(&mut self) {
        let fresh = match self.kind {
            AuthKind::Register => AuthForm::register(),
            _ => AuthForm::login(),
        };
        *self = fresh;
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        let mut constraints = self
            .fields
            .iter()
            .map(|_| return Constraint::Length(3))
            .collect::<Vec<Constraint>>();
        constraints.push(Constraint::Min(1));

        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(rect)[1];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, field) in self.fields.iter().enumerate() {
            frame.render_widget(field.input.widget(), rows[idx]);
        }

        let footer = rows[self.fields.len()];
        if self.loading {
            Loading::new("Signing in...").render(frame, footer);
            return;
        }

        let mut help = "ENTER submit | TAB next field | CTRL+R show password".to_string();
        if self.kind == AuthKind::Login {
            help.push_str(" | CTRL+G continue as guest");
        }

        let mut lines = vec![Line::from(help)];
        if let Some(error) = &self.error {
            lines.insert(
                0,
                Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
            );
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), footer);
    }
}
