//! The shared error-display mechanism.
//!
//! The original widget reports failures through one page-wide banner; this
//! module is that collaborator. It keeps the last surfaced message and
//! renders it styled. Surfacing a new message replaces the old one;
//! nothing is queued and nothing is retried from here.

use lipgloss_extras::lipgloss::{Color, Style};

/// Styling for the error banner.
#[derive(Debug, Clone)]
pub struct DisplayStyles {
    /// Style applied to the surfaced message.
    pub message: Style,
}

impl Default for DisplayStyles {
    fn default() -> Self {
        Self {
            message: Style::new().foreground(Color::from("9")).bold(true),
        }
    }
}

/// The page-wide error banner.
///
/// # Examples
///
/// ```rust
/// use tasklist_widget::error::Display;
///
/// let mut errors = Display::new();
/// assert!(errors.last_message().is_none());
///
/// errors.display_server_error("something broke");
/// assert_eq!(errors.last_message(), Some("something broke"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Display {
    message: Option<String>,
    /// Banner styling.
    pub styles: DisplayStyles,
}

impl Display {
    /// Creates an empty banner with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the banner styling (builder pattern).
    pub fn with_styles(mut self, styles: DisplayStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Surfaces a message to the user, replacing any previous one.
    pub fn display_server_error(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// The currently surfaced message, if any.
    pub fn last_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Clears the banner.
    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Renders the banner, or an empty string when nothing is surfaced.
    pub fn view(&self) -> String {
        match &self.message {
            Some(message) => self.styles.message.render(message),
            None => String::new(),
        }
    }
}
