//! Minimal key-binding support for the widget's controls.
//!
//! A [`Binding`] couples the key codes that trigger an action with the
//! help text describing it, and is matched against incoming
//! [`bubbletea_rs::KeyMsg`] values in a control's `update`.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// A single action and the keys that trigger it.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyCode>,
    help: String,
    description: String,
}

impl Binding {
    /// Creates a binding triggered by any of `keys`, with no help text.
    pub fn with_keys(keys: &[KeyCode]) -> Self {
        Self {
            keys: keys.to_vec(),
            help: String::new(),
            description: String::new(),
        }
    }

    /// Attaches help output (builder pattern): the key label shown to the
    /// user and the action it performs.
    pub fn with_help(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = label.into();
        self.description = description.into();
        self
    }

    /// The key label shown in help output (e.g. `"+"`).
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The action description shown in help output.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns true when the pressed key is one of this binding's keys.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.keys.contains(&key_msg.key)
    }
}
