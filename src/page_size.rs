//! The page-size selector control.
//!
//! This is the widget's rendition of the host page's "items per page"
//! select: an ordered list of options, a current value, and a change
//! event the controller listens to. The value is a string end-to-end and
//! is sent to the server exactly as stored, unvalidated.
//!
//! Listeners are tracked through explicit [`Subscription`] handles rather
//! than namespaced event keys: a subscriber stores the handle it got from
//! [`Model::subscribe`] and cancels it with [`Model::unsubscribe`] before
//! subscribing again. Each change event yields exactly one [`ChangedMsg`]
//! per live subscription, so a correctly rebound listener fires once no
//! matter how many times it was rebound.
//!
//! # Examples
//!
//! ```rust
//! use tasklist_widget::page_size::Model;
//!
//! let mut control = Model::new();
//! let sub = control.subscribe();
//!
//! let fired = control.select_next();
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].subscription, sub.id());
//!
//! control.unsubscribe(sub);
//! assert!(control.select_next().is_empty());
//! ```

use crate::key::Binding;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use once_cell::sync::Lazy;

/// Default option list, matching a typical server-rendered select.
static DEFAULT_OPTIONS: Lazy<Vec<String>> =
    Lazy::new(|| ["10", "20", "50"].iter().map(|s| s.to_string()).collect());

/// Notification that the control's value changed.
///
/// One message is produced per live subscription; the `subscription` field
/// carries the id of the subscription it was produced for, so holders of a
/// cancelled handle can reject stale notifications.
#[derive(Debug, Clone)]
pub struct ChangedMsg {
    /// Id of the subscription this notification belongs to.
    pub subscription: u64,
    /// The control's value after the change.
    pub value: String,
}

/// A live change-listener registration.
///
/// Deliberately not `Clone`: there is exactly one handle per registration,
/// and cancelling consumes it. Holding the handle is what keeps the
/// listener alive.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

impl Subscription {
    /// The id change notifications for this registration carry.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Key bindings for the page-size control.
#[derive(Debug, Clone)]
pub struct PageSizeKeyMap {
    /// Cycle to the next (larger) option. Default keys: '+', '='.
    pub next_option: Binding,
    /// Cycle to the previous (smaller) option. Default key: '-'.
    pub prev_option: Binding,
}

impl Default for PageSizeKeyMap {
    fn default() -> Self {
        Self {
            next_option: Binding::with_keys(&[KeyCode::Char('+'), KeyCode::Char('=')])
                .with_help("+", "more per page"),
            prev_option: Binding::with_keys(&[KeyCode::Char('-')])
                .with_help("-", "fewer per page"),
        }
    }
}

/// The page-size selector model.
#[derive(Debug)]
pub struct Model {
    value: String,
    options: Vec<String>,
    subscribers: Vec<u64>,
    next_id: u64,
    /// Key bindings.
    pub keymap: PageSizeKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        let options = DEFAULT_OPTIONS.clone();
        let value = options.first().cloned().unwrap_or_default();
        Self {
            value,
            options,
            subscribers: Vec::new(),
            next_id: 1,
            keymap: PageSizeKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a control with the default option list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the option list (builder pattern).
    ///
    /// The current value resets to the first option. An empty list leaves
    /// the control with an empty value and nothing to cycle through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tasklist_widget::page_size::Model;
    ///
    /// let control = Model::new().with_options(&["20", "100"]);
    /// assert_eq!(control.value(), "20");
    /// ```
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|s| s.to_string()).collect();
        self.value = self.options.first().cloned().unwrap_or_default();
        self
    }

    /// Sets the current value without firing the change event.
    ///
    /// This is the programmatic path, used when freshly injected markup
    /// carries a control state of its own. Only user interaction fires
    /// change notifications, matching the original widget's events.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The current value, as-is.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The option list.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Registers a change listener and returns its handle.
    pub fn subscribe(&mut self) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(id);
        Subscription { id }
    }

    /// Cancels a registration, consuming its handle.
    ///
    /// Notifications already in flight for this subscription keep its id
    /// and can be rejected by comparing against the replacement handle.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|id| *id != subscription.id);
    }

    /// Number of live registrations.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Fires the change event: one notification per live subscription.
    pub fn fire_change(&self) -> Vec<ChangedMsg> {
        self.subscribers
            .iter()
            .map(|id| ChangedMsg {
                subscription: *id,
                value: self.value.clone(),
            })
            .collect()
    }

    /// Cycles to the next option, wrapping, and fires the change event.
    pub fn select_next(&mut self) -> Vec<ChangedMsg> {
        self.cycle(1)
    }

    /// Cycles to the previous option, wrapping, and fires the change event.
    pub fn select_prev(&mut self) -> Vec<ChangedMsg> {
        self.cycle(-1)
    }

    fn cycle(&mut self, step: isize) -> Vec<ChangedMsg> {
        if self.options.is_empty() {
            return Vec::new();
        }
        let len = self.options.len() as isize;
        let current = self
            .options
            .iter()
            .position(|o| *o == self.value)
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.value = self.options[next].clone();
        self.fire_change()
    }

    /// Handles key presses, firing the change event on a cycle.
    ///
    /// Returns the notifications produced by the press, empty when the
    /// message was not for this control. The host forwards these to
    /// whoever holds the subscription, typically through
    /// [`crate::app::App::update`].
    pub fn update(&mut self, msg: &Msg) -> Vec<ChangedMsg> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_option.matches(key_msg) {
                return self.select_next();
            }
            if self.keymap.prev_option.matches(key_msg) {
                return self.select_prev();
            }
        }
        Vec::new()
    }

    /// Renders the option row with the current value marked.
    ///
    /// ```text
    /// per page: 10 [20] 50
    /// ```
    pub fn view(&self) -> String {
        let rendered: Vec<String> = self
            .options
            .iter()
            .map(|o| {
                if *o == self.value {
                    format!("[{}]", o)
                } else {
                    o.clone()
                }
            })
            .collect();
        format!("per page: {}", rendered.join(" "))
    }
}
