//! Dialog visibility lifecycle
//!
//! [`DialogState`] is the show/hide/cancel state machine behind modal
//! widgets. Rendering is left to the caller; the state only tracks
//! visibility, runs the registered hooks and keeps the child dialogs opened
//! from it so they can be torn down together.

use std::collections::BTreeMap;
use std::fmt;

use log::trace;

/// Notification emitted when a dialog closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// The dialog was hidden.
    Hide,
    /// The dialog was dismissed without confirming. A [`Hide`](Self::Hide)
    /// follows.
    Cancel,
}

type PrefixHook = Box<dyn FnMut(bool) + Send>;
type SuffixHook = Box<dyn FnMut() + Send>;
type EventHook = Box<dyn FnMut(DialogEvent) + Send>;
type Teardown = Box<dyn FnOnce() + Send>;

/// Visibility state of one dialog.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use angelica_lib::dialog::DialogState;
///
/// let opened = Arc::new(Mutex::new(Vec::new()));
/// let log = Arc::clone(&opened);
///
/// let mut dialog = DialogState::new();
/// dialog.on_prefix(move |is_first| log.lock().unwrap().push(is_first));
///
/// dialog.show().show().hide().show();
/// assert_eq!(*opened.lock().unwrap(), [true, false, true]);
/// assert!(dialog.is_visible());
/// ```
#[derive(Default)]
pub struct DialogState {
    visible: bool,
    prefix: Vec<PrefixHook>,
    suffix: Vec<SuffixHook>,
    listeners: Vec<EventHook>,
    children: BTreeMap<String, Teardown>,
}

impl DialogState {
    /// Creates a hidden dialog with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while the dialog is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// Registers a hook run on every [`show`](Self::show). It receives
    /// `true` when the dialog goes from hidden to shown.
    pub fn on_prefix(&mut self, hook: impl FnMut(bool) + Send + 'static) -> &mut Self {
        self.prefix.push(Box::new(hook));
        self
    }

    /// Registers a hook run on every [`hide`](Self::hide), before the
    /// dialog becomes hidden.
    pub fn on_suffix(&mut self, hook: impl FnMut() + Send + 'static) -> &mut Self {
        self.suffix.push(Box::new(hook));
        self
    }

    /// Registers a listener for [`DialogEvent`]s.
    pub fn on_event(&mut self, listener: impl FnMut(DialogEvent) + Send + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    fn emit(&mut self, event: DialogEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Shows the dialog. Showing an already visible dialog runs the prefix
    /// hooks again with `is_first == false`.
    pub fn show(&mut self) -> &mut Self {
        let is_first = !self.visible;
        self.visible = true;
        trace!("[dialog] show (first: {})", is_first);
        for hook in &mut self.prefix {
            hook(is_first);
        }
        self
    }

    /// Hides the dialog: runs the suffix hooks, then emits
    /// [`DialogEvent::Hide`]. Hiding is not idempotent; hooks run on every
    /// call.
    pub fn hide(&mut self) -> &mut Self {
        for hook in &mut self.suffix {
            hook();
        }
        self.visible = false;
        trace!("[dialog] hide");
        self.emit(DialogEvent::Hide);
        self
    }

    /// Dismisses the dialog: emits [`DialogEvent::Cancel`], then hides.
    pub fn cancel(&mut self) -> &mut Self {
        trace!("[dialog] cancel");
        self.emit(DialogEvent::Cancel);
        self.hide()
    }

    /// Hides the dialog if it is visible. Call before dropping a dialog that
    /// may still be on screen.
    pub fn dispose(&mut self) {
        if self.visible {
            self.hide();
        }
    }

    // =========================================================================
    // Child dialogs
    // =========================================================================

    /// Records a dialog opened from this one. `teardown` runs when it is
    /// destroyed. A child registered under an existing name replaces it
    /// without running the old teardown.
    pub fn register_child(
        &mut self,
        name: impl Into<String>,
        teardown: impl FnOnce() + Send + 'static,
    ) -> &mut Self {
        self.children.insert(name.into(), Box::new(teardown));
        self
    }

    /// Returns the names of the live child dialogs, sorted.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.keys().map(String::as_str).collect()
    }

    /// Destroys the child dialog `name`, or every child when `name` is
    /// `None`. Unknown names are ignored.
    pub fn destroy_child(&mut self, name: Option<&str>) -> &mut Self {
        match name {
            Some(name) => {
                if let Some(teardown) = self.children.remove(name) {
                    trace!("[dialog] destroying child '{}'", name);
                    teardown();
                }
            }
            None => {
                for (name, teardown) in std::mem::take(&mut self.children) {
                    trace!("[dialog] destroying child '{}'", name);
                    teardown();
                }
            }
        }
        self
    }
}

impl fmt::Debug for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogState")
            .field("visible", &self.visible)
            .field("children", &self.child_names())
            .finish_non_exhaustive()
    }
}
