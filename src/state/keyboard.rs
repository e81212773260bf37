//! Keyboard Module - Key event state and handler registry
//!
//! Handler registry for key presses coming from the host. The nav bar hooks
//! Escape here to close its menu; the terminal host hooks its own bindings.
//! Does NOT own stdin (that is the input module).
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on(handler)` - Subscribe to all keyboard events
//! - `on_key(key, fn)` - Subscribe to a specific key
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::keyboard;
//!
//! let cleanup = keyboard::on_key("Escape", || {
//!     println!("close menu");
//!     false // let other handlers see it too
//! });
//!
//! keyboard::dispatch(KeyboardEvent::new("Escape"));
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Escape", "ArrowDown")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for a specific key. Return true to consume the event.
pub type KeySpecificHandler = Box<dyn Fn() -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<String, Vec<(usize, KeySpecificHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
///
/// Key-specific handlers run before global ones. Handlers run after the
/// registry borrow is released, so they may register or remove handlers.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    // Only dispatch press events to handlers
    if event.state != KeyState::Press {
        return false;
    }

    let (key_ids, global_ids) = REGISTRY.with(|reg| {
        let reg = reg.borrow();
        let key_ids: Vec<usize> = reg
            .key_handlers
            .get(&event.key)
            .map(|handlers| handlers.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default();
        let global_ids: Vec<usize> = reg.global_handlers.iter().map(|(id, _)| *id).collect();
        (key_ids, global_ids)
    });

    for id in key_ids {
        if let Some(true) = call_key_handler(&event.key, id) {
            return true;
        }
    }

    for id in global_ids {
        if let Some(true) = call_global_handler(id, &event) {
            return true;
        }
    }

    false
}

/// Run one key handler by id, if it is still registered. The handler is taken
/// out of the registry for the call and put back afterwards.
fn call_key_handler(key: &str, id: usize) -> Option<bool> {
    let handler = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let handlers = reg.key_handlers.get_mut(key)?;
        let pos = handlers.iter().position(|(hid, _)| *hid == id)?;
        Some(handlers.remove(pos))
    })?;

    let consumed = (handler.1)();

    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let handlers = reg.key_handlers.entry(key.to_string()).or_default();
        let pos = handlers.partition_point(|(hid, _)| *hid < id);
        handlers.insert(pos, handler);
    });

    Some(consumed)
}

fn call_global_handler(id: usize, event: &KeyboardEvent) -> Option<bool> {
    let handler = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let pos = reg.global_handlers.iter().position(|(hid, _)| *hid == id)?;
        Some(reg.global_handlers.remove(pos))
    })?;

    let consumed = (handler.1)(event);

    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let pos = reg.global_handlers.partition_point(|(hid, _)| *hid < id);
        reg.global_handlers.insert(pos, handler);
    });

    Some(consumed)
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.global_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to a specific key.
/// Handler receives no arguments - check last_event if needed.
/// Return true to consume the event.
/// Returns cleanup function.
pub fn on_key<F>(key: &str, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    let key = key.to_string();
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers
            .entry(key.clone())
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.key_handlers.remove(&key);
                }
            }
        });
    }
}

/// Number of registered handlers (global plus key-specific).
pub fn handler_count() -> usize {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.global_handlers.len() + reg.key_handlers.values().map(Vec::len).sum::<usize>()
    })
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| {
        *reg.borrow_mut() = HandlerRegistry::new();
    });
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================
