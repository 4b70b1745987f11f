//! Session events from the data layer to the one owner of session teardown.
//!
//! HTTP clients emit [`SessionEvent::Unauthorized`] when the backend rejects
//! the session. A single subscriber, normally the UI's auth context, reacts
//! by tearing the session down. The data layer never reaches into the UI.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    Unauthorized,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Unauthorized => "unauthorized",
        }
    }
}

type Handler = Box<dyn FnMut(SessionEvent)>;

#[derive(Default)]
struct Inner {
    subscriber: Option<Handler>,
    /// Set after an unauthorized event until the session is re-established,
    /// so a burst of failing requests tears down only once.
    unauthorized: bool,
    /// Bumped on every subscribe and unsubscribe.
    generation: u64,
}

/// Single-subscriber event channel. Clones share the same subscriber.
#[derive(Clone, Default)]
pub struct SessionChannel {
    inner: Rc<RefCell<Inner>>,
}

impl SessionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the owner of session teardown. Fails if one is registered.
    pub fn subscribe(&self, handler: impl FnMut(SessionEvent) + 'static) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.subscriber.is_some() {
            return Err(DashboardError::AlreadySubscribed);
        }
        inner.subscriber = Some(Box::new(handler));
        inner.generation += 1;
        Ok(())
    }

    pub fn unsubscribe(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.subscriber = None;
        inner.generation += 1;
    }

    /// Deliver an event. Returns whether a subscriber received it.
    pub fn emit(&self, event: SessionEvent) -> bool {
        // Take the handler out so it may emit or unsubscribe re-entrantly.
        let (handler, generation) = {
            let mut inner = self.inner.borrow_mut();
            match event {
                SessionEvent::Unauthorized if inner.unauthorized => return false,
                SessionEvent::Unauthorized => inner.unauthorized = true,
            }
            (inner.subscriber.take(), inner.generation)
        };

        let Some(mut handler) = handler else {
            return false;
        };
        handler(event);

        // Put it back only if the handler did not unsubscribe or replace itself.
        let mut inner = self.inner.borrow_mut();
        if inner.generation == generation {
            inner.subscriber = Some(handler);
        }
        true
    }

    /// Mark the session as established again, e.g. after a fresh login.
    pub fn reset(&self) {
        self.inner.borrow_mut().unauthorized = false;
    }

    pub fn is_unauthorized(&self) -> bool {
        self.inner.borrow().unauthorized
    }
}

/// JavaScript handle on a [`SessionChannel`].
#[wasm_bindgen]
pub struct SessionEvents {
    channel: SessionChannel,
}

impl SessionEvents {
    pub fn channel(&self) -> SessionChannel {
        self.channel.clone()
    }
}

#[wasm_bindgen]
impl SessionEvents {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SessionEvents {
        SessionEvents {
            channel: SessionChannel::new(),
        }
    }

    /// Register the teardown callback; it receives the event name.
    pub fn subscribe(&self, callback: js_sys::Function) -> core::result::Result<(), JsValue> {
        self.channel.subscribe(move |event| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(event.name())) {
                crate::log_error!("Session callback failed: {:?}", e);
            }
        })?;
        Ok(())
    }

    pub fn unsubscribe(&self) {
        self.channel.unsubscribe();
    }

    pub fn emit_unauthorized(&self) -> bool {
        self.channel.emit(SessionEvent::Unauthorized)
    }

    pub fn reset(&self) {
        self.channel.reset();
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<RefCell<Vec<SessionEvent>>>, impl FnMut(SessionEvent)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |event| sink.borrow_mut().push(event))
    }

    #[test]
    fn test_single_subscriber() {
        let channel = SessionChannel::new();
        let (_, handler) = counter();
        channel.subscribe(handler).unwrap();

        let (_, second) = counter();
        assert!(matches!(
            channel.subscribe(second),
            Err(DashboardError::AlreadySubscribed)
        ));
    }

    #[test]
    fn test_unauthorized_delivered_once_until_reset() {
        let channel = SessionChannel::new();
        let (seen, handler) = counter();
        channel.subscribe(handler).unwrap();

        let data_layer = channel.clone();
        assert!(data_layer.emit(SessionEvent::Unauthorized));
        assert!(!data_layer.emit(SessionEvent::Unauthorized));
        assert_eq!(seen.borrow().len(), 1);

        channel.reset();
        assert!(data_layer.emit(SessionEvent::Unauthorized));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_emit_without_subscriber() {
        let channel = SessionChannel::new();
        assert!(!channel.emit(SessionEvent::Unauthorized));
        assert!(channel.is_unauthorized());
    }

    #[test]
    fn test_handler_may_unsubscribe_and_resubscribe() {
        let channel = SessionChannel::new();
        let inner = channel.clone();
        channel
            .subscribe(move |_| {
                inner.unsubscribe();
                inner.subscribe(|_| {}).unwrap();
            })
            .unwrap();

        assert!(channel.emit(SessionEvent::Unauthorized));
        // The replacement registered inside the handler is kept.
        channel.reset();
        assert!(channel.emit(SessionEvent::Unauthorized));
    }

    #[test]
    fn test_handler_that_unsubscribes_stays_removed() {
        let channel = SessionChannel::new();
        let inner = channel.clone();
        channel.subscribe(move |_| inner.unsubscribe()).unwrap();

        assert!(channel.emit(SessionEvent::Unauthorized));

        // The next owner of teardown can register.
        let (seen, next) = counter();
        channel.subscribe(next).unwrap();
        channel.reset();
        assert!(channel.emit(SessionEvent::Unauthorized));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_handler_kept_across_emits() {
        let channel = SessionChannel::new();
        let (seen, handler) = counter();
        channel.subscribe(handler).unwrap();

        for _ in 0..3 {
            assert!(channel.emit(SessionEvent::Unauthorized));
            channel.reset();
        }
        assert_eq!(seen.borrow().len(), 3);
    }
}
