/// Raised when the current atlas page has no room for a new glyph, just
/// before a fresh page is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasFullEvent {
    /// Index of the page that filled up.
    pub page_index: usize,
    pub width: u32,
    pub height: u32,
}

/// Token returned when subscribing; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

pub type AtlasFullHandler = Box<dyn FnMut(&AtlasFullEvent)>;

/// Subscriber list for `AtlasFullEvent`, notified in subscription order.
#[derive(Default)]
pub struct EventHandlers {
    next_id: u64,
    handlers: Vec<(HandlerId, AtlasFullHandler)>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, handler: AtlasFullHandler) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    /// Returns false if no handler with this id is subscribed.
    pub fn remove(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn emit(&mut self, event: &AtlasFullEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
