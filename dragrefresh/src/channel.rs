//! Typed refresh-requested signal, scoped per list.
//!
//! Several lists can share one [`RefreshSignal`]. Each controller emits on
//! its own [`ChannelId`] and only handlers subscribed to that channel run.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of the list (or model) a refresh belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Allocate a process-unique channel.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Wrap an identifier the host already has (e.g. a model key).
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__refresh_{}", self.0)
    }
}

/// Anything that can name the channel its refreshes are reported on.
///
/// Usually implemented by the host's list model.
pub trait RefreshModel {
    fn channel_id(&self) -> ChannelId;
}

impl RefreshModel for ChannelId {
    fn channel_id(&self) -> ChannelId {
        *self
    }
}

impl<M: RefreshModel + ?Sized> RefreshModel for Rc<M> {
    fn channel_id(&self) -> ChannelId {
        (**self).channel_id()
    }
}

/// Handle returned by [`RefreshSignal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<RefCell<dyn FnMut(ChannelId)>>;

struct Subscription {
    id: SubscriptionId,
    channel: ChannelId,
    handler: Handler,
}

#[derive(Default)]
struct SignalInner {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

/// Single-threaded publish/subscribe hub for refresh requests.
///
/// Cloning shares the same subscriber list.
#[derive(Clone, Default)]
pub struct RefreshSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for refresh requests on `channel`.
    pub fn subscribe<F>(&self, channel: ChannelId, handler: F) -> SubscriptionId
    where
        F: FnMut(ChannelId) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscriptions.push(Subscription {
            id,
            channel,
            handler: Rc::new(RefCell::new(handler)),
        });
        log::trace!("[refresh] subscription {:?} added on {}", id, channel);
        id
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscriptions.len();
        inner.subscriptions.retain(|sub| sub.id != id);
        inner.subscriptions.len() != before
    }

    /// Number of handlers listening on `channel`.
    pub fn handler_count(&self, channel: ChannelId) -> usize {
        self.inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|sub| sub.channel == channel)
            .count()
    }

    /// Deliver a refresh request to every handler on `channel`.
    ///
    /// Handlers may subscribe or unsubscribe while being called; changes take
    /// effect on the next emit. Returns the number of handlers that ran.
    pub fn emit(&self, channel: ChannelId) -> usize {
        // Snapshot so handlers can touch the hub without a double borrow.
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|sub| sub.channel == channel)
            .map(|sub| Rc::clone(&sub.handler))
            .collect();

        let mut delivered = 0;
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(channel);
                    delivered += 1;
                }
                Err(_) => {
                    log::warn!("[refresh] skipping re-entrant handler on {}", channel);
                }
            }
        }
        log::debug!("[refresh] refresh requested on {} ({} handlers)", channel, delivered);
        delivered
    }
}

impl std::fmt::Debug for RefreshSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshSignal")
            .field("subscriptions", &self.inner.borrow().subscriptions.len())
            .finish()
    }
}
