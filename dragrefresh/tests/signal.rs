mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{controller_on, drag_to, release};
use dragrefresh::{ChannelId, RefreshModel, RefreshSignal, RefreshState};

struct InboxModel {
    key: u64,
}

impl RefreshModel for InboxModel {
    fn channel_id(&self) -> ChannelId {
        ChannelId::from_raw(self.key)
    }
}

// =============================================================================
// Hub
// =============================================================================

#[test]
fn test_emit_reaches_only_matching_channel() {
    let signal = RefreshSignal::new();
    let (a, b) = (ChannelId::next(), ChannelId::next());
    let seen = Rc::new(RefCell::new(Vec::new()));

    for channel in [a, b] {
        let sink = Rc::clone(&seen);
        signal.subscribe(channel, move |ch| sink.borrow_mut().push(ch));
    }

    assert_eq!(signal.emit(a), 1);
    assert_eq!(*seen.borrow(), vec![a]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let signal = RefreshSignal::new();
    let channel = ChannelId::next();
    let hits = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&hits);

    let id = signal.subscribe(channel, move |_| *sink.borrow_mut() += 1);
    assert_eq!(signal.handler_count(channel), 1);
    assert!(signal.unsubscribe(id));
    assert!(!signal.unsubscribe(id));

    assert_eq!(signal.emit(channel), 0);
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn test_handler_may_subscribe_during_emit() {
    let signal = RefreshSignal::new();
    let channel = ChannelId::next();
    let hub = signal.clone();

    signal.subscribe(channel, move |ch| {
        hub.subscribe(ch, |_| {});
    });

    assert_eq!(signal.emit(channel), 1);
    assert_eq!(signal.handler_count(channel), 2);
}

#[test]
fn test_channel_ids_are_unique() {
    let a = ChannelId::next();
    let b = ChannelId::next();
    assert_ne!(a, b);
    assert_eq!(ChannelId::from_raw(a.raw()), a);
    assert!(a.to_string().starts_with("__refresh_"));
}

// =============================================================================
// Lists sharing a hub
// =============================================================================

#[test]
fn test_two_lists_on_one_hub_do_not_cross_trigger() {
    let signal = RefreshSignal::new();
    let inbox = InboxModel { key: 7 };
    let archive = InboxModel { key: 8 };

    let mut first = controller_on(60.0, 0.0, signal.clone(), inbox.channel_id());
    let mut second = controller_on(60.0, 0.0, signal.clone(), archive.channel_id());

    let first_hits = Rc::new(RefCell::new(Vec::new()));
    let second_hits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&first_hits);
    signal.subscribe(inbox.channel_id(), move |ch| sink.borrow_mut().push(ch));
    let sink = Rc::clone(&second_hits);
    signal.subscribe(archive.channel_id(), move |ch| sink.borrow_mut().push(ch));

    drag_to(&mut first, 90.0);
    release(&mut first);

    assert_eq!(first.state(), RefreshState::Refreshing);
    assert_eq!(second.state(), RefreshState::Idle);
    assert_eq!(*first_hits.borrow(), vec![ChannelId::from_raw(7)]);
    assert!(second_hits.borrow().is_empty());

    drag_to(&mut second, 60.0);
    release(&mut second);
    assert_eq!(*second_hits.borrow(), vec![ChannelId::from_raw(8)]);
    assert_eq!(first_hits.borrow().len(), 1);
}

#[test]
fn test_builder_takes_channel_from_model() {
    use dragrefresh::{DragRefreshController, RefreshConfig, RefreshIndicatorView};

    let model = Rc::new(InboxModel { key: 42 });
    let indicator = RefreshIndicatorView::new(RefreshConfig::default()).unwrap();
    let c = DragRefreshController::builder(common::MockScrollView::default())
        .indicator(indicator)
        .model(&model)
        .build()
        .unwrap();
    assert_eq!(c.channel(), ChannelId::from_raw(42));
}
