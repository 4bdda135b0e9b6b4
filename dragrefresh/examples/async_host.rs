//! A host that services refresh requests asynchronously.
//!
//! Plays a scripted pull gesture, waits on a fake network fetch while the
//! header spins, then finishes the refresh and lets the header collapse.

use std::time::{Duration, Instant};

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use tokio::sync::mpsc;

use dragrefresh::{
    ChannelId, DragRefreshController, EdgeInsets, RefreshConfig, RefreshIndicatorView,
    RefreshModel, ScrollEvent, ScrollMetrics, ScrollMetricsSource,
};

const HEADER_WIDTH: usize = 36;

struct FeedModel {
    id: u64,
}

impl RefreshModel for FeedModel {
    fn channel_id(&self) -> ChannelId {
        ChannelId::from_raw(self.id)
    }
}

#[derive(Default)]
struct DemoList {
    metrics: ScrollMetrics,
}

impl ScrollMetricsSource for DemoList {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn set_top_content_inset(&mut self, value: f32) {
        log::info!("list top inset -> {}", value);
        self.metrics.inset.top = value;
    }
}

fn gesture() -> Vec<ScrollEvent> {
    let inset = EdgeInsets::default();
    let mut events = vec![ScrollEvent::drag_began()];
    events.extend((1..=8).map(|step| ScrollEvent::offset(-(step as f32) * 10.0, inset)));
    events.push(ScrollEvent::drag_ended());
    events
}

fn draw(controller: &DragRefreshController<DemoList>) {
    let lines = controller.indicator().render(HEADER_WIDTH);
    println!("[{:>14}] {}", controller.state().to_string(), lines.join(" | "));
}

async fn fetch_items() -> usize {
    tokio::time::sleep(Duration::from_millis(600)).await;
    25
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let model = FeedModel { id: 1 };
    let indicator = RefreshIndicatorView::new(RefreshConfig::default())?;
    let mut controller = DragRefreshController::builder(DemoList::default())
        .indicator(indicator)
        .model(&model)
        .build()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    controller.on_refresh_requested(move |channel| {
        let _ = tx.send(channel);
    });
    controller.on_collapsed(|channel| log::info!("header on {} collapsed", channel));

    for event in gesture() {
        controller.handle_event(event);
        controller.tick(Instant::now());
        draw(&controller);
    }

    let Ok(channel) = rx.try_recv() else {
        println!("pull did not reach the threshold");
        return Ok(());
    };
    log::info!("host starting fetch for {}", channel);

    let mut frames = tokio::time::interval(Duration::from_millis(80));
    let fetch = fetch_items();
    tokio::pin!(fetch);
    let count = loop {
        tokio::select! {
            count = &mut fetch => break count,
            _ = frames.tick() => {
                controller.tick(Instant::now());
                draw(&controller);
            }
        }
    };
    log::info!("fetched {} items", count);

    controller.finish_refresh();
    while controller.indicator().is_visible() {
        frames.tick().await;
        controller.tick(Instant::now());
        draw(&controller);
    }
    Ok(())
}
