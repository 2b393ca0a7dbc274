// Example: lay out a feed in three columns and scroll the recycling window through it.
use waterfall::{Item, LayoutOptions, MasonryLayout, RenderSlot, WindowOptions, WindowTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Card {
    Photo,
    Text,
}

fn main() {
    let items: Vec<Item<usize, Card>> = (0..10_000)
        .map(|i| {
            let (height, card) = if i % 3 == 0 {
                (320, Card::Photo)
            } else {
                (120 + (i as u32 % 5) * 20, Card::Text)
            };
            Item::new(height, card, i)
        })
        .collect();

    let mut layout = MasonryLayout::new();
    let opts = LayoutOptions::new(3, 960).with_gaps(12, 12, 12);
    layout.relayout(&items, &opts).expect("valid geometry");
    println!("content_height={}", layout.content_height());

    let mut tracker = WindowTracker::new(WindowOptions::new(800)).expect("valid window");
    let mut rendered: Vec<RenderSlot> = Vec::new();
    for off in [0u64, 400, 1_600, 6_400, 3_200, 0] {
        let update = tracker.update(off, layout.entries());
        tracker.collect_rendered(&mut rendered);
        println!(
            "offset={off} changed={} window={:?} slots={}",
            update.changed,
            tracker.window_range(),
            rendered.len()
        );
    }
}
