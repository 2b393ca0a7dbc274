// Example: simulate a host that forwards scroll events and redraws cells keyed by slot.
use std::collections::HashMap;

use waterfall::{Item, LayoutOptions};
use waterfall_adapter::{DriverOptions, ViewportDriver};

fn main() {
    let items: Vec<Item<String, u8>> = (0..500)
        .map(|i| Item::new(80 + (i % 4) * 40, (i % 2) as u8, format!("item {i}")))
        .collect();

    let opts = DriverOptions::new(LayoutOptions::new(2, 640).with_gaps(8, 8, 8), 600)
        .with_scroll_throttle(50)
        .with_on_end_reached(Some(|| println!("end reached, load more")))
        .with_on_header_show(Some(|| println!("header shown")));

    let mut driver = ViewportDriver::new(opts).expect("valid options");
    driver.set_items(&items).expect("valid geometry");
    driver.on_header_height(120);
    driver.mount();
    driver.tick();

    // A host keeps one visual node per slot and only rewrites its content.
    let mut nodes: HashMap<usize, usize> = HashMap::new();
    for off in (0..30_000u64).step_by(700) {
        driver.on_scroll(off);
        driver.tick();

        let mut rebinds = 0usize;
        driver.for_each_rendered(|cell| {
            if nodes.insert(cell.slot, cell.index) != Some(cell.index) {
                rebinds += 1;
            }
        });
        println!(
            "offset={off} nodes={} rebinds={rebinds} shown={:?}",
            nodes.len(),
            driver.shown_range()
        );
    }
}
