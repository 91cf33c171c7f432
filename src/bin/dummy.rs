use std::path::Path;

use chrono::{Local, Utc};

use daybook::buckets;
use daybook::ical;
use daybook::rollover::roll_over;
use daybook::{MarkerStore, Store};

fn main() {
    env_logger::init();

    // Read once, then threaded explicitly everywhere
    let today = Local::now().date_naive();

    let mut store = Store::load_or_seed(Path::new("daybook.json"), today);
    let mut marker = MarkerStore::load_or_default(Path::new("daybook-marker.json"));

    let outcome = roll_over(store.tasks_mut(), marker.last_rollover(), today);
    marker.set_last_rollover(outcome.marker);
    store.save();
    marker.save();

    println!("Today ({}):", today);
    for task in buckets::tasks_on_date(store.tasks(), today) {
        let check = if task.completed() { "x" } else { " " };
        println!("  [{}] {} ({})", check, task.text(), task.category());
    }
    println!("Coming week: {} task(s)", buckets::next_7_days(store.tasks(), today).len());

    println!("\n--- {} ---", ical::export_filename(today));
    print!("{}", ical::build_document(store.tasks(), &Utc::now()));
}
