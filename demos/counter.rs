//! Counter shared by several components through one named store

use partyline::{
    create_effect, create_signal, create_store, use_store, ReadSignal, StoreProvider, WriteSignal,
};
use std::sync::Arc;

const COUNTER_STORE: &str = "counter";

struct CounterStore {
    count: ReadSignal<i32>,
    set_count: WriteSignal<i32>,
}

impl CounterStore {
    fn new() -> Self {
        let (count, set_count) = create_signal(0);
        Self { count, set_count }
    }

    fn increment(&self) {
        self.set_count.update(|n| *n += 1);
    }

    fn decrement(&self) {
        self.set_count.update(|n| *n -= 1);
    }

    fn reset(&self) {
        self.set_count.set(0);
    }
}

// A "component": locates the store and renders from it.
fn counter_view(label: &str) -> String {
    let counter = use_store::<CounterStore>(COUNTER_STORE).unwrap();
    format!("[{}] count = {}", label, counter.count.get())
}

fn main() {
    println!("=== Shared Counter Example ===\n");

    println!("1. Mounting a provider with one counter store");
    let provider = StoreProvider::mount(&[create_store(COUNTER_STORE, CounterStore::new)])
        .expect("counter store mounts");

    provider.scope(|| {
        println!("\n2. Three components render from the same instance");
        println!("   {}", counter_view("first"));
        println!("   {}", counter_view("second"));
        println!("   {}", counter_view("third"));

        // An effect stands in for a re-rendering subscriber. It holds the
        // store instance, so it keeps reacting after the scope ends.
        println!("\n3. Watching the count with an effect");
        let counter = use_store::<CounterStore>(COUNTER_STORE).unwrap();
        let _watcher = create_effect({
            let counter = Arc::clone(&counter);
            move || {
                println!("   [Effect] Count is now: {}", counter.count.get());
            }
        });

        println!("\n4. Acting through one component updates all of them");
        counter.increment();
        counter.increment();
        counter.increment();

        println!("\n5. Rendering again shows the shared value everywhere");
        println!("   {}", counter_view("first"));
        println!("   {}", counter_view("second"));
        println!("   {}", counter_view("third"));

        println!("\n6. Decrement and reset go through the same instance");
        counter.decrement();
        counter.reset();
        println!("   {}", counter_view("first"));
    });

    println!("\n✓ Shared counter example complete!");
}
