//! Store injection: wrapped components receive stores as ordinary props

use partyline::{
    create_signal, create_store, use_store, with_stores, Props, ReadSignal, StoreProvider,
    WriteSignal,
};

struct CartStore {
    items: ReadSignal<Vec<String>>,
    set_items: WriteSignal<Vec<String>>,
}

impl CartStore {
    fn new() -> Self {
        let (items, set_items) = create_signal(Vec::new());
        Self { items, set_items }
    }

    fn add(&self, item: &str) {
        let item = item.to_string();
        self.set_items.update(|items| items.push(item));
    }
}

fn main() {
    println!("=== Injected Props Example ===\n");

    println!("1. Mounting a provider with a cart store");
    let provider = StoreProvider::mount(&[create_store("cart", CartStore::new)])
        .expect("cart store mounts");

    // The wrapped component never calls the locator itself. The cart
    // arrives in its props next to whatever the caller passed.
    let cart_summary = with_stores(
        |props: Props| {
            let cart = props.get::<CartStore>("cart").unwrap();
            let title = props.get::<String>("title").unwrap();
            let count = cart.items.with(|items| items.len());
            format!("{}: {} item(s)", title, count)
        },
        &["cart"],
    );

    provider.scope(|| {
        println!("\n2. Filling the cart through a located handle");
        let cart = use_store::<CartStore>("cart").unwrap();
        cart.add("keyboard");
        cart.add("mouse");

        println!("\n3. Rendering the wrapped component with caller props");
        let mut props = Props::new();
        props.insert("title", "Your cart".to_string());
        match cart_summary.render(props) {
            Ok(rendered) => println!("   {}", rendered),
            Err(err) => println!("   Error: {}", err),
        }

        println!("\n4. A caller prop named like a store is replaced by the store");
        let mut props = Props::new();
        props.insert("title", "Shadowed".to_string());
        props.insert("cart", "not a cart at all".to_string());
        match cart_summary.render(props) {
            Ok(rendered) => println!("   {}", rendered),
            Err(err) => println!("   Error: {}", err),
        }
    });

    println!("\n5. Rendering outside any provider fails with a clear error");
    match cart_summary.render(Props::new()) {
        Ok(_) => println!("   unexpected"),
        Err(err) => println!("   Error: {}", err),
    }

    println!("\n✓ Injected props example complete!");
}
