//! Nested providers: inner scopes inherit every store mounted above them

use partyline::{
    create_signal, create_store, use_store, use_stores, ReadSignal, StoreProvider, WriteSignal,
};

struct SessionStore {
    user: ReadSignal<String>,
    set_user: WriteSignal<String>,
}

impl SessionStore {
    fn new() -> Self {
        let (user, set_user) = create_signal("anonymous".to_string());
        Self { user, set_user }
    }
}

struct ThemeStore {
    dark: ReadSignal<bool>,
    set_dark: WriteSignal<bool>,
}

impl ThemeStore {
    fn new() -> Self {
        let (dark, set_dark) = create_signal(false);
        Self { dark, set_dark }
    }
}

fn main() {
    println!("=== Nested Providers Example ===\n");

    println!("1. Mounting the outer provider with a session store");
    let outer = StoreProvider::mount(&[create_store("session", SessionStore::new)])
        .expect("session store mounts");

    outer.scope(|| {
        let session = use_store::<SessionStore>("session").unwrap();
        session.set_user.set("alice".to_string());
        println!("   Outer scope sees user: {}", session.user.get());

        println!("\n2. Mounting an inner provider with a theme store");
        let inner = StoreProvider::mount(&[create_store("theme", ThemeStore::new)])
            .expect("theme store mounts");

        inner.scope(|| {
            println!("\n3. The inner scope publishes the union of both maps");
            let stores = use_stores().unwrap();
            for name in stores.names() {
                println!("   - {}", name);
            }

            // The inherited entry is the same instance the outer scope uses.
            let session = use_store::<SessionStore>("session").unwrap();
            let theme = use_store::<ThemeStore>("theme").unwrap();
            theme.set_dark.set(true);
            println!(
                "\n4. Inner scope sees user: {} (dark mode: {})",
                session.user.get(),
                theme.dark.get()
            );
        });

        println!("\n5. Back outside, the theme store is out of reach");
        match use_store::<ThemeStore>("theme") {
            Ok(_) => println!("   unexpected"),
            Err(err) => println!("   Error: {}", err),
        }

        println!("\n6. Redeclaring an inherited name is rejected at mount");
        match StoreProvider::mount(&[create_store("session", SessionStore::new)]) {
            Ok(_) => println!("   unexpected"),
            Err(err) => println!("   Error: {}", err),
        }
    });

    println!("\n7. Outside every scope the locator reports the missing provider");
    match use_store::<SessionStore>("session") {
        Ok(_) => println!("   unexpected"),
        Err(err) => println!("   Error: {}", err),
    }

    println!("\n✓ Nested providers example complete!");
}
