use dioxus::prelude::*;

mod api;
mod asset_dialog;
mod components;
mod config;

use components::AppView;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Dino Album" }

        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#09090b" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Dino Album" }

        document::Script { src: "https://cdn.tailwindcss.com" }

        Router::<AppView> {}
    }
}
