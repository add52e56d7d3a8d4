use crate::asset_dialog::ContributorId;
use crate::components::{AppView, GlobalLoadingBar, GlobalLoadingSignal, Icon};
use crate::config::AppConfig;
use dioxus::prelude::*;
use std::collections::HashSet;

#[component]
pub fn AppShell() -> Element {
    let loading = use_signal(HashSet::<ContributorId>::new);

    // Provide state via context
    use_context_provider(|| {
        let config = AppConfig::load();
        tracing::info!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.request_timeout_secs,
            page_size = config.page_size,
            "album config loaded"
        );
        config
    });
    use_context_provider(|| GlobalLoadingSignal(loading));

    rsx! {
        div { class: "min-h-screen bg-zinc-950 text-white",
            GlobalLoadingBar {}
            header { class: "sticky top-0 z-40 flex items-center gap-3 px-6 py-4 border-b border-zinc-800/80 bg-zinc-950/90 backdrop-blur",
                Icon { name: "album".to_string(), class: "w-5 h-5 text-amber-400".to_string() }
                Link {
                    class: "text-lg font-semibold",
                    to: AppView::AlbumPosts {
                        page: 1,
                        category: String::new(),
                        asset: String::new(),
                    },
                    "Album"
                }
            }
            main { class: "px-4 md:px-8 py-6", Outlet::<AppView> {} }
        }
    }
}
