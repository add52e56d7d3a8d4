//! Asset detail dialog: the hook that wires the coordinator into the page and
//! the overlay that renders its snapshot.

use crate::api::{AlbumClient, RefinedAsset};
use crate::asset_dialog::{
    drive_fetch_chain, AssetDialogCoordinator, AssetDialogSnapshot, AssetIdentifier,
};
use crate::components::{GlobalLoadingSignal, Icon, PostPageQueryParams, RouteQueryParams};
use crate::config::AppConfig;
use dioxus::core::Task;
use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
pub struct AssetDialogHandle {
    pub snapshot: AssetDialogSnapshot,
    coordinator: Signal<AssetDialogCoordinator<GlobalLoadingSignal>>,
    store: RouteQueryParams,
}

impl AssetDialogHandle {
    pub fn open(&self, asset_id: &str) {
        let mut store = self.store.clone();
        self.coordinator
            .peek()
            .open_asset(&mut store, AssetIdentifier::from(asset_id));
    }

    pub fn close(&self) {
        let mut store = self.store.clone();
        self.coordinator.peek().close(&mut store);
    }
}

/// Drive the asset dialog from the page's `asset` query parameter.
///
/// Dialog visibility is derived from `params` during render; the fetch chain
/// for a new identifier is started from an effect and the previous chain, if
/// still running, is cancelled.
pub fn use_asset_dialog(params: PostPageQueryParams) -> AssetDialogHandle {
    let config = use_context::<AppConfig>();
    let loading = use_context::<GlobalLoadingSignal>();
    let coordinator = use_signal(|| AssetDialogCoordinator::new(loading));
    let chain = use_signal(|| None::<Task>);
    let identifier = AssetIdentifier::parse(Some(&params.asset));

    use_effect(use_reactive((&identifier,), move |(identifier,)| {
        let mut coordinator = coordinator;
        let mut chain = chain;

        let request = coordinator.write().sync(identifier);
        if let Some(previous) = chain.take() {
            previous.cancel();
        }
        let Some(request) = request else {
            return;
        };

        let client = AlbumClient::new(&config);
        let task = spawn(async move {
            drive_fetch_chain(&client, request, |outcome| {
                coordinator.write().settle(outcome)
            })
            .await;
        });
        chain.set(Some(task));
    }));

    let snapshot = coordinator.read().snapshot_for(&identifier);

    AssetDialogHandle {
        snapshot,
        coordinator,
        store: RouteQueryParams::new(params),
    }
}

#[component]
pub fn AssetDialog(dialog: AssetDialogHandle) -> Element {
    let snapshot = dialog.snapshot.clone();
    if !snapshot.is_dialog_open {
        return rsx! {};
    }

    let on_backdrop = {
        let dialog = dialog.clone();
        move |_| dialog.close()
    };
    let on_close = {
        let dialog = dialog.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            dialog.close();
        }
    };

    let body = match (&snapshot.refined_asset, &snapshot.failure) {
        (Some(asset), _) => rsx! {
            AssetDetails { asset: asset.clone() }
        },
        (None, Some(error)) => rsx! {
            div { class: "flex flex-col items-center gap-3 py-16 text-center",
                Icon { name: "alert".to_string(), class: "w-8 h-8 text-rose-400".to_string() }
                p { class: "text-zinc-300", "{error.user_message()}" }
            }
        },
        (None, None) => rsx! {
            div { class: "flex items-center justify-center py-24",
                Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-400".to_string() }
            }
        },
    };

    rsx! {
        div {
            class: "fixed inset-0 z-[80] bg-zinc-950/90 flex items-center justify-center p-4",
            onclick: on_backdrop,
            div {
                class: "relative w-full max-w-4xl rounded-2xl border border-zinc-800 bg-zinc-900 overflow-hidden",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                button {
                    class: "absolute top-3 right-3 p-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800/80 transition-colors",
                    aria_label: "Close asset",
                    onclick: on_close,
                    Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                }
                {body}
            }
        }
    }
}

#[component]
fn AssetDetails(asset: RefinedAsset) -> Element {
    let reactions = asset.metadata.reaction.clone();
    let comment_count = asset.metadata.comments.len();
    let uploaded = asset.metadata.created_at.format("%b %-d, %Y").to_string();

    rsx! {
        div { class: "flex flex-col",
            div { class: "bg-black flex items-center justify-center min-h-[320px]",
                match asset.src.clone() {
                    Some(src) => rsx! {
                        img {
                            class: "max-h-[75vh] w-auto object-contain",
                            src: "{src}",
                            alt: "{asset.metadata.key}",
                        }
                    },
                    None => rsx! {
                        Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-500".to_string() }
                    },
                }
            }
            div { class: "flex items-center justify-between gap-4 px-5 py-4 border-t border-zinc-800",
                div { class: "flex items-center gap-2",
                    for item in reactions.items.iter().filter(|item| item.total > 0) {
                        span { class: "text-sm text-zinc-300", "{item.kind.emoji()} {item.total}" }
                    }
                }
                div { class: "flex items-center gap-4 text-xs text-zinc-500",
                    span { "{comment_count} comments" }
                    span { "{uploaded}" }
                }
            }
        }
    }
}
