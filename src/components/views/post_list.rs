use crate::api::{AlbumClient, Post};
use crate::components::{
    use_asset_dialog, use_loading_contribution, AssetDialog, AssetDialogHandle, Icon,
    PostPageQueryParams, RouteQueryParams,
};
use crate::config::AppConfig;
use dioxus::prelude::*;

#[component]
pub fn AlbumPosts(page: u32, category: String, asset: String) -> Element {
    let params = PostPageQueryParams::new(page, category, asset);
    let config = use_context::<AppConfig>();
    let page_size = config.page_size.max(1);
    let dialog = use_asset_dialog(params.clone());

    let posts = use_resource(use_reactive(
        (&params.page, &params.category),
        move |(page, category)| {
            let client = AlbumClient::new(&config);
            async move { client.fetch_posts(page, &category).await }
        },
    ));
    use_loading_contribution(posts().is_none());

    let total_pages = match posts() {
        Some(Ok(result)) => result.total.div_ceil(page_size).max(1),
        _ => 1,
    };

    rsx! {
        div { class: "flex flex-col items-center gap-6 pb-10",
            match posts() {
                None => rsx! {
                    for _ in 0..3 {
                        div { class: "w-full max-w-2xl h-72 rounded-2xl bg-zinc-900 animate-pulse" }
                    }
                },
                Some(Err(err)) => rsx! {
                    p { class: "text-zinc-400 py-16", "{err.user_message()}" }
                },
                Some(Ok(result)) if result.posts.is_empty() => rsx! {
                    p { class: "text-zinc-500 py-16", "No posts yet." }
                },
                Some(Ok(result)) => rsx! {
                    for post in result.posts {
                        PostCard { key: "{post.id}", post: post.clone(), dialog: dialog.clone() }
                    }
                },
            }

            Pagination {
                store: RouteQueryParams::new(params.clone()),
                total_pages,
            }
        }

        AssetDialog { dialog: dialog.clone() }
    }
}

#[component]
fn PostCard(post: Post, dialog: AssetDialogHandle) -> Element {
    let categories = post
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect::<Vec<_>>()
        .join(" · ");
    let reaction_total = post.reaction.total();
    let comment_count = post.comments.len();

    rsx! {
        article { class: "w-full max-w-2xl rounded-2xl border border-zinc-800 bg-zinc-900/60 overflow-hidden",
            if !categories.is_empty() {
                p { class: "px-5 pt-4 text-xs uppercase tracking-[0.2em] text-zinc-500", "{categories}" }
            }
            div { class: "grid grid-cols-3 gap-1 p-4",
                for asset in post.assets.iter().cloned() {
                    button {
                        key: "{asset.id}",
                        class: "aspect-square rounded-lg bg-zinc-800 hover:ring-2 hover:ring-amber-400 transition",
                        aria_label: "Open {asset.key}",
                        onclick: {
                            let dialog = dialog.clone();
                            let asset_id = asset.id.clone();
                            move |_| dialog.open(&asset_id)
                        },
                        Icon { name: "image".to_string(), class: "w-6 h-6 mx-auto text-zinc-500".to_string() }
                    }
                }
            }
            div { class: "flex items-center gap-4 px-5 pb-4 text-xs text-zinc-500",
                span { "{reaction_total} reactions" }
                span { "{comment_count} comments" }
            }
        }
    }
}

#[component]
fn Pagination(store: RouteQueryParams, total_pages: u32) -> Element {
    let page = store.params().page;
    if total_pages <= 1 {
        return rsx! {};
    }

    rsx! {
        nav { class: "flex items-center gap-3 text-sm text-zinc-400",
            button {
                class: "p-2 rounded-lg hover:bg-zinc-800 disabled:opacity-40",
                disabled: page <= 1,
                onclick: {
                    let mut store = store.clone();
                    move |_| store.go_to_page(page.saturating_sub(1))
                },
                Icon { name: "prev".to_string(), class: "w-4 h-4".to_string() }
            }
            span { "{page} / {total_pages}" }
            button {
                class: "p-2 rounded-lg hover:bg-zinc-800 disabled:opacity-40",
                disabled: page >= total_pages,
                onclick: {
                    let mut store = store.clone();
                    move |_| store.go_to_page(page + 1)
                },
                Icon { name: "next".to_string(), class: "w-4 h-4".to_string() }
            }
        }
    }
}
