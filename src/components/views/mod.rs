//! Routed page views.

mod post_list;

pub use post_list::AlbumPosts;
