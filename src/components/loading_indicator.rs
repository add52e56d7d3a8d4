use crate::asset_dialog::{ContributorId, LoadingSink};
use dioxus::prelude::*;
use std::collections::HashSet;

/// Page-wide loading flag: the set of contributors that are currently loading.
#[derive(Clone, Copy, PartialEq)]
pub struct GlobalLoadingSignal(pub Signal<HashSet<ContributorId>>);

impl GlobalLoadingSignal {
    pub fn is_loading(&self) -> bool {
        !self.0.read().is_empty()
    }
}

impl LoadingSink for GlobalLoadingSignal {
    fn set_contribution(&mut self, contributor: ContributorId, active: bool) {
        match self.0.try_write() {
            Ok(mut set) => {
                if active {
                    set.insert(contributor);
                } else {
                    set.remove(&contributor);
                }
            }
            Err(err) => {
                tracing::warn!(?contributor, active, "loading flag not updated: {err}");
            }
        }
    }

    // Drop of a coordinator or of the calling scope can run after the shell
    // that owns the set has gone; nothing is left to clear then.
    fn release(&mut self, contributor: ContributorId) {
        if let Ok(mut set) = self.0.try_write() {
            set.remove(&contributor);
        }
    }
}

/// Hold a share of the global flag while `pending` is true. The share is
/// released when the calling component unmounts.
pub fn use_loading_contribution(pending: bool) {
    let loading = use_context::<GlobalLoadingSignal>();
    let contributor = use_hook(ContributorId::new);

    use_effect(use_reactive((&pending,), move |(pending,)| {
        let mut loading = loading;
        loading.set_contribution(contributor, pending);
    }));

    use_drop(move || {
        let mut loading = loading;
        loading.release(contributor);
    });
}

#[component]
pub fn GlobalLoadingBar() -> Element {
    let loading = use_context::<GlobalLoadingSignal>();

    if !loading.is_loading() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed top-0 inset-x-0 z-[90] h-0.5 overflow-hidden bg-amber-500/20",
            role: "progressbar",
            aria_label: "Loading",
            div { class: "h-full w-1/3 bg-amber-400 animate-pulse" }
        }
    }
}
