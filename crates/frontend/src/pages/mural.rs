use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use mural_shared::compose::{GeoFix, PendingCapture};
use mural_shared::feed::FeedPhase;
use mural_shared::worldmap;

use crate::api;
use crate::components::capture_panel::CapturePanel;
use crate::components::map_view::MapView;
use crate::components::status_banner::Status;
use crate::geoloc;

/// Which panel the user is on. Initial state: viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Viewing,
    Posting,
}

/// Feed reload scheduled this long after a successful post. No
/// confirmation that the new item appears — just a refresh.
const POST_RELOAD_DELAY_MS: u32 = 1_500;

/// Layout settle time before the map fixup when re-entering the viewer.
const PANE_SETTLE_DELAY_MS: u32 = 100;

/// Kick off a feed load. The response lands whenever it lands — there is
/// no cancellation on pane switches.
fn load_feed(mut feed: Signal<FeedPhase>) {
    spawn(async move {
        feed.set(FeedPhase::Loading);
        let phase = FeedPhase::classify(api::fetch_photos().await);
        if let FeedPhase::Failed(err) = &phase {
            web_sys::console::error_1(&format!("Erro ao carregar fotos: {err}").into());
        }
        feed.set(phase);
    });
}

#[component]
pub fn Mural() -> Element {
    let mut pane = use_signal(|| Pane::Viewing);
    let feed = use_signal(|| FeedPhase::Loading);
    let mut pending_capture = use_signal(|| None::<PendingCapture>);
    let geo_fix = use_signal(|| None::<GeoFix>);
    let mut status = use_signal(|| None::<Status>);
    let selected_photo = use_signal(|| None::<u64>);
    let mut center_target = use_signal(|| None::<(f64, f64)>);
    let mut resize_counter = use_signal(|| 0u64);

    use_effect(move || {
        load_feed(feed);
    });

    let mut switch_pane = move |next: Pane| {
        if *pane.peek() == next {
            return;
        }
        pane.set(next);
        if next == Pane::Viewing {
            // Camera teardown happens when the posting panel unmounts;
            // give the layout a moment before fixing up the map.
            spawn(async move {
                TimeoutFuture::new(PANE_SETTLE_DELAY_MS).await;
                let bumped = *resize_counter.peek() + 1;
                resize_counter.set(bumped);
                load_feed(feed);
            });
        }
    };

    let on_post = move |_| {
        let Some(capture) = pending_capture.peek().clone() else {
            return;
        };
        let Some(fix) = *geo_fix.peek() else { return };
        status.set(Some(Status::info("Enviando foto...")));
        spawn(async move {
            match api::post_photo(capture.image, &fix).await {
                Ok(()) => {
                    // The fix is kept so the next post can reuse it
                    pending_capture.set(None);
                    status.set(Some(Status::success("Foto enviada com sucesso!")));
                    TimeoutFuture::new(POST_RELOAD_DELAY_MS).await;
                    // Reload only if the user is on the viewer when the timer fires
                    if *pane.peek() == Pane::Viewing {
                        load_feed(feed);
                    }
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("Erro ao postar foto: {err}").into());
                    status.set(Some(Status::error("Erro ao enviar foto. Tente novamente.")));
                }
            }
        });
    };

    let on_center = move |_| {
        spawn(async move {
            // Center on the user when possible, São Paulo otherwise
            let target = match geoloc::acquire_fix().await {
                Ok(fix) => (fix.latitude, fix.longitude),
                Err(_) => worldmap::DEFAULT_CENTER,
            };
            center_target.set(Some(target));
        });
    };

    let cur_pane = *pane.read();
    let viewer_class = if cur_pane == Pane::Viewing {
        "content active"
    } else {
        "content"
    };

    let viewer_body = match &*feed.read() {
        FeedPhase::Loading => rsx! {
            div { class: "loading", "Carregando fotos..." }
        },
        FeedPhase::Empty => rsx! {
            div { class: "empty-state", "Nenhuma foto encontrada. Seja o primeiro a postar!" }
        },
        FeedPhase::Failed(err) => rsx! {
            div { class: "error-banner",
                p { "Erro ao carregar as fotos: {err}" }
                button { onclick: move |_| load_feed(feed), "Tentar novamente" }
            }
        },
        FeedPhase::Ready(photos) => rsx! {
            MapView {
                photos: photos.clone(),
                selected: selected_photo,
                center_target,
                resize_counter,
            }
        },
    };

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Mural de Fotos" }
                div { class: "tabs",
                    button {
                        class: if cur_pane == Pane::Viewing { "tab active" } else { "tab" },
                        onclick: move |_| switch_pane(Pane::Viewing),
                        "Visualizar"
                    }
                    button {
                        class: if cur_pane == Pane::Posting { "tab active" } else { "tab" },
                        onclick: move |_| switch_pane(Pane::Posting),
                        "Postar"
                    }
                }
                Link { class: "list-link", to: crate::Route::Feed {}, "Ver em lista" }
            }

            div { class: viewer_class,
                div { class: "viewer-controls",
                    button { onclick: move |_| load_feed(feed), "Atualizar" }
                    button { class: "secondary", onclick: on_center, "Centralizar no meu local" }
                }
                {viewer_body}
            }

            if cur_pane == Pane::Posting {
                div { class: "content active",
                    CapturePanel {
                        pending_capture,
                        geo_fix,
                        status,
                        on_post,
                    }
                }
            }
        }
    }
}
