use dioxus::prelude::*;

use crate::api;
use crate::components::photo_list::PhotoList;

/// Plain list rendering of the feed. Unlike the map, this renders every
/// record, with or without coordinates.
#[component]
pub fn FeedPage() -> Element {
    let mut photos = use_resource(|| api::fetch_photos());

    let body = match &*photos.read() {
        None => rsx! {
            div { class: "center-box",
                p { class: "loading-text", "Carregando fotos..." }
            }
        },
        Some(Err(err)) => rsx! {
            div { class: "center-box",
                p { class: "error-text", "Erro: {err}" }
                button {
                    class: "retry-link",
                    onclick: move |_| photos.restart(),
                    "Toque para tentar novamente"
                }
            }
        },
        Some(Ok(records)) if records.is_empty() => rsx! {
            FeedHeader { count: 0 }
            div { class: "center-box",
                p { class: "empty-text", "Nenhuma foto encontrada" }
            }
        },
        Some(Ok(records)) => rsx! {
            FeedHeader { count: records.len() }
            PhotoList { photos: records.clone() }
            div { class: "refresh-row",
                button { onclick: move |_| photos.restart(), "Atualizar" }
            }
        },
    };

    rsx! {
        div { class: "feed-page", {body} }
    }
}

#[component]
fn FeedHeader(count: usize) -> Element {
    let plural = if count == 1 { "" } else { "s" };
    rsx! {
        div { class: "feed-header",
            h1 { "Mural de Fotos" }
            p { class: "subtitle", "{count} foto{plural} encontrada{plural}" }
            Link { class: "map-link", to: crate::Route::Home {}, "Ver no mapa" }
        }
    }
}
