use dioxus::prelude::*;
use mural_shared::models::PhotoRecord;

/// Card list rendering of the feed. Renders every record, geotagged or
/// not — only the map filters on coordinates.
#[component]
pub fn PhotoList(photos: Vec<PhotoRecord>) -> Element {
    rsx! {
        div { class: "photo-list",
            for photo in photos {
                PhotoCard { photo }
            }
        }
    }
}

#[component]
fn PhotoCard(photo: PhotoRecord) -> Element {
    rsx! {
        div { class: "photo-card",
            if let Some(url) = &photo.image_url {
                img {
                    class: "photo-image",
                    src: "{url}",
                    alt: "Foto postada",
                    loading: "lazy",
                }
            } else {
                div { class: "photo-image photo-image-missing", "Imagem não disponível" }
            }
            div { class: "photo-info",
                p { class: "coordinates",
                    if let Some((lat, lon)) = photo.position() {
                        "Lat: {lat}, Long: {lon}"
                    } else {
                        "Sem coordenadas"
                    }
                }
                if let Some(date) = photo.created_date_pt() {
                    p { class: "date", "{date}" }
                }
                if let Some(time) = photo.created_time_pt() {
                    p { class: "time", "{time}" }
                }
            }
        }
    }
}
