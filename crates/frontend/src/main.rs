mod api;
mod camera;
mod components;
mod coords;
mod geoloc;
mod pages;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/feed")]
    Feed {},
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::mural::Mural {}
    }
}

#[component]
fn Feed() -> Element {
    rsx! {
        pages::feed::FeedPage {}
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
