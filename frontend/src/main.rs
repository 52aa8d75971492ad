use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod flow;
mod models;
mod state;
mod utils {
    pub mod api;
    pub mod media;
}
mod components {
    pub mod background;
    pub mod booking_modal;
    pub mod flight_card;
    pub mod hero;
    pub mod in_view;
    pub mod intro;
}
mod pages {
    pub mod home;
    pub mod not_found;
}

use pages::home::Home;
use pages::not_found::NotFound;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("JetLegs starting against {}", config::get_backend_url());
    yew::Renderer::<App>::new().render();
}
