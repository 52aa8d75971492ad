use yew::prelude::*;
use yew_router::components::Link;

use crate::Route;

#[function_component]
pub fn NotFound() -> Html {
    html! {
        <div class="min-h-screen flex flex-col items-center justify-center gap-4 text-white bg-slate-950">
            <h1 class="text-3xl font-bold">{"No runway here"}</h1>
            <p class="text-slate-400">{"The page you were looking for does not exist."}</p>
            <Link<Route> to={Route::Home} classes="px-4 py-2 rounded-xl bg-blue-600 hover:bg-blue-500">
                {"Back to flights"}
            </Link<Route>>
        </div>
    }
}
