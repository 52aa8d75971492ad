use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::SearchCriteria;

/// Element id the intro scrolls to when it hands over.
pub const SEARCH_ANCHOR: &str = "search";

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_search: Callback<SearchCriteria>,
    #[prop_or_default]
    pub loading: bool,
}

#[function_component]
pub fn Hero(props: &HeroProps) -> Html {
    let origin = use_state(String::new);
    let destination = use_state(String::new);
    let date = use_state(String::new);

    let onsubmit = {
        let origin = origin.clone();
        let destination = destination.clone();
        let date = date.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_search.emit(SearchCriteria::from_form(&origin, &destination, &date));
        })
    };

    let airport_input = |field: &UseStateHandle<String>| {
        let field = field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            field.set(input.value().to_uppercase());
        })
    };

    let on_date = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let input_class = "px-4 py-3 rounded-xl bg-slate-900/60 border border-slate-700 text-white placeholder:text-slate-400 focus:outline-none focus:ring-2 focus:ring-blue-500";

    html! {
        <div class="pt-16 pb-10">
            <h1 class="text-4xl md:text-6xl font-bold text-white text-center tracking-tight">
                {"Find Empty Leg Flights"}
            </h1>
            <p class="text-blue-200/80 text-center mt-3 max-w-2xl mx-auto">
                {"Save up to 75% on private jet travel by booking repositioning flights."}
            </p>

            <form
                id={SEARCH_ANCHOR}
                onsubmit={onsubmit}
                class="mt-8 bg-slate-800/60 border border-blue-500/20 rounded-2xl p-4 md:p-6 backdrop-blur"
            >
                <div class="grid grid-cols-1 md:grid-cols-4 gap-3">
                    <input
                        class={input_class}
                        placeholder="Origin (IATA)"
                        maxlength="4"
                        value={(*origin).clone()}
                        oninput={airport_input(&origin)}
                    />
                    <input
                        class={input_class}
                        placeholder="Destination (IATA)"
                        maxlength="4"
                        value={(*destination).clone()}
                        oninput={airport_input(&destination)}
                    />
                    <input
                        type="date"
                        class={input_class}
                        value={(*date).clone()}
                        onchange={on_date}
                    />
                    <button
                        type="submit"
                        disabled={props.loading}
                        class="inline-flex items-center justify-center gap-2 px-4 py-3 rounded-xl bg-blue-600 hover:bg-blue-500 disabled:opacity-60 text-white font-semibold transition-colors"
                    >
                        <i class="fas fa-magnifying-glass"></i>
                        {"Search"}
                    </button>
                </div>
            </form>
        </div>
    }
}
