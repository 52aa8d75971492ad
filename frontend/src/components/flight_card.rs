use yew::prelude::*;

use crate::components::in_view::{use_in_view, InViewOptions};
use crate::models::{format_price, format_timestamp, Flight};

#[derive(Properties, PartialEq)]
pub struct FlightCardProps {
    pub flight: Flight,
    pub on_book: Callback<Flight>,
}

#[function_component]
pub fn FlightCard(props: &FlightCardProps) -> Html {
    let (node, in_view) = use_in_view(InViewOptions {
        threshold: 0.12,
        root_margin: "0px 0px -8% 0px",
    });
    let flight = &props.flight;

    let onclick = {
        let flight = flight.clone();
        let on_book = props.on_book.clone();
        Callback::from(move |_: MouseEvent| on_book.emit(flight.clone()))
    };

    html! {
        <div
            ref={node}
            class={classes!(
                "bg-slate-800/60", "border", "border-slate-700", "rounded-2xl", "p-5",
                "flex", "flex-col", "gap-3", "transition-all", "duration-700", "ease-out", "will-change-transform",
                if in_view { "opacity-100 translate-y-0" } else { "opacity-0 translate-y-6" }
            )}
        >
            <div class="flex items-center justify-between">
                <div>
                    <div class="text-white font-bold text-lg">{flight.route()}</div>
                    <div class="text-slate-300 text-sm">{flight.city_line()}</div>
                </div>
                <div class="text-right">
                    <div class="text-white font-semibold text-xl">{format_price(flight.price)}</div>
                    <div class="text-slate-400 text-xs">{&flight.aircraft_type}</div>
                </div>
            </div>
            <div class="grid grid-cols-2 gap-3 text-sm text-slate-300">
                <div>
                    <div class="text-slate-400">{"Departure"}</div>
                    <div>{format_timestamp(&flight.departure_time)}</div>
                </div>
                <div>
                    <div class="text-slate-400">{"Arrival"}</div>
                    <div>{format_timestamp(&flight.arrival_time)}</div>
                </div>
                <div>
                    <div class="text-slate-400">{"Seats left"}</div>
                    <div>{flight.seats_available}</div>
                </div>
            </div>
            <div class="flex gap-3">
                <button
                    onclick={onclick}
                    disabled={flight.is_sold_out()}
                    class="px-4 py-2 rounded-xl bg-blue-600 hover:bg-blue-500 disabled:bg-slate-600 text-white font-semibold transition-colors"
                >
                    { if flight.is_sold_out() { "Sold out" } else { "Book this leg" } }
                </button>
            </div>
        </div>
    }
}
