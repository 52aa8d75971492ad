use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{window, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::components::background::LiveBackground;
use crate::components::booking_modal::BookingModal;
use crate::components::flight_card::FlightCard;
use crate::components::hero::{Hero, SEARCH_ANCHOR};
use crate::components::intro::IntroOverlay;
use crate::flow;
use crate::models::{BookingRequest, Flight, SearchCriteria};
use crate::state::{BoardAction, FlightBoard, Lifetime, RequestSequence, ScopedSink};
use crate::utils::api::HttpFlightApi;

const AMBIENT_VIDEO: &str = "https://videos.pexels.com/video-files/2169880/2169880-uhd_2560_1440_30fps.mp4";

fn scroll_to_search() {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(SEARCH_ANCHOR))
    else {
        return;
    };
    let mut options = ScrollIntoViewOptions::new();
    options.behavior(ScrollBehavior::Smooth).block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component]
pub fn Home() -> Html {
    let board = use_reducer(FlightBoard::default);
    let sequence = use_state(|| Rc::new(RequestSequence::default()));
    let lifetime = use_state(Lifetime::new);
    let revealed = use_state(|| false);

    // Anything still in flight when the page goes away must not touch it.
    {
        let lifetime = (*lifetime).clone();
        use_effect_with_deps(move |_| move || lifetime.revoke(), ());
    }

    let run_search = {
        let dispatcher = board.dispatcher();
        let sequence = (*sequence).clone();
        let lifetime = (*lifetime).clone();
        Callback::from(move |criteria: SearchCriteria| {
            let sink = ScopedSink::new(dispatcher.clone(), lifetime.clone());
            let sequence = sequence.clone();
            spawn_local(async move {
                flow::search(&HttpFlightApi, &sink, &sequence, criteria).await;
            });
        })
    };

    {
        let run_search = run_search.clone();
        use_effect_with_deps(
            move |_| {
                run_search.emit(SearchCriteria::default());
                || ()
            },
            (),
        );
    }

    let on_book = {
        let dispatcher = board.dispatcher();
        Callback::from(move |flight: Flight| dispatcher.dispatch(BoardAction::Select(flight)))
    };

    let on_close = {
        let dispatcher = board.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BoardAction::CloseBooking))
    };

    let on_confirm = {
        let dispatcher = board.dispatcher();
        let sequence = (*sequence).clone();
        let lifetime = (*lifetime).clone();
        Callback::from(move |request: BookingRequest| {
            let sink = ScopedSink::new(dispatcher.clone(), lifetime.clone());
            let sequence = sequence.clone();
            spawn_local(async move {
                flow::confirm_booking(&HttpFlightApi, &sink, &sequence, request).await;
            });
        })
    };

    let on_intro_finish = {
        let revealed = revealed.clone();
        Callback::from(move |_: ()| {
            revealed.set(true);
            scroll_to_search();
        })
    };

    html! {
        <>
            <LiveBackground video_src={AMBIENT_VIDEO} />
            if !*revealed {
                <IntroOverlay on_finish={on_intro_finish} />
            }
            <div class={classes!(
                "relative", "min-h-screen", "transition-opacity", "duration-700",
                if *revealed { "opacity-100" } else { "opacity-0" }
            )}>
                <div class="relative max-w-6xl mx-auto px-4">
                    <Hero on_search={run_search} loading={board.is_loading()} />

                    if board.is_loading() {
                        <div class="text-center text-slate-300">{"Loading..."}</div>
                    }
                    if let Some(error) = board.error.clone() {
                        <div class="text-center text-red-400">{error}</div>
                    }
                    if let Some(message) = board.message.clone() {
                        <div class="text-center text-slate-300">{message}</div>
                    }

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-5 mt-6 pb-16">
                        { for board.flights.iter().map(|flight| html! {
                            <FlightCard
                                key={flight.id.to_string()}
                                flight={flight.clone()}
                                on_book={on_book.clone()}
                            />
                        }) }
                    </div>
                </div>
            </div>
            if let Some(flight) = board.selected.clone() {
                <BookingModal
                    flight={flight}
                    on_close={on_close}
                    on_confirm={on_confirm}
                    submitting={board.is_loading()}
                    error={board.booking_error.clone()}
                />
            }
        </>
    }
}
