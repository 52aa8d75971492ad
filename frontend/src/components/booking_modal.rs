use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::models::{BookingForm, BookingFormError, BookingRequest, Flight};

#[derive(Properties, PartialEq)]
pub struct BookingModalProps {
    pub flight: Flight,
    pub on_close: Callback<()>,
    pub on_confirm: Callback<BookingRequest>,
    #[prop_or_default]
    pub submitting: bool,
    /// Last booking error from the backend, shown inside the modal.
    #[prop_or_default]
    pub error: Option<String>,
}

fn bind_input(form: &UseStateHandle<BookingForm>, update: fn(&mut BookingForm, String)) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        update(&mut next, input.value());
        form.set(next);
    })
}

#[function_component]
pub fn BookingModal(props: &BookingModalProps) -> Html {
    let form = use_state(BookingForm::default);
    let invalid = use_state(|| None::<BookingFormError>);
    let flight = &props.flight;

    let onsubmit = {
        let form = form.clone();
        let invalid = invalid.clone();
        let flight = flight.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.validate(&flight) {
                Ok(request) => {
                    invalid.set(None);
                    on_confirm.emit(request);
                }
                Err(err) => invalid.set(Some(err)),
            }
        })
    };

    let on_notes = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.notes = area.value();
            form.set(next);
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let field_class = "px-4 py-3 rounded-xl bg-slate-800 border border-slate-700 text-white";
    let shown_error = (*invalid)
        .as_ref()
        .map(|err| err.to_string())
        .or_else(|| props.error.clone());

    html! {
        <div class="fixed inset-0 bg-black/60 backdrop-blur-sm flex items-center justify-center p-4 z-50">
            <div class="bg-slate-900 border border-slate-700 rounded-2xl w-full max-w-lg">
                <div class="p-5 border-b border-slate-800 flex items-center justify-between">
                    <div class="text-white font-semibold">{format!("Book flight {}", flight.route())}</div>
                    <button onclick={close} class="text-slate-400 hover:text-white" aria-label="Close">{"✕"}</button>
                </div>
                <form onsubmit={onsubmit} class="p-5 grid gap-3">
                    <input
                        class={field_class}
                        placeholder="Full name"
                        value={form.name.clone()}
                        oninput={bind_input(&form, |f, v| f.name = v)}
                        required=true
                    />
                    <input
                        type="email"
                        class={field_class}
                        placeholder="Email"
                        value={form.email.clone()}
                        oninput={bind_input(&form, |f, v| f.email = v)}
                        required=true
                    />
                    <input
                        type="tel"
                        class={field_class}
                        placeholder="Phone"
                        value={form.phone.clone()}
                        oninput={bind_input(&form, |f, v| f.phone = v)}
                    />
                    <input
                        type="number"
                        min="1"
                        max={flight.seats_available.to_string()}
                        class={field_class}
                        placeholder="Passengers"
                        value={form.passengers.clone()}
                        oninput={bind_input(&form, |f, v| f.passengers = v)}
                        required=true
                    />
                    <textarea
                        class={field_class}
                        placeholder="Notes (optional)"
                        value={form.notes.clone()}
                        oninput={on_notes}
                    />
                    if let Some(message) = shown_error {
                        <div class="text-red-400 text-sm">{message}</div>
                    }
                    <button
                        type="submit"
                        disabled={props.submitting}
                        class="mt-2 px-4 py-3 rounded-xl bg-blue-600 hover:bg-blue-500 disabled:opacity-60 text-white font-semibold"
                    >
                        { if props.submitting { "Submitting..." } else { "Confirm booking" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
