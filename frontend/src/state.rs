use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

use crate::models::Flight;

pub const NO_RESULTS_MESSAGE: &str = "No flights match your filters. Try different airports or dates.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load flights";
pub const BOOKING_FAILED_MESSAGE: &str = "Booking failed";
pub const BOOKING_CONFIRMED_MESSAGE: &str = "Booking submitted! We will contact you to confirm details.";

/// Everything the page renders from: results, status line and the open booking.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FlightBoard {
    pub flights: Vec<Flight>,
    /// Search failure, shown on the page.
    pub error: Option<String>,
    pub message: Option<String>,
    pub selected: Option<Flight>,
    /// Rejection of the open booking, shown only inside the modal.
    pub booking_error: Option<String>,
    /// Requests in flight. Loading is shown while this is non-zero.
    pending: u32,
    /// Generation of the most recently issued search.
    latest_search: u64,
}

#[derive(Clone, PartialEq, Debug)]
pub enum BoardAction {
    SearchStarted { generation: u64 },
    SearchLoaded { generation: u64, flights: Vec<Flight> },
    SearchFailed { generation: u64 },
    Select(Flight),
    CloseBooking,
    BookingStarted,
    BookingFailed(String),
    BookingConfirmed,
}

impl FlightBoard {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    fn is_current(&self, generation: u64) -> bool {
        generation >= self.latest_search
    }

    fn finish_request(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::SearchStarted { generation } => {
                self.pending += 1;
                self.latest_search = self.latest_search.max(generation);
                self.error = None;
                self.message = None;
            }
            BoardAction::SearchLoaded { generation, flights } => {
                self.finish_request();
                if !self.is_current(generation) {
                    log::info!("Discarding results of superseded search #{}", generation);
                    return;
                }
                self.message = flights.is_empty().then(|| NO_RESULTS_MESSAGE.to_string());
                self.flights = flights;
            }
            BoardAction::SearchFailed { generation } => {
                self.finish_request();
                if self.is_current(generation) {
                    self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                }
            }
            BoardAction::Select(flight) => {
                self.selected = Some(flight);
                self.booking_error = None;
            }
            BoardAction::CloseBooking => {
                self.selected = None;
                self.booking_error = None;
            }
            BoardAction::BookingStarted => {
                self.pending += 1;
                self.booking_error = None;
            }
            BoardAction::BookingFailed(message) => {
                self.finish_request();
                self.booking_error = Some(message);
            }
            BoardAction::BookingConfirmed => {
                self.finish_request();
                self.selected = None;
                self.booking_error = None;
                self.message = Some(BOOKING_CONFIRMED_MESSAGE.to_string());
            }
        }
    }
}

impl Reducible for FlightBoard {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

/// Hands out increasing generation numbers so the newest search wins
/// regardless of the order responses arrive in.
#[derive(Debug, Default)]
pub struct RequestSequence {
    last: Cell<u64>,
}

impl RequestSequence {
    pub fn issue(&self) -> u64 {
        let next = self.last.get() + 1;
        self.last.set(next);
        next
    }
}

/// Revoked when the owning component unmounts; async work checks it before
/// touching state.
#[derive(Clone, Debug)]
pub struct Lifetime(Rc<Cell<bool>>);

impl Lifetime {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn revoke(&self) {
        self.0.set(false);
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

/// Where async flows deliver their state changes.
pub trait BoardSink {
    fn dispatch(&self, action: BoardAction);
}

impl BoardSink for UseReducerDispatcher<FlightBoard> {
    fn dispatch(&self, action: BoardAction) {
        UseReducerDispatcher::dispatch(self, action);
    }
}

/// Forwards actions only while its lifetime is alive.
pub struct ScopedSink<S> {
    inner: S,
    lifetime: Lifetime,
}

impl<S: BoardSink> ScopedSink<S> {
    pub fn new(inner: S, lifetime: Lifetime) -> Self {
        Self { inner, lifetime }
    }
}

impl<S: BoardSink> BoardSink for ScopedSink<S> {
    fn dispatch(&self, action: BoardAction) {
        if self.lifetime.is_alive() {
            self.inner.dispatch(action);
        } else {
            log::debug!("Dropping {:?} after unmount", action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::flight;
    use std::cell::RefCell;

    #[test]
    fn loading_spans_the_request() {
        let mut board = FlightBoard::default();
        board.apply(BoardAction::SearchStarted { generation: 1 });
        assert!(board.is_loading());
        board.apply(BoardAction::SearchLoaded { generation: 1, flights: vec![flight(1, 4)] });
        assert!(!board.is_loading());
        assert_eq!(board.flights.len(), 1);
        assert_eq!(board.message, None);
    }

    #[test]
    fn starting_a_search_clears_messages() {
        let mut board = FlightBoard {
            error: Some("old".to_string()),
            message: Some("older".to_string()),
            ..Default::default()
        };
        board.apply(BoardAction::SearchStarted { generation: 1 });
        assert_eq!(board.error, None);
        assert_eq!(board.message, None);
    }

    #[test]
    fn empty_results_set_info_message() {
        let mut board = FlightBoard {
            flights: vec![flight(1, 4)],
            ..Default::default()
        };
        board.apply(BoardAction::SearchStarted { generation: 1 });
        board.apply(BoardAction::SearchLoaded { generation: 1, flights: vec![] });
        assert!(board.flights.is_empty());
        assert_eq!(board.message.as_deref(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut board = FlightBoard {
            flights: vec![flight(1, 4), flight(2, 2)],
            ..Default::default()
        };
        board.apply(BoardAction::SearchStarted { generation: 3 });
        board.apply(BoardAction::SearchFailed { generation: 3 });
        assert_eq!(board.flights.len(), 2);
        assert_eq!(board.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!board.is_loading());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut board = FlightBoard::default();
        board.apply(BoardAction::SearchStarted { generation: 1 });
        board.apply(BoardAction::SearchStarted { generation: 2 });
        board.apply(BoardAction::SearchLoaded { generation: 2, flights: vec![flight(2, 1)] });
        assert!(board.is_loading());
        board.apply(BoardAction::SearchLoaded { generation: 1, flights: vec![flight(1, 1)] });
        assert!(!board.is_loading());
        assert_eq!(board.flights, vec![flight(2, 1)]);

        board.apply(BoardAction::SearchStarted { generation: 4 });
        board.apply(BoardAction::SearchStarted { generation: 5 });
        board.apply(BoardAction::SearchFailed { generation: 4 });
        assert_eq!(board.error, None);
    }

    #[test]
    fn booking_failure_keeps_modal_open() {
        let mut board = FlightBoard::default();
        board.apply(BoardAction::Select(flight(9, 2)));
        board.apply(BoardAction::BookingStarted);
        assert!(board.is_loading());
        board.apply(BoardAction::BookingFailed("Flight full".to_string()));
        assert_eq!(board.selected, Some(flight(9, 2)));
        assert_eq!(board.booking_error.as_deref(), Some("Flight full"));
        assert_eq!(board.error, None);
        assert!(!board.is_loading());

        board.apply(BoardAction::BookingStarted);
        assert_eq!(board.booking_error, None);
    }

    #[test]
    fn search_failure_stays_out_of_the_booking_modal() {
        let mut board = FlightBoard::default();
        board.apply(BoardAction::SearchStarted { generation: 1 });
        board.apply(BoardAction::SearchFailed { generation: 1 });
        board.apply(BoardAction::Select(flight(3, 2)));
        assert_eq!(board.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(board.booking_error, None);
    }

    #[test]
    fn reopening_the_modal_clears_the_last_rejection() {
        let mut board = FlightBoard::default();
        board.apply(BoardAction::Select(flight(3, 2)));
        board.apply(BoardAction::BookingStarted);
        board.apply(BoardAction::BookingFailed("Flight full".to_string()));
        board.apply(BoardAction::CloseBooking);
        board.apply(BoardAction::Select(flight(4, 6)));
        assert_eq!(board.booking_error, None);
    }

    #[test]
    fn confirmation_closes_modal() {
        let mut board = FlightBoard::default();
        board.apply(BoardAction::Select(flight(9, 2)));
        board.apply(BoardAction::BookingStarted);
        board.apply(BoardAction::BookingConfirmed);
        assert_eq!(board.selected, None);
        assert_eq!(board.message.as_deref(), Some(BOOKING_CONFIRMED_MESSAGE));
    }

    #[test]
    fn sequence_is_monotonic() {
        let seq = RequestSequence::default();
        assert_eq!(seq.issue(), 1);
        assert_eq!(seq.issue(), 2);
        assert_eq!(seq.issue(), 3);
    }

    struct Recorder(RefCell<Vec<BoardAction>>);

    impl BoardSink for &Recorder {
        fn dispatch(&self, action: BoardAction) {
            self.0.borrow_mut().push(action);
        }
    }

    #[test]
    fn scoped_sink_drops_actions_after_revoke() {
        let recorder = Recorder(RefCell::new(Vec::new()));
        let lifetime = Lifetime::new();
        let sink = ScopedSink::new(&recorder, lifetime.clone());
        sink.dispatch(BoardAction::CloseBooking);
        lifetime.revoke();
        sink.dispatch(BoardAction::BookingConfirmed);
        assert_eq!(*recorder.0.borrow(), vec![BoardAction::CloseBooking]);
    }
}
