//! The two user-driven operations: searching the board and confirming a booking.
//! Both report progress through a [`BoardSink`] so the page can scope them to
//! its own lifetime.

use crate::models::{BookingRequest, SearchCriteria};
use crate::state::{BoardAction, BoardSink, RequestSequence, BOOKING_FAILED_MESSAGE};
use crate::utils::api::FlightApi;

/// Fetches flights matching `criteria` and replaces the result set.
pub async fn search<A, S>(api: &A, sink: &S, sequence: &RequestSequence, criteria: SearchCriteria)
where
    A: FlightApi,
    S: BoardSink,
{
    let generation = sequence.issue();
    if criteria.is_unfiltered() {
        log::info!("Search #{}: all flights", generation);
    } else {
        log::info!("Search #{}: {}", generation, criteria.to_query_string());
    }
    sink.dispatch(BoardAction::SearchStarted { generation });

    match api.list_flights(&criteria).await {
        Ok(flights) => {
            log::info!("Search #{} returned {} flight(s)", generation, flights.len());
            sink.dispatch(BoardAction::SearchLoaded { generation, flights });
        }
        Err(e) => {
            log::error!("Search #{} failed: {}", generation, e);
            sink.dispatch(BoardAction::SearchFailed { generation });
        }
    }
}

/// Submits a booking. On success the unfiltered list is re-fetched so seat
/// counts are current, then the modal closes with a confirmation.
pub async fn confirm_booking<A, S>(api: &A, sink: &S, sequence: &RequestSequence, request: BookingRequest)
where
    A: FlightApi,
    S: BoardSink,
{
    sink.dispatch(BoardAction::BookingStarted);

    match api.book(&request).await {
        Ok(()) => {
            log::info!("Booking for flight {} accepted", request.flight_id);
            search(api, sink, sequence, SearchCriteria::default()).await;
            sink.dispatch(BoardAction::BookingConfirmed);
        }
        Err(e) => {
            log::error!("Booking for flight {} failed: {}", request.flight_id, e);
            sink.dispatch(BoardAction::BookingFailed(e.user_message(BOOKING_FAILED_MESSAGE)));
        }
    }
}
