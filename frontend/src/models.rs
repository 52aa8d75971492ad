use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The backend has shipped both numeric and string ids, so accept either.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(untagged)]
pub enum FlightId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightId::Numeric(id) => write!(f, "{}", id),
            FlightId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct Flight {
    #[serde(alias = "_id")]
    pub id: FlightId,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub origin_city: Option<String>,
    #[serde(default)]
    pub destination_city: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub aircraft_type: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub seats_available: u32,
}

impl Flight {
    pub fn route(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    /// "Origin City • Destination City", skipping whichever side is missing.
    pub fn city_line(&self) -> String {
        [&self.origin_city, &self.destination_city]
            .into_iter()
            .filter_map(|city| city.as_deref().map(str::trim))
            .filter(|city| !city.is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }

    pub fn is_sold_out(&self) -> bool {
        self.seats_available == 0
    }
}

/// Filters for `GET /api/flights`. `None` means no filter on that dimension.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SearchCriteria {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}

impl SearchCriteria {
    /// Builds criteria from raw form fields. Blank fields are treated as absent
    /// and airport codes are upper-cased.
    pub fn from_form(origin: &str, destination: &str, date: &str) -> Self {
        Self {
            origin: airport_code(origin),
            destination: airport_code(destination),
            date: non_blank(date),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.origin.is_none() && self.destination.is_none() && self.date.is_none()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("origin", self.origin.as_deref()),
            ("destination", self.destination.as_deref()),
            ("date", self.date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }

    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path and query for the flight listing, without a dangling `?` when unfiltered.
    pub fn flights_path(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            "/api/flights".to_string()
        } else {
            format!("/api/flights?{}", query)
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn airport_code(value: &str) -> Option<String> {
    non_blank(value).map(|code| code.to_uppercase())
}

/// Body of `POST /api/book`.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct BookingRequest {
    pub flight_id: FlightId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub passengers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingFormError {
    #[error("Please enter your full name")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passengers must be a whole number of at least 1")]
    InvalidPassengers,
    #[error("Only {available} seat(s) left on this leg")]
    TooManyPassengers { available: u32 },
}

/// Raw modal input, kept as typed until submission.
#[derive(Clone, PartialEq, Debug)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub passengers: String,
    pub notes: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            passengers: "1".to_string(),
            notes: String::new(),
        }
    }
}

impl BookingForm {
    /// Checks the form against the selected leg. The seat bound is a UI guard;
    /// the backend remains the authority on availability.
    pub fn validate(&self, flight: &Flight) -> Result<BookingRequest, BookingFormError> {
        let name = non_blank(&self.name).ok_or(BookingFormError::MissingName)?;
        let email = non_blank(&self.email)
            .filter(|email| looks_like_email(email))
            .ok_or(BookingFormError::InvalidEmail)?;
        let passengers: u32 = self
            .passengers
            .trim()
            .parse()
            .ok()
            .filter(|count| *count >= 1)
            .ok_or(BookingFormError::InvalidPassengers)?;
        if passengers > flight.seats_available {
            return Err(BookingFormError::TooManyPassengers {
                available: flight.seats_available,
            });
        }

        Ok(BookingRequest {
            flight_id: flight.id.clone(),
            name,
            email,
            phone: non_blank(&self.phone),
            passengers,
            notes: non_blank(&self.notes),
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Pulls a human-readable `detail` string out of an error response body.
pub fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .filter(|detail| !detail.trim().is_empty())
        .map(str::to_string)
}

/// "$12,500", or "$12,500.50" when there are cents.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let dollars = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{}${}", sign, dollars),
        rem => format!("{}${}.{:02}", sign, dollars, rem),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders a backend timestamp for display, falling back to the raw value.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y, %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(DISPLAY).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn flight(id: i64, seats: u32) -> Flight {
        Flight {
            id: FlightId::Numeric(id),
            origin: "TEB".to_string(),
            destination: "MIA".to_string(),
            origin_city: Some("Teterboro".to_string()),
            destination_city: Some("Miami".to_string()),
            price: 12_500.0,
            aircraft_type: "Citation XLS".to_string(),
            departure_time: "2026-11-02T09:30:00".to_string(),
            arrival_time: "2026-11-02T12:45:00".to_string(),
            seats_available: seats,
        }
    }

    #[test]
    fn unfiltered_criteria_send_no_query() {
        let criteria = SearchCriteria::from_form("", "  ", "");
        assert!(criteria.is_unfiltered());
        assert!(criteria.query_pairs().is_empty());
        assert_eq!(criteria.flights_path(), "/api/flights");
    }

    #[test]
    fn only_present_fields_are_sent() {
        let criteria = SearchCriteria::from_form(" teb", "", "2026-11-02");
        assert_eq!(criteria.origin.as_deref(), Some("TEB"));
        assert_eq!(criteria.destination, None);
        assert_eq!(criteria.to_query_string(), "origin=TEB&date=2026-11-02");
        assert_eq!(criteria.flights_path(), "/api/flights?origin=TEB&date=2026-11-02");

        let criteria = SearchCriteria::from_form("", "las", "");
        assert_eq!(criteria.flights_path(), "/api/flights?destination=LAS");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let criteria = SearchCriteria {
            origin: Some("A&B".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.to_query_string(), "origin=A%26B");
    }

    #[test]
    fn deserializes_backend_flight() {
        let json = r#"{
            "id": "64f1c2",
            "origin": "VNY",
            "destination": "LAS",
            "origin_city": "Van Nuys",
            "destination_city": null,
            "price": 8900.5,
            "aircraft_type": "Phenom 300",
            "departure_time": "2026-12-01T08:00:00Z",
            "arrival_time": "2026-12-01T09:10:00Z",
            "seats_available": 6
        }"#;
        let flight: Flight = serde_json::from_str(json).unwrap();
        assert_eq!(flight.id, FlightId::Text("64f1c2".to_string()));
        assert_eq!(flight.city_line(), "Van Nuys");
        assert_eq!(flight.route(), "VNY → LAS");
        assert_eq!(flight.seats_available, 6);
    }

    #[test]
    fn city_line_joins_present_cities() {
        assert_eq!(flight(1, 4).city_line(), "Teterboro • Miami");
        let mut f = flight(1, 4);
        f.origin_city = None;
        assert_eq!(f.city_line(), "Miami");
        f.destination_city = Some("  ".to_string());
        assert_eq!(f.city_line(), "");
    }

    #[test]
    fn validates_booking_form() {
        let leg = flight(7, 3);
        let form = BookingForm {
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            phone: "".to_string(),
            passengers: "2".to_string(),
            notes: "Pets on board".to_string(),
        };
        let request = form.validate(&leg).unwrap();
        assert_eq!(request.flight_id, FlightId::Numeric(7));
        assert_eq!(request.name, "Ada Lovelace");
        assert_eq!(request.phone, None);
        assert_eq!(request.passengers, 2);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["flight_id"], 7);
        assert_eq!(body["notes"], "Pets on board");
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn rejects_invalid_booking_forms() {
        let leg = flight(7, 3);
        let valid = BookingForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };

        let form = BookingForm { name: "".to_string(), ..valid.clone() };
        assert_eq!(form.validate(&leg), Err(BookingFormError::MissingName));

        let form = BookingForm { email: "ada".to_string(), ..valid.clone() };
        assert_eq!(form.validate(&leg), Err(BookingFormError::InvalidEmail));

        let form = BookingForm { passengers: "0".to_string(), ..valid.clone() };
        assert_eq!(form.validate(&leg), Err(BookingFormError::InvalidPassengers));

        let form = BookingForm { passengers: "4".to_string(), ..valid };
        assert_eq!(
            form.validate(&leg),
            Err(BookingFormError::TooManyPassengers { available: 3 })
        );
    }

    #[test]
    fn extracts_error_detail() {
        assert_eq!(error_detail(r#"{"detail":"Flight full"}"#).as_deref(), Some("Flight full"));
        assert_eq!(error_detail(r#"{"detail":[{"msg":"bad"}]}"#), None);
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(r#"{"detail":""}"#), None);
        assert_eq!(error_detail(r#"{"detail":"  "}"#), None);
    }

    #[test]
    fn error_detail_is_passed_through_verbatim() {
        assert_eq!(
            error_detail(r#"{"detail":"  Flight full. "}"#).as_deref(),
            Some("  Flight full. ")
        );
    }

    #[test]
    fn formats_prices() {
        assert_eq!(format_price(12_500.0), "$12,500");
        assert_eq!(format_price(999.0), "$999");
        assert_eq!(format_price(1_234_567.5), "$1,234,567.50");
        assert_eq!(format_price(0.0), "$0");
    }

    #[test]
    fn formats_timestamps() {
        assert_eq!(format_timestamp("2026-11-02T09:30:00"), "Nov 2, 2026, 09:30");
        assert_eq!(format_timestamp("2026-11-02T09:30:00+00:00"), "Nov 2, 2026, 09:30");
        assert_eq!(format_timestamp("soon"), "soon");
    }
}
