//! Input rules checked before the service runs. Each rule yields its own message.

use crate::contract::model::{FlightFilter, NewFlight};
use crate::domain::error::DomainError;

pub const AIRPORT_CODE_LEN: usize = 3;

pub const DEPARTURE_AIRPORT_MSG: &str = "Departure airport code must be exactly 3 characters";
pub const DESTINATION_AIRPORT_MSG: &str = "Destination airport code must be exactly 3 characters";
pub const FARE_MSG: &str = "Fare must be a non-negative number";

fn is_airport_code(code: &str) -> bool {
    code.chars().count() == AIRPORT_CODE_LEN
}

/// Violated rules for a create/update payload, in field order.
pub fn new_flight_violations(flight: &NewFlight) -> Vec<String> {
    let mut messages = Vec::new();
    if !(flight.fare.is_finite() && flight.fare >= 0.0) {
        messages.push(FARE_MSG.to_string());
    }
    if !is_airport_code(&flight.departure_airport) {
        messages.push(DEPARTURE_AIRPORT_MSG.to_string());
    }
    if !is_airport_code(&flight.destination_airport) {
        messages.push(DESTINATION_AIRPORT_MSG.to_string());
    }
    messages
}

/// Violated rules for search filters. Only filters that are present are checked.
pub fn filter_violations(filter: &FlightFilter) -> Vec<String> {
    let mut messages = Vec::new();
    if filter
        .departure_airport
        .as_deref()
        .is_some_and(|code| !is_airport_code(code))
    {
        messages.push(DEPARTURE_AIRPORT_MSG.to_string());
    }
    if filter
        .destination_airport
        .as_deref()
        .is_some_and(|code| !is_airport_code(code))
    {
        messages.push(DESTINATION_AIRPORT_MSG.to_string());
    }
    messages
}

pub fn validate_new_flight(flight: &NewFlight) -> Result<(), DomainError> {
    into_result(new_flight_violations(flight))
}

pub fn validate_filter(filter: &FlightFilter) -> Result<(), DomainError> {
    into_result(filter_violations(filter))
}

fn into_result(messages: Vec<String>) -> Result<(), DomainError> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn flight(dep: &str, dest: &str, fare: f64) -> NewFlight {
        let t = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        NewFlight {
            airline: "TAP".into(),
            supplier: "Direct".into(),
            fare,
            departure_airport: dep.into(),
            destination_airport: dest.into(),
            departure_time: t,
            arrival_time: t,
        }
    }

    #[test]
    fn valid_flight_passes() {
        assert!(new_flight_violations(&flight("LIS", "OPO", 0.0)).is_empty());
        assert!(validate_new_flight(&flight("LIS", "OPO", 99.9)).is_ok());
    }

    #[test]
    fn one_message_per_bad_airport() {
        let messages = new_flight_violations(&flight("LISB", "OP", 10.0));
        assert_eq!(
            messages,
            vec![
                DEPARTURE_AIRPORT_MSG.to_string(),
                DESTINATION_AIRPORT_MSG.to_string()
            ]
        );
    }

    #[test]
    fn negative_or_nan_fare_is_rejected() {
        assert_eq!(new_flight_violations(&flight("LIS", "OPO", -1.0)), vec![FARE_MSG]);
        assert_eq!(
            new_flight_violations(&flight("LIS", "OPO", f64::NAN)),
            vec![FARE_MSG]
        );
    }

    #[test]
    fn airport_length_counts_characters_not_bytes() {
        assert!(new_flight_violations(&flight("ÖSD", "ÅRH", 1.0)).is_empty());
    }

    #[test]
    fn absent_filters_are_not_checked() {
        assert!(validate_filter(&FlightFilter::default()).is_ok());

        let filter = FlightFilter {
            departure_airport: Some("LISBON".into()),
            ..Default::default()
        };
        match validate_filter(&filter) {
            Err(DomainError::Validation { messages }) => {
                assert_eq!(messages, vec![DEPARTURE_AIRPORT_MSG.to_string()])
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
