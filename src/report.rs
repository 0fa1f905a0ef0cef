use crate::prices::PriceSummary;
use crate::ticket::{CarrierId, Ticket};
use crate::time::{DurationCalculator, DurationError, FlightDuration};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

mod aggregate;

pub use aggregate::{
    CarrierMinimums, Route, SkippedTicket, Strictness, aggregate_minimums_by_carrier,
};

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing matched the route. Not an error.
    NoFlights,
    Flights {
        matched: usize,
        /// Minutes per carrier
        minimums: CarrierMinimums,
        prices: PriceSummary,
        skipped: Vec<SkippedTicket>,
    },
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Report {
    pub route: Route,
    pub origin_name: Option<String>,
    pub destination_name: Option<String>,
    pub outcome: Outcome,
}

#[derive(Debug, Tabled)]
pub struct CarrierRow {
    #[tabled(rename = "Carrier")]
    pub carrier: CarrierId,
    #[tabled(rename = "Minimum flight time")]
    pub duration: FlightDuration,
}

impl Report {
    pub fn build(
        calculator: &DurationCalculator,
        tickets: &[Ticket],
        route: Route,
        strictness: Strictness,
    ) -> Result<Report, DurationError> {
        let filtered = tickets
            .iter()
            .filter(|t| route.matches(t))
            .collect::<Vec<&Ticket>>();
        let origin_name = filtered.iter().find_map(|t| t.origin_name.clone());
        let destination_name = filtered.iter().find_map(|t| t.destination_name.clone());

        let outcome = if filtered.is_empty() {
            info!(%route, "no matching tickets");
            Outcome::NoFlights
        } else {
            let aggregate = aggregate_minimums_by_carrier(calculator, tickets, &route, strictness)?;
            info!(
                %route,
                matched = aggregate.matched,
                skipped = aggregate.skipped.len(),
                carriers = aggregate.minimums.len(),
                "aggregated tickets"
            );
            Outcome::Flights {
                matched: aggregate.matched,
                prices: PriceSummary::summarize(&aggregate.prices),
                minimums: aggregate.minimums,
                skipped: aggregate.skipped,
            }
        };

        Ok(Report {
            route,
            origin_name,
            destination_name,
            outcome,
        })
    }

    /// Display names of both ends, falling back to the airport codes.
    pub fn route_names(&self) -> (String, String) {
        (
            self.origin_name
                .clone()
                .unwrap_or_else(|| self.route.origin.to_string()),
            self.destination_name
                .clone()
                .unwrap_or_else(|| self.route.destination.to_string()),
        )
    }

    pub fn carrier_rows(&self) -> Vec<CarrierRow> {
        match &self.outcome {
            Outcome::NoFlights => vec![],
            Outcome::Flights { minimums, .. } => minimums
                .iter()
                .map(|(carrier, duration)| CarrierRow {
                    carrier: carrier.clone(),
                    duration: *duration,
                })
                .collect(),
        }
    }
}
