use crate::ticket::{AirportCode, CarrierId, Ticket};
use crate::time::{DurationCalculator, DurationError, FlightDuration};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use tracing::{debug, warn};

pub type CarrierMinimums = BTreeMap<CarrierId, FlightDuration>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub origin: AirportCode,
    pub destination: AirportCode,
}

impl Route {
    pub fn new(origin: impl Into<AirportCode>, destination: impl Into<AirportCode>) -> Route {
        Route {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Exact, case-sensitive match on both airport codes.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        ticket.origin == self.origin && ticket.destination == self.destination
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.destination)
    }
}

/// What to do with a matching ticket whose duration cannot be computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Leave the ticket out of every statistic and keep going.
    #[default]
    Skip,
    /// Fail the whole run on the first bad ticket.
    Abort,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedTicket {
    /// Position in the input ticket list
    pub index: usize,
    pub carrier: CarrierId,
    #[serde(rename = "reason", serialize_with = "error_message")]
    pub error: DurationError,
}

fn error_message<S: Serializer>(error: &DurationError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl fmt::Display for SkippedTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticket #{} ({}): {}", self.index, self.carrier, self.error)
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Aggregate {
    pub matched: usize,
    pub minimums: CarrierMinimums,
    /// Prices of the accepted tickets, duplicates kept
    pub prices: Vec<u64>,
    pub skipped: Vec<SkippedTicket>,
}

pub fn aggregate_minimums_by_carrier<'a, I>(
    calculator: &DurationCalculator,
    tickets: I,
    route: &Route,
    strictness: Strictness,
) -> Result<Aggregate, DurationError>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut aggregate = Aggregate::default();

    for (index, ticket) in tickets.into_iter().enumerate().filter(|(_, t)| route.matches(t)) {
        aggregate.matched += 1;
        let duration = match ticket.duration(calculator) {
            Ok(d) => d,
            Err(e) if strictness == Strictness::Skip => {
                warn!(index, carrier = %ticket.carrier, error = %e, "skipping ticket");
                aggregate.skipped.push(SkippedTicket {
                    index,
                    carrier: ticket.carrier.clone(),
                    error: e,
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        // ties keep the first duration seen
        match aggregate.minimums.entry(ticket.carrier.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(duration);
            }
            Entry::Occupied(mut slot) => {
                if duration < *slot.get() {
                    debug!(carrier = %ticket.carrier, minutes = duration.total_minutes(), "new minimum");
                    slot.insert(duration);
                }
            }
        }
        aggregate.prices.push(ticket.price);
    }

    Ok(aggregate)
}
