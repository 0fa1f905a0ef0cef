use crate::time::{DurationCalculator, DurationError, FlightDuration};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub type AirportCode = Arc<str>;
pub type CarrierId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub origin: AirportCode,
    pub origin_name: Option<String>,
    pub destination: AirportCode,
    pub destination_name: Option<String>,
    pub departure_date: Option<String>,
    pub departure_time: String,
    pub arrival_date: Option<String>,
    pub arrival_time: String,
    pub carrier: CarrierId,
    #[serde(default)]
    pub stops: u32,
    pub price: u64,
}

impl Ticket {
    pub fn duration(&self, calculator: &DurationCalculator) -> Result<FlightDuration, DurationError> {
        calculator.compute_duration(
            self.departure_date.as_deref(),
            &self.departure_time,
            self.arrival_date.as_deref(),
            &self.arrival_time,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read tickets file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tickets document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root of a tickets document: `{ "tickets": [...] }`.
#[derive(Debug, Deserialize)]
pub struct TicketList {
    pub tickets: Vec<Ticket>,
}

impl TicketList {
    pub fn parse(data: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }
}
