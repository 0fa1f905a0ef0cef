use crate::report::Route;
use crate::ticket::Ticket;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn vvo_tlv() -> Route {
    Route::new("VVO", "TLV")
}

/// `departure` and `arrival` are either "H:mm" or "dd.mm.yy H:mm".
pub fn add_ticket(
    tickets: &mut Vec<Ticket>,
    origin: &str,
    destination: &str,
    carrier: &str,
    departure: &str,
    arrival: &str,
    price: u64,
) {
    tickets.push(Ticket {
        origin: id(origin),
        origin_name: None,
        destination: id(destination),
        destination_name: None,
        departure_date: None,
        departure_time: departure.to_string(),
        arrival_date: None,
        arrival_time: arrival.to_string(),
        carrier: id(carrier),
        stops: 0,
        price,
    });
}

pub fn clock(minute_of_day: u64) -> String {
    format!("{}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

pub fn arb_id(prefix: &'static str) -> impl Strategy<Value = Arc<str>> {
    prop_oneof![
        Just(Arc::from(format!("{}_1", prefix))),
        Just(Arc::from(format!("{}_2", prefix))),
        Just(Arc::from(format!("{}_3", prefix))),
    ]
}

pub fn arb_airport() -> impl Strategy<Value = Arc<str>> {
    prop_oneof![Just(id("VVO")), Just(id("TLV")), Just(id("UFA"))]
}

/// Time-only tickets; with next-day rollover the duration is `len` minutes.
pub fn arb_ticket() -> impl Strategy<Value = (Ticket, u64)> {
    (
        arb_airport(),
        arb_airport(),
        arb_id("CARRIER"),
        0..1440u64,
        1..1440u64,
        1..50_000u64,
    )
        .prop_map(|(org, dst, carrier, dep, len, price)| {
            let ticket = Ticket {
                origin: org,
                origin_name: None,
                destination: dst,
                destination_name: None,
                departure_date: None,
                departure_time: clock(dep),
                arrival_date: None,
                arrival_time: clock((dep + len) % 1440),
                carrier,
                stops: 0,
                price,
            };
            (ticket, len)
        })
}
