use crate::report::tests::utils::{add_ticket, id, vvo_tlv};
use crate::report::{CarrierMinimums, Outcome, Report, Route, Strictness};
use crate::ticket::TicketList;
use crate::time::{DurationCalculator, DurationError, FlightDuration};

const SAMPLE: &str = include_str!("../../../data/tickets.json");

fn minutes(m: i64) -> FlightDuration {
    FlightDuration::from_minutes(m).unwrap()
}

#[test]
fn test_sample_report() {
    let list = TicketList::parse(SAMPLE).unwrap();
    let report = Report::build(
        &DurationCalculator::default(),
        &list.tickets,
        vvo_tlv(),
        Strictness::Abort,
    )
    .unwrap();

    assert_eq!(
        ("Владивосток".to_string(), "Тель-Авив".to_string()),
        report.route_names()
    );

    match report.outcome {
        Outcome::Flights {
            matched,
            minimums,
            prices,
            skipped,
        } => {
            assert_eq!(10, matched);
            assert!(skipped.is_empty());
            assert_eq!(
                CarrierMinimums::from([
                    (id("BA"), minutes(380)),
                    (id("S7"), minutes(350)),
                    (id("SU"), minutes(360)),
                    (id("TK"), minutes(350)),
                ]),
                minimums
            );
            assert_eq!(10, prices.prices.len());
            assert_eq!(13925.0, prices.median);
            assert_eq!(14060.0, prices.mean);
            assert_eq!(135.0, prices.difference);
        }
        Outcome::NoFlights => panic!("expected flights"),
    }
}

#[test]
fn test_no_flights() {
    let mut tickets = Vec::new();
    add_ticket(&mut tickets, "UFA", "LRN", "S7", "6:00", "8:45", 4200);
    // never evaluated, the route has no tickets
    add_ticket(&mut tickets, "LRN", "TLV", "SU", "bad", "bad", 5000);

    let report = Report::build(
        &DurationCalculator::default(),
        &tickets,
        vvo_tlv(),
        Strictness::Abort,
    )
    .unwrap();

    assert_eq!(Outcome::NoFlights, report.outcome);
    assert!(report.carrier_rows().is_empty());
    assert_eq!(("VVO".to_string(), "TLV".to_string()), report.route_names());
}

#[test]
fn test_all_matching_tickets_invalid() {
    let mut tickets = Vec::new();
    add_ticket(&mut tickets, "VVO", "TLV", "S7", "10:00", "10:00", 4200);

    let report = Report::build(
        &DurationCalculator::default(),
        &tickets,
        vvo_tlv(),
        Strictness::Skip,
    )
    .unwrap();

    match report.outcome {
        Outcome::Flights {
            matched,
            minimums,
            prices,
            skipped,
        } => {
            assert_eq!(1, matched);
            assert!(minimums.is_empty());
            assert_eq!(1, skipped.len());
            assert_eq!(0.0, prices.median);
            assert_eq!(0.0, prices.mean);
        }
        Outcome::NoFlights => panic!("expected flights"),
    }

    let err = Report::build(
        &DurationCalculator::default(),
        &tickets,
        vvo_tlv(),
        Strictness::Abort,
    )
    .unwrap_err();
    assert!(matches!(err, DurationError::InvalidInterval { .. }));
}

#[test]
fn test_carrier_rows_are_ordered() {
    let mut tickets = Vec::new();
    add_ticket(&mut tickets, "VVO", "TLV", "TK", "10:00", "16:00", 1);
    add_ticket(&mut tickets, "VVO", "TLV", "BA", "10:00", "17:00", 1);
    add_ticket(&mut tickets, "VVO", "TLV", "S7", "10:00", "15:00", 1);

    let report = Report::build(
        &DurationCalculator::default(),
        &tickets,
        vvo_tlv(),
        Strictness::Skip,
    )
    .unwrap();

    let rows = report
        .carrier_rows()
        .into_iter()
        .map(|r| (r.carrier, r.duration))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            (id("BA"), minutes(420)),
            (id("S7"), minutes(300)),
            (id("TK"), minutes(360)),
        ],
        rows
    );
}

#[test]
fn test_json_output() {
    let mut tickets = Vec::new();
    add_ticket(&mut tickets, "VVO", "TLV", "TK", "10:00", "16:00", 100);
    add_ticket(&mut tickets, "VVO", "TLV", "TK", "10:00", "10:00", 300);

    let calc = DurationCalculator::default();
    let report = Report::build(&calc, &tickets, vvo_tlv(), Strictness::Skip).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!("flights", json["outcome"]["status"]);
    assert_eq!(360, json["outcome"]["minimums"]["TK"]);
    assert_eq!(100.0, json["outcome"]["prices"]["median"]);
    assert_eq!(1, json["outcome"]["skipped"][0]["index"]);
    assert_eq!(
        "arrival 10:00 is not after departure 10:00",
        json["outcome"]["skipped"][0]["reason"]
    );
    assert_eq!("VVO", json["route"]["origin"]);

    let empty = Report::build(&calc, &tickets, Route::new("UFA", "LRN"), Strictness::Skip).unwrap();
    let json = serde_json::to_value(&empty).unwrap();
    assert_eq!("no_flights", json["outcome"]["status"]);
}

#[test]
fn test_build_is_idempotent() {
    let list = TicketList::parse(SAMPLE).unwrap();
    let calc = DurationCalculator::default();
    let first = Report::build(&calc, &list.tickets, vvo_tlv(), Strictness::Skip).unwrap();
    let second = Report::build(&calc, &list.tickets, vvo_tlv(), Strictness::Skip).unwrap();
    assert_eq!(first, second);
}
