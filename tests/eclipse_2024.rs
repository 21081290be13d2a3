//! End-to-end run of the 2024 April 8 total eclipse from the tabulated NASA
//! row in `tests/data/`, observed from Skinner's Pond, Prince Edward Island
//! (inside the path of totality, UTC-3).

use approx::assert_relative_eq;
use camino::Utf8Path;

use umbra::circumstances::{local_circumstances, LocalCircumstances};
use umbra::eclipse_type::EclipseType;
use umbra::location::Location;
use umbra::lookup::BesselianElementsLookup;

const ELEMENTS_CSV: &str = "tests/data/besselian-elements.csv";
const DELTA_T: f64 = 69.0;

fn skinners_pond() -> Location {
    Location::new(
        "Skinner's Pond",
        46.96757_f64.to_radians(),
        (-64.12027_f64).to_radians(),
        0.0,
        -3,
        0,
    )
}

#[test]
fn test_lookup_finds_the_tabulated_eclipse() {
    let lookup = BesselianElementsLookup::new(ELEMENTS_CSV);
    let bessel = lookup.lookup(2024, 4, 8).unwrap().expect("tabulated");
    assert_eq!(bessel.eclipse_type(), EclipseType::Total);
    assert_eq!(bessel.t0(), 18);
    assert_relative_eq!(bessel.x().value_at(0.0), -0.318244);
    assert_relative_eq!(bessel.tan_f2(), 0.004645);
    assert_relative_eq!(bessel.jd_max_eclipse(), 2460409.263);
    let (year, month, day, hour, minute, second, _) =
        bessel.when_max_eclipse().to_gregorian_utc();
    assert_eq!((year, month, day), (2024, 4, 8));
    assert_eq!((hour, minute, second), (18, 18, 29));
}

#[test]
fn test_lookup_miss_is_absent_not_error() {
    let lookup = BesselianElementsLookup::new(ELEMENTS_CSV);
    assert!(lookup.lookup(2024, 4, 9).unwrap().is_none());
    assert!(lookup.lookup(1999, 8, 11).unwrap().is_none());
}

#[test]
fn test_totality_at_skinners_pond() {
    let location = skinners_pond();
    let display = local_circumstances(
        Utf8Path::new(ELEMENTS_CSV),
        2024,
        4,
        8,
        &location,
        DELTA_T,
        10,
    )
    .unwrap()
    .expect("totality at Skinner's Pond");

    assert_eq!(display.eclipse_type, EclipseType::Total);
    assert_relative_eq!(display.magnitude, 1.0209319097928664, epsilon = 1e-9);

    let starts = display.totality_annularity_starts.expect("total eclipse");
    let ends = display.totality_annularity_ends.expect("total eclipse");
    // totality strictly inside the partial phase
    assert!(display.partial_starts < starts);
    assert!(starts < ends);
    assert!(ends < display.partial_ends);
    // about 3m12s of totality
    assert_relative_eq!(
        display.duration_totality_annularity().unwrap().to_seconds(),
        192.42,
        epsilon = 0.1
    );

    // UTC 19:37:15 is 16:37:15 local civil time (UTC-3)
    let (_, _, _, hour, minute, second, _) = display.max_eclipse.when.to_gregorian_utc();
    assert_eq!((hour, minute, second), (16, 37, 15));
    let (_, _, _, hour, minute, ..) = display.partial_starts.to_gregorian_utc();
    assert_eq!((hour, minute), (15, 27));
    let (_, _, _, hour, minute, ..) = display.partial_ends.to_gregorian_utc();
    assert_eq!((hour, minute), (17, 43));

    assert_relative_eq!(
        display.altitude.to_degrees(),
        32.23936906334658,
        epsilon = 1e-6
    );
}

#[test]
fn test_total_eclipse_timeline_and_phases() {
    let lookup = BesselianElementsLookup::new(ELEMENTS_CSV);
    let bessel = lookup.lookup(2024, 4, 8).unwrap().unwrap();
    let location = skinners_pond();
    let display = LocalCircumstances::new(&location, &bessel, DELTA_T, 10)
        .compute()
        .unwrap()
        .unwrap();

    // phase snapshots are spaced from the totality contacts here
    assert_eq!(display.phases_before.len(), 6);
    assert_eq!(display.phases_after.len(), 6);
    for phase in display.phases_before.iter().chain(&display.phases_after) {
        assert!(phase.when > display.partial_starts);
        assert!(phase.when < display.partial_ends);
    }

    let events = &display.timeline_events;
    assert_eq!(events.len(), 11);
    assert!(events.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(events.first().unwrap().text, "Start of the partial phase.");
    assert_eq!(events.last().unwrap().text, "End of the partial phase.");
    assert!(events
        .iter()
        .any(|e| e.text == "TOTALITY STARTS. View with naked eye, unfiltered."));
    assert!(events
        .iter()
        .any(|e| e.text == "TOTALITY ENDS. Resume viewing with filter."));

    // the diamond-ring advisory sits ten seconds before totality
    let bailys = events
        .iter()
        .find(|e| e.text == "Baily's beads/diamond ring start.")
        .unwrap();
    assert_relative_eq!(bailys.plus_minus.to_seconds(), -10.0, epsilon = 0.5);
}

#[test]
fn test_no_eclipse_for_untabulated_date() {
    let location = skinners_pond();
    let display = local_circumstances(
        Utf8Path::new(ELEMENTS_CSV),
        2023,
        10,
        14,
        &location,
        DELTA_T,
        10,
    )
    .unwrap();
    assert!(display.is_none());
}

#[test]
fn test_eclipse_below_the_fundamental_plane_is_absent() {
    // Cape Town on the night side of the Earth during this eclipse
    let location = Location::new(
        "Cape Town",
        (-33.92_f64).to_radians(),
        18.42_f64.to_radians(),
        0.0,
        2,
        0,
    );
    let lookup = BesselianElementsLookup::new(ELEMENTS_CSV);
    let bessel = lookup.lookup(2024, 4, 8).unwrap().unwrap();
    let display = LocalCircumstances::new(&location, &bessel, DELTA_T, 10)
        .compute()
        .unwrap();
    assert!(display.is_none());
}
