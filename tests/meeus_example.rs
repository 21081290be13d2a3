//! End-to-end check against the worked example in Meeus, *Elements of Solar
//! Eclipses 1951-2200*, pages 26-27: the annular eclipse of 1994 May 10
//! observed from the US Naval Observatory, with ΔT = 61 s. Globally annular,
//! locally partial.

use approx::assert_relative_eq;

use umbra::besselian::BesselianElements;
use umbra::circumstances::LocalCircumstances;
use umbra::eclipse_type::EclipseType;
use umbra::location::Location;

fn usno() -> Location {
    Location::new(
        "USNO",
        38.921389_f64.to_radians(),
        (-77.06556_f64).to_radians(),
        84.0,
        0,
        0,
    )
}

#[test]
fn test_meeus_published_magnitude_and_local_type() {
    let bessel = BesselianElements::meeus_1994_example();
    let location = usno();
    let display = LocalCircumstances::new(&location, &bessel, 61.0, 10)
        .compute()
        .unwrap()
        .expect("the eclipse is visible from Washington");

    // The book publishes magnitude 0.857 at maximum.
    assert_relative_eq!(display.magnitude, 0.8571057485803597, epsilon = 1e-9);
    assert_eq!(display.eclipse_type, EclipseType::Partial);
    // locally partial, so no annularity bounds
    assert!(display.totality_annularity_starts.is_none());
    assert!(display.totality_annularity_ends.is_none());
    assert!(display.duration_totality_annularity().is_none());

    // display magnitude must be the converged-maximum worksheet magnitude
    assert_relative_eq!(display.magnitude, display.max_eclipse.magnitude, epsilon = 0.0);

    assert_relative_eq!(
        display.altitude.to_degrees(),
        68.23030126934856,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        display.azimuth.to_degrees(),
        194.33328172827154,
        epsilon = 1e-6
    );
}

#[test]
fn test_meeus_contact_times() {
    let bessel = BesselianElements::meeus_1994_example();
    let location = usno();
    let display = LocalCircumstances::new(&location, &bessel, 61.0, 10)
        .compute()
        .unwrap()
        .unwrap();

    // USNO is at offset 0, so local civil time is UTC here.
    let (_, _, _, hour, minute, ..) = display.partial_starts.to_gregorian_utc();
    assert_eq!((hour, minute), (15, 39));
    let (_, _, _, hour, minute, ..) = display.partial_ends.to_gregorian_utc();
    assert_eq!((hour, minute), (19, 13));
    let (_, _, _, hour, minute, ..) = display.max_eclipse.when.to_gregorian_utc();
    assert_eq!((hour, minute), (17, 26));

    // about 3h34m of partial eclipse
    assert_relative_eq!(
        display.duration_partial().to_seconds(),
        12_873.7,
        epsilon = 1.0
    );
}

#[test]
fn test_partial_phase_samples_stay_inside_the_partial_window() {
    let bessel = BesselianElements::meeus_1994_example();
    let location = usno();
    let display = LocalCircumstances::new(&location, &bessel, 61.0, 10)
        .compute()
        .unwrap()
        .unwrap();

    // 10-minute spacing over this window gives ten snapshots per side
    assert_eq!(display.phases_before.len(), 10);
    assert_eq!(display.phases_after.len(), 10);
    for phase in display.phases_before.iter().chain(&display.phases_after) {
        assert!(phase.when > display.partial_starts);
        assert!(phase.when < display.partial_ends);
        assert!(phase.magnitude > 0.0);
    }
}

#[test]
fn test_annularity_on_the_central_path() {
    // Toledo, Ohio sat on the 1994 May 10 annularity path (EDT, UTC-4).
    let bessel = BesselianElements::meeus_1994_example();
    let location = Location::new(
        "Toledo",
        41.6528_f64.to_radians(),
        (-83.5379_f64).to_radians(),
        0.0,
        -4,
        0,
    );
    let display = LocalCircumstances::new(&location, &bessel, 61.0, 10)
        .compute()
        .unwrap()
        .expect("the central path crosses Toledo");

    assert_eq!(display.eclipse_type, EclipseType::Annular);
    assert_relative_eq!(display.magnitude, 0.9707440595428601, epsilon = 1e-9);

    let starts = display.totality_annularity_starts.expect("annular eclipse");
    let ends = display.totality_annularity_ends.expect("annular eclipse");
    assert!(display.partial_starts < starts);
    assert!(starts < ends);
    assert!(ends < display.partial_ends);
    // about 6m14s of annularity, UTC 17:09:47 - 17:16:01
    assert_relative_eq!(
        display.duration_totality_annularity().unwrap().to_seconds(),
        373.65,
        epsilon = 0.1
    );
    let (_, _, _, hour, minute, ..) = starts.to_gregorian_utc();
    assert_eq!((hour, minute), (13, 9));
    let (_, _, _, hour, minute, ..) = ends.to_gregorian_utc();
    assert_eq!((hour, minute), (13, 16));

    let events = &display.timeline_events;
    // start + end + maximum + both annularity contacts + ten phases per side
    assert_eq!(events.len(), 25);
    assert!(events.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(events.iter().any(|e| e.text == "ANNULARITY STARTS."));
    assert!(events.iter().any(|e| e.text == "ANNULARITY ENDS."));
    assert!(events.iter().any(|e| e.text == "Maximum eclipse."));
}

#[test]
fn test_timeline_is_ordered_and_bracketed() {
    let bessel = BesselianElements::meeus_1994_example();
    let location = usno();
    let display = LocalCircumstances::new(&location, &bessel, 61.0, 10)
        .compute()
        .unwrap()
        .unwrap();

    let events = &display.timeline_events;
    // start + end + maximum + ten phases per side
    assert_eq!(events.len(), 23);
    assert!(events.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(events.first().unwrap().text, "Start of the partial phase.");
    assert_eq!(events.last().unwrap().text, "End of the partial phase.");
    assert!(events.iter().any(|e| e.text == "MAXIMUM eclipse."));
}
