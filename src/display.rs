//! Result records handed to a rendering layer: per-instant partial-phase
//! snapshots, labeled timeline events and the aggregate [`EclipseDisplay`].

use std::cmp::Ordering;
use std::fmt;

use hifitime::{Duration, Epoch};
use ordered_float::OrderedFloat;

use crate::eclipse_type::EclipseType;
use crate::maths;

/// The geometry of the Moon's disk relative to the Sun's disk at one instant
/// of a partial phase.
///
/// Angles are in radians; distances are in units of the Sun's apparent
/// radius.
#[derive(Debug, Clone)]
pub struct PartialPhase {
    /// Local civil time of the snapshot.
    pub when: Epoch,
    /// The angle zenith-Sun-Moon. Depends on the local hour angle.
    pub zenith_angle: f64,
    /// From the center of the Sun's disk to the center of the Moon's disk.
    pub lunar_solar_distance: f64,
    /// Radius of the Moon's disk, in units of the Sun's radius.
    pub lunar_radius: f64,
    /// Magnitude of the eclipse at this moment.
    pub magnitude: f64,
    /// Altitude of the Sun at this moment, radians.
    pub altitude: f64,
}

/// Something a person might want to know about during an eclipse.
///
/// Totally ordered by (time, label, offset, magnitude, altitude) so that
/// assembled timelines sort deterministically.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    /// Local civil time during the day when the event occurs.
    pub when: Epoch,
    /// Description of the event.
    pub text: String,
    /// Interval between this event and a reference instant, usually the
    /// start/end of totality/annularity or the time of maximum eclipse.
    pub plus_minus: Duration,
    /// Magnitude of the eclipse at `when`.
    pub magnitude: f64,
    /// Altitude of the Sun at `when`, in degrees, rounded to one place.
    pub altitude: f64,
}

impl TimelineEvent {
    pub fn new(
        when: Epoch,
        text: impl Into<String>,
        plus_minus: Duration,
        magnitude: f64,
        altitude_rads: f64,
    ) -> TimelineEvent {
        TimelineEvent {
            when,
            text: text.into(),
            plus_minus,
            magnitude,
            altitude: (maths::rads_to_degs(altitude_rads) * 10.0).round() / 10.0,
        }
    }
}

impl Ord for TimelineEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.when
            .cmp(&other.when)
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.plus_minus.cmp(&other.plus_minus))
            .then_with(|| OrderedFloat(self.magnitude).cmp(&OrderedFloat(other.magnitude)))
            .then_with(|| OrderedFloat(self.altitude).cmp(&OrderedFloat(other.altitude)))
    }
}

impl PartialOrd for TimelineEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimelineEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimelineEvent {}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (_, _, _, hour, minute, second, _) = self.when.to_gregorian_utc();
        write!(
            f,
            "{hour:02}:{minute:02}:{second:02} '{}' mag:{:.3} {} alt:{}°",
            self.text,
            self.magnitude,
            maths::hhmm(self.plus_minus),
            self.altitude
        )
    }
}

/// The computed local circumstances of an eclipse, ready for display.
///
/// All times are in the location's local civil time.
#[derive(Debug, Clone)]
pub struct EclipseDisplay {
    /// The *local* eclipse type; never [`EclipseType::Hybrid`].
    pub eclipse_type: EclipseType,
    pub partial_starts: Epoch,
    pub partial_ends: Epoch,
    /// The geometry at the instant of maximum local eclipse.
    pub max_eclipse: PartialPhase,
    /// Partial-phase samples before maximum eclipse.
    pub phases_before: Vec<PartialPhase>,
    /// Partial-phase samples after maximum eclipse.
    pub phases_after: Vec<PartialPhase>,
    /// Altitude of the Sun at maximum eclipse, radians.
    pub altitude: f64,
    /// Azimuth of the Sun at maximum eclipse, radians.
    pub azimuth: f64,
    /// Magnitude at maximum eclipse.
    pub magnitude: f64,
    /// `None` only if the local eclipse is partial.
    pub totality_annularity_starts: Option<Epoch>,
    /// `None` only if the local eclipse is partial.
    pub totality_annularity_ends: Option<Epoch>,
    /// Ordered timeline of events worth knowing about.
    pub timeline_events: Vec<TimelineEvent>,
}

impl EclipseDisplay {
    pub fn duration_partial(&self) -> Duration {
        self.partial_ends - self.partial_starts
    }

    /// `None` for a partial eclipse.
    pub fn duration_totality_annularity(&self) -> Option<Duration> {
        match (
            self.totality_annularity_starts,
            self.totality_annularity_ends,
        ) {
            (Some(starts), Some(ends)) => Some(ends - starts),
            _ => None,
        }
    }
}
