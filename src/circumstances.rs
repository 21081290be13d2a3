//! # Local circumstances of a solar eclipse
//!
//! This module drives the [`Worksheet`] evaluations through four solving
//! stages and assembles the final [`EclipseDisplay`]:
//!
//! 1. **Local maximum eclipse** — fixed-point iteration started at `t = 0`,
//!    stepping by the worksheet's τ correction until it falls below the
//!    convergence threshold (~0.036 s). A negative magnitude at convergence
//!    means no eclipse at this location, and the computation short-circuits
//!    to an absent result.
//! 2. **Partial-phase contacts** — start and end of the partial eclipse,
//!    seeded from the converged maximum via the initial contact correction
//!    against the penumbral cone, then refined the same way.
//! 3. **Total/annular contacts** — same scheme against the umbral cone; run
//!    only when the local eclipse type is not partial.
//! 4. **Partial-phase sampling** — evenly spaced snapshots on each side of a
//!    phase-dependent base time, stepping outward in fixed-minute increments
//!    while the samples stay strictly inside the partial window.
//!
//! Later stages depend on earlier converged results, so the stages run
//! sequentially. Each stage is a plain synchronous loop bounded by
//! [`MAX_SOLVER_ITERATIONS`]; exceeding the bound is a hard
//! [`UmbraError::NonConvergence`] error.
//!
//! The converged contact instants are checked for chronological order. A
//! violation is logged as an advisory only: the sign conventions of the
//! reference formulas are known to be ambiguous in borderline cases, so this
//! is not treated as a defect in the input data.

use camino::Utf8Path;
use itertools::Itertools;
use log::{debug, warn};

use crate::besselian::BesselianElements;
use crate::constants::{CONVERGENCE_THRESHOLD, MAX_SOLVER_ITERATIONS, SOLAR_RADIUS};
use crate::display::{EclipseDisplay, PartialPhase, TimelineEvent};
use crate::eclipse_type::EclipseType;
use crate::errors::UmbraError;
use crate::location::Location;
use crate::lookup::BesselianElementsLookup;
use crate::worksheet::{ContactEdge, ShadowCone, Worksheet};

/// Compute the local circumstances of one eclipse at one location.
///
/// Borrowed inputs are immutable for the lifetime of the computation; every
/// solver iteration builds a fresh [`Worksheet`] against them.
pub struct LocalCircumstances<'a> {
    location: &'a Location,
    bessel: &'a BesselianElements,
    /// TT − UTC, seconds.
    delta_t: f64,
    /// Spacing of the partial-phase samples, minutes. Must be at least one;
    /// a zero spacing would make the sampling loop step in place.
    gap_minutes: u32,
}

impl<'a> LocalCircumstances<'a> {
    pub fn new(
        location: &'a Location,
        bessel: &'a BesselianElements,
        delta_t: f64,
        gap_minutes: u32,
    ) -> LocalCircumstances<'a> {
        LocalCircumstances {
            location,
            bessel,
            delta_t,
            gap_minutes,
        }
    }

    /// Run all four stages.
    ///
    /// Returns `Ok(None)` when there is no eclipse at this location on the
    /// eclipse date (an expected outcome, not an error).
    pub fn compute(&self) -> Result<Option<EclipseDisplay>, UmbraError> {
        if self.gap_minutes == 0 {
            return Err(UmbraError::ZeroSampleSpacing);
        }
        let max_eclipse = self.solve_local_max()?;
        if max_eclipse.magnitude() < 0.0 {
            debug!(
                "no eclipse at {} on the given date (magnitude {:.4})",
                self.location,
                max_eclipse.magnitude()
            );
            return Ok(None);
        }
        debug!("local maximum eclipse at UTC {}\n{max_eclipse}", max_eclipse.utc());

        let start_partial =
            self.solve_contact(ContactEdge::Start, ShadowCone::Penumbra, &max_eclipse)?;
        let end_partial =
            self.solve_contact(ContactEdge::End, ShadowCone::Penumbra, &max_eclipse)?;
        self.confirm_order(&[&start_partial, &end_partial]);

        let local_type = max_eclipse.local_eclipse_type();
        let (start_umbral, end_umbral) = if local_type != EclipseType::Partial {
            let start = self.solve_contact(ContactEdge::Start, ShadowCone::Umbra, &max_eclipse)?;
            let end = self.solve_contact(ContactEdge::End, ShadowCone::Umbra, &max_eclipse)?;
            self.confirm_order(&[&start_partial, &start, &end, &end_partial]);
            (Some(start), Some(end))
        } else {
            (None, None)
        };

        let phases_before = self.partial_phases(
            ContactEdge::Start,
            &max_eclipse,
            &start_partial,
            &end_partial,
            start_umbral.as_ref(),
            end_umbral.as_ref(),
        );
        let phases_after = self.partial_phases(
            ContactEdge::End,
            &max_eclipse,
            &start_partial,
            &end_partial,
            start_umbral.as_ref(),
            end_umbral.as_ref(),
        );

        let timeline_events = self.timeline(
            &max_eclipse,
            &start_partial,
            &end_partial,
            start_umbral.as_ref(),
            end_umbral.as_ref(),
            &phases_before,
            &phases_after,
        );

        Ok(Some(EclipseDisplay {
            eclipse_type: local_type,
            partial_starts: start_partial.local_civil_time(),
            partial_ends: end_partial.local_civil_time(),
            max_eclipse: self.partial_phase_from(&max_eclipse),
            phases_before,
            phases_after,
            altitude: max_eclipse.altitude,
            azimuth: max_eclipse.azimuth,
            magnitude: max_eclipse.magnitude(),
            totality_annularity_starts: start_umbral.as_ref().map(Worksheet::local_civil_time),
            totality_annularity_ends: end_umbral.as_ref().map(Worksheet::local_civil_time),
            timeline_events,
        }))
    }

    /// Stage 1: converge on the instant of local maximum eclipse.
    fn solve_local_max(&self) -> Result<Worksheet<'a>, UmbraError> {
        let mut worksheet = Worksheet::compute(0.0, self.delta_t, self.bessel, self.location);
        for _ in 0..MAX_SOLVER_ITERATIONS {
            if worksheet.correction_to_max_eclipse().abs() <= CONVERGENCE_THRESHOLD {
                return Ok(worksheet);
            }
            let t = worksheet.t + worksheet.correction_to_max_eclipse();
            worksheet = Worksheet::compute(t, self.delta_t, self.bessel, self.location);
        }
        Err(UmbraError::NonConvergence {
            stage: "local maximum eclipse",
            max_iterations: MAX_SOLVER_ITERATIONS,
        })
    }

    /// Stages 2 and 3: converge on one contact instant, seeded from the
    /// local maximum.
    fn solve_contact(
        &self,
        edge: ContactEdge,
        cone: ShadowCone,
        local_max: &Worksheet<'a>,
    ) -> Result<Worksheet<'a>, UmbraError> {
        let seed = local_max.t + local_max.initial_contact_correction(edge, cone);
        let mut worksheet = Worksheet::compute(seed, self.delta_t, self.bessel, self.location);
        for _ in 0..MAX_SOLVER_ITERATIONS {
            if worksheet.contact_correction(edge, cone).abs() <= CONVERGENCE_THRESHOLD {
                return Ok(worksheet);
            }
            let t = worksheet.t + worksheet.contact_correction(edge, cone);
            worksheet = Worksheet::compute(t, self.delta_t, self.bessel, self.location);
        }
        Err(UmbraError::NonConvergence {
            stage: "contact time",
            max_iterations: MAX_SOLVER_ITERATIONS,
        })
    }

    /// Advisory check that converged contacts are in chronological order.
    ///
    /// The sign conventions of the reference formulas can produce borderline
    /// inversions; those are logged, never fatal.
    fn confirm_order(&self, worksheets: &[&Worksheet<'_>]) {
        for pair in worksheets.windows(2) {
            if pair[0].utc() > pair[1].utc() {
                warn!(
                    "unexpected time order: {} is after {}",
                    pair[0].utc(),
                    pair[1].utc()
                );
            }
        }
    }

    /// Stage 4: the partial-phase snapshots on one side of the eclipse.
    #[allow(clippy::too_many_arguments)]
    fn partial_phases(
        &self,
        edge: ContactEdge,
        local_max: &Worksheet<'a>,
        start_partial: &Worksheet<'a>,
        end_partial: &Worksheet<'a>,
        start_umbral: Option<&Worksheet<'a>>,
        end_umbral: Option<&Worksheet<'a>>,
    ) -> Vec<PartialPhase> {
        self.evenly_spaced_times(edge, local_max, start_partial, end_partial, start_umbral, end_umbral)
            .into_iter()
            .map(|t| {
                let worksheet = Worksheet::compute(t, self.delta_t, self.bessel, self.location);
                self.partial_phase_from(&worksheet)
            })
            .collect()
    }

    /// Sample times for the partial phases, as hours from T0.
    ///
    /// Evenly spaced around a base time, always strictly between the start
    /// and end of the partial eclipse. For a total eclipse the base times
    /// are the start/end of totality; otherwise the local maximum.
    #[allow(clippy::too_many_arguments)]
    fn evenly_spaced_times(
        &self,
        edge: ContactEdge,
        local_max: &Worksheet<'a>,
        start_partial: &Worksheet<'a>,
        end_partial: &Worksheet<'a>,
        start_umbral: Option<&Worksheet<'a>>,
        end_umbral: Option<&Worksheet<'a>>,
    ) -> Vec<f64> {
        let base = self.base_time(edge, local_max, start_umbral, end_umbral);
        let mut times = Vec::new();
        let mut count = 1u32;
        loop {
            let t = base + edge.sign() * count as f64 * self.gap_minutes as f64 / 60.0;
            if start_partial.t < t && t < end_partial.t {
                times.push(t);
                count += 1;
            } else {
                break;
            }
        }
        times
    }

    /// The reference time the partial-phase spacing is measured from.
    fn base_time(
        &self,
        edge: ContactEdge,
        local_max: &Worksheet<'a>,
        start_umbral: Option<&Worksheet<'a>>,
        end_umbral: Option<&Worksheet<'a>>,
    ) -> f64 {
        if local_max.local_eclipse_type() == EclipseType::Total {
            match edge {
                // totality contacts exist whenever the local type is Total
                ContactEdge::Start => start_umbral.map(|w| w.t).unwrap_or(local_max.t),
                ContactEdge::End => end_umbral.map(|w| w.t).unwrap_or(local_max.t),
            }
        } else {
            local_max.t
        }
    }

    /// Make a diagram with the Sun's radius 1.0 and the Moon's radius A to
    /// follow this: G is the covered fraction of the Sun's *diameter*, so
    /// the center-to-center distance is 1 − 2G + A.
    fn partial_phase_from(&self, worksheet: &Worksheet<'_>) -> PartialPhase {
        PartialPhase {
            when: worksheet.local_civil_time(),
            zenith_angle: worksheet.zenith_angle,
            lunar_solar_distance: SOLAR_RADIUS - 2.0 * worksheet.magnitude()
                + worksheet.diameter_ratio,
            lunar_radius: worksheet.diameter_ratio,
            magnitude: worksheet.magnitude(),
            altitude: worksheet.altitude,
        }
    }

    /// The display timeline, branched on the local eclipse type.
    #[allow(clippy::too_many_arguments)]
    fn timeline(
        &self,
        local_max: &Worksheet<'a>,
        start_partial: &Worksheet<'a>,
        end_partial: &Worksheet<'a>,
        start_umbral: Option<&Worksheet<'a>>,
        end_umbral: Option<&Worksheet<'a>>,
        phases_before: &[PartialPhase],
        phases_after: &[PartialPhase],
    ) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        match local_max.local_eclipse_type() {
            EclipseType::Total => {
                let (start_totality, end_totality) = match (start_umbral, end_umbral) {
                    (Some(start), Some(end)) => (start, end),
                    _ => return events,
                };
                events.push(event_for("Start of the partial phase.", start_partial, start_totality));
                events.push(self.offset_event(
                    "Shadows of pinholes start to appear strange.",
                    20.0,
                    ContactEdge::Start,
                    local_max,
                    start_umbral,
                    end_umbral,
                ));
                events.push(self.offset_event(
                    "Shadow-bands may appear on the ground, buildings.",
                    2.0,
                    ContactEdge::Start,
                    local_max,
                    start_umbral,
                    end_umbral,
                ));
                events.push(self.offset_event(
                    "Baily's beads/diamond ring start.",
                    10.0 / 60.0,
                    ContactEdge::Start,
                    local_max,
                    start_umbral,
                    end_umbral,
                ));
                events.push(event_for(
                    "TOTALITY STARTS. View with naked eye, unfiltered.",
                    start_totality,
                    start_totality,
                ));
                events.push(event_for("Maximum eclipse.", local_max, local_max));
                events.push(event_for(
                    "TOTALITY ENDS. Resume viewing with filter.",
                    end_totality,
                    end_totality,
                ));
                events.push(self.offset_event(
                    "Baily's beads/diamond ring just after totality.",
                    3.0 / 60.0,
                    ContactEdge::End,
                    local_max,
                    start_umbral,
                    end_umbral,
                ));
                events.push(self.offset_event(
                    "Shadow-bands no longer appear on the ground, buildings.",
                    2.0,
                    ContactEdge::End,
                    local_max,
                    start_umbral,
                    end_umbral,
                ));
                events.push(self.offset_event(
                    "Shadows of pinholes no longer appear strange.",
                    20.0,
                    ContactEdge::End,
                    local_max,
                    start_umbral,
                    end_umbral,
                ));
                events.push(event_for("End of the partial phase.", end_partial, end_totality));
            }
            EclipseType::Partial => {
                events.push(event_for("Start of the partial phase.", start_partial, local_max));
                events.extend(events_for("Partial phase increasing.", phases_before, local_max));
                events.push(event_for("MAXIMUM eclipse.", local_max, local_max));
                events.extend(events_for("Partial phase decreasing.", phases_after, local_max));
                events.push(event_for("End of the partial phase.", end_partial, local_max));
            }
            EclipseType::Annular => {
                events.push(event_for("Start of the partial phase.", start_partial, local_max));
                events.extend(events_for("Partial phase increasing.", phases_before, local_max));
                if let Some(start) = start_umbral {
                    events.push(event_for("ANNULARITY STARTS.", start, local_max));
                }
                events.push(event_for("Maximum eclipse.", local_max, local_max));
                if let Some(end) = end_umbral {
                    events.push(event_for("ANNULARITY ENDS.", end, local_max));
                }
                events.extend(events_for("Partial phase decreasing.", phases_after, local_max));
                events.push(event_for("End of the partial phase.", end_partial, local_max));
            }
            EclipseType::Hybrid | EclipseType::None => (),
        }
        events.into_iter().sorted().collect()
    }

    /// An event a fixed number of decimal minutes away from the base time of
    /// the given edge.
    fn offset_event(
        &self,
        text: &str,
        minutes: f64,
        edge: ContactEdge,
        local_max: &Worksheet<'a>,
        start_umbral: Option<&Worksheet<'a>>,
        end_umbral: Option<&Worksheet<'a>>,
    ) -> TimelineEvent {
        let base_t = self.base_time(edge, local_max, start_umbral, end_umbral);
        let t = base_t + edge.sign() * minutes / 60.0;
        let worksheet = Worksheet::compute(t, self.delta_t, self.bessel, self.location);
        let base = Worksheet::compute(base_t, self.delta_t, self.bessel, self.location);
        event_for(text, &worksheet, &base)
    }
}

fn event_for(text: &str, worksheet: &Worksheet<'_>, base: &Worksheet<'_>) -> TimelineEvent {
    TimelineEvent::new(
        worksheet.local_civil_time(),
        text,
        worksheet.local_civil_time() - base.local_civil_time(),
        worksheet.magnitude(),
        worksheet.altitude,
    )
}

fn events_for(text: &str, phases: &[PartialPhase], base: &Worksheet<'_>) -> Vec<TimelineEvent> {
    phases
        .iter()
        .map(|phase| {
            TimelineEvent::new(
                phase.when,
                text,
                phase.when - base.local_civil_time(),
                phase.magnitude,
                phase.altitude,
            )
        })
        .collect()
}

/// Look up the eclipse of the given calendar date and compute its local
/// circumstances in one call.
///
/// Returns `Ok(None)` either when no eclipse is tabulated for the date or
/// when the eclipse is not visible at the location.
pub fn local_circumstances(
    elements_csv: &Utf8Path,
    year: i32,
    month: u8,
    day: u8,
    location: &Location,
    delta_t: f64,
    gap_minutes: u32,
) -> Result<Option<EclipseDisplay>, UmbraError> {
    let lookup = BesselianElementsLookup::new(elements_csv);
    let Some(bessel) = lookup.lookup(year, month, day)? else {
        return Ok(None);
    };
    LocalCircumstances::new(location, &bessel, delta_t, gap_minutes).compute()
}
