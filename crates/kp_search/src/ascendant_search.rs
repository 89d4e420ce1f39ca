//! Find the moment the ascendant enters a target arc.
//!
//! Phase 1 samples the window at a coarse step and unwraps the ascendant
//! into a cumulative angle, so crossings of 0° look like any other
//! crossing. The first sample pair (chronologically) that straddles an
//! image of the target midpoint is the bracket. Phase 2 bisects on
//! `unwrap(asc(t)) - target` inside it.
//!
//! Near the poles the ascendant can sweep several signs in minutes and run
//! backwards briefly. A bisection that closes on a point outside the
//! target is treated as a false bracket: that bracket is sampled again at a
//! finer step and searched the same way, a few levels deep. A bracket that
//! stays false is given up and the scan moves on to the next crossing in
//! the window. Only the iteration cap ends the search without an inside
//! point; a window that never reaches the target is `NoSolutionFound`.

use kp_vedic_base::normalize_pm180;
use tracing::{debug, warn};

use crate::ascendant::AscendantFunction;
use crate::ascendant_search_types::{
    AscendantSearchConfig, DegreeInterval, SearchResult, SearchWindow,
};
use crate::error::SearchError;

/// Upper bound on coarse samples for one window.
pub const MAX_COARSE_SAMPLES: usize = 200_000;

/// Re-sampling depth allowed under one false bracket.
const MAX_REFINEMENTS: u32 = 3;

#[derive(Debug, Clone, Copy)]
struct Sample {
    jd: f64,
    deg: f64,
    /// Cumulative ascendant along the sample chain.
    unwrapped: f64,
}

/// Indices into the sample slice the bracket was found in.
#[derive(Debug, Clone, Copy)]
enum Bracket {
    /// Samples `at` and `at + 1` straddle `target` in unwrapped angle.
    Straddle { at: usize, target: f64 },
    /// No straddle comes first, but this sample is already inside.
    Inside(usize),
}

enum Bisection {
    Converged(Sample),
    /// Bracket collapsed outside the interval at this moment.
    Outside(f64),
    Exhausted,
}

enum Scan {
    /// Inside the target; `true` when reached by bisection.
    Found(Sample, bool),
    Exhausted,
    NotFound,
}

struct Searcher<'a, A: ?Sized> {
    f: &'a A,
    interval: DegreeInterval,
    config: &'a AscendantSearchConfig,
    evaluations: u32,
    iterations: u32,
    /// Best bisection point so far: inside beats outside, then smaller residual.
    best: Option<(Sample, bool, f64)>,
    /// Smallest distance to the interval over every evaluation.
    closest_deg: f64,
    /// Moments where a bisection collapsed outside the interval.
    collapses: Vec<f64>,
}

/// Earliest moment in `window` at which the ascendant lies in `target`.
///
/// Returns the first crossing in chronological order when the window
/// contains several. Errors from the ascendant function are surfaced
/// unchanged, carrying the failing moment.
pub fn find_time<A>(
    f: &A,
    target: DegreeInterval,
    window: SearchWindow,
    config: &AscendantSearchConfig,
) -> Result<SearchResult, SearchError>
where
    A: AscendantFunction + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    window.validate()?;
    DegreeInterval::new(target.start_deg, target.end_deg)?;

    let mut searcher = Searcher {
        f,
        interval: target,
        config,
        evaluations: 0,
        iterations: 0,
        best: None,
        closest_deg: f64::INFINITY,
        collapses: Vec::new(),
    };

    let samples = searcher.sample(window.start_jd_ut, window.end_jd_ut, config.step_days)?;
    match searcher.scan(&samples, 0)? {
        Scan::Found(s, bisected) => {
            let mut result = searcher.result(s, true);
            if !bisected {
                // taken as sampled, not aimed at the midpoint
                debug!(jd_ut = s.jd, "coarse sample already inside target");
                result.residual_deg = target.distance_deg(s.deg);
            }
            Ok(result)
        }
        Scan::Exhausted => {
            let (best, ..) = searcher.best.unwrap_or((samples[0], false, f64::INFINITY));
            let result = searcher.result(best, false);
            warn!(
                jd_ut = result.jd_ut,
                residual_deg = result.residual_deg,
                iterations = result.iterations_used,
                "ascendant search hit the iteration cap; returning best point"
            );
            Ok(result)
        }
        Scan::NotFound => {
            debug!(
                best_residual_deg = searcher.closest_deg,
                evaluations = searcher.evaluations,
                "no crossing of target in window"
            );
            Err(SearchError::NoSolutionFound {
                best_residual_deg: searcher.closest_deg,
            })
        }
    }
}

impl<A: AscendantFunction + ?Sized> Searcher<'_, A> {
    fn eval(&mut self, jd: f64) -> Result<f64, SearchError> {
        self.evaluations += 1;
        let deg = self.f.evaluate(jd)?;
        self.closest_deg = self.closest_deg.min(self.interval.distance_deg(deg));
        Ok(deg)
    }

    fn sample(&mut self, start: f64, end: f64, step: f64) -> Result<Vec<Sample>, SearchError> {
        let intervals = ((end - start) / step).ceil().max(1.0);
        if intervals >= MAX_COARSE_SAMPLES as f64 {
            return Err(SearchError::InvalidConfig("window too long for the sampling step"));
        }
        let n = intervals as usize;
        let mut samples: Vec<Sample> = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let jd = if i == n {
                end
            } else {
                start + (end - start) * i as f64 / n as f64
            };
            let deg = self.eval(jd)?;
            let unwrapped = match samples.last() {
                Some(prev) => prev.unwrapped + normalize_pm180(deg - prev.deg),
                None => deg,
            };
            samples.push(Sample { jd, deg, unwrapped });
        }
        Ok(samples)
    }

    /// Walk the brackets of `samples` in time order until one yields an
    /// inside point. False brackets are re-sampled `depth + 1` levels down,
    /// then skipped.
    fn scan(&mut self, samples: &[Sample], depth: u32) -> Result<Scan, SearchError> {
        let mut from = 0;
        while let Some(bracket) = self.find_bracket(&samples[from..]) {
            let (at, image) = match bracket {
                Bracket::Inside(j) => return Ok(Scan::Found(samples[from + j], false)),
                Bracket::Straddle { at, target } => (from + at, target),
            };
            let (lo, hi) = (samples[at], samples[at + 1]);
            debug!(lo = lo.jd, hi = hi.jd, target = image, depth, "bracketed target midpoint");

            // A bracket around a known collapse would close on it again.
            if !self.collapses.iter().any(|&t| lo.jd <= t && t <= hi.jd) {
                match self.bisect(lo, hi, image)? {
                    Bisection::Converged(s) => return Ok(Scan::Found(s, true)),
                    Bisection::Exhausted => return Ok(Scan::Exhausted),
                    Bisection::Outside(t) => self.collapses.push(t),
                }
            }
            if depth < MAX_REFINEMENTS {
                let step = (hi.jd - lo.jd) / f64::from(self.config.refine_factor);
                debug!(depth, step_days = step, "false bracket, re-sampling");
                let finer = self.sample(lo.jd, hi.jd, step)?;
                match self.scan(&finer, depth + 1)? {
                    Scan::NotFound => {}
                    found => return Ok(found),
                }
            }
            debug!(lo = lo.jd, hi = hi.jd, depth, "giving up false bracket");
            from = at + 1;
        }
        Ok(Scan::NotFound)
    }

    fn find_bracket(&self, samples: &[Sample]) -> Option<Bracket> {
        let midpoint = self.interval.midpoint_deg();
        let straddle = samples.windows(2).enumerate().find_map(|(i, w)| {
            straddled_image(w[0].unwrapped, w[1].unwrapped, midpoint).map(|t| (i, t))
        });
        let first_inside = samples.iter().position(|s| self.interval.contains(s.deg));

        match (straddle, first_inside) {
            // an earlier pass through the interval that never reached the midpoint
            (Some((i, _)), Some(j))
                if j < i && samples[j + 1..=i].iter().any(|s| !self.interval.contains(s.deg)) =>
            {
                Some(Bracket::Inside(j))
            }
            (Some((at, target)), _) => Some(Bracket::Straddle { at, target }),
            (None, Some(j)) => Some(Bracket::Inside(j)),
            (None, None) => None,
        }
    }

    fn bisect(&mut self, lo: Sample, hi: Sample, target: f64) -> Result<Bisection, SearchError> {
        for s in [lo, hi] {
            if s.unwrapped == target && self.interval.contains(s.deg) {
                return Ok(Bisection::Converged(s));
            }
        }
        let rate = ((hi.unwrapped - lo.unwrapped) / (hi.jd - lo.jd)).abs();
        let time_tolerance = if rate > 0.0 {
            self.config.tolerance_deg / rate
        } else {
            f64::EPSILON
        };

        let (mut a, mut b) = (lo, hi);
        while self.iterations < self.config.max_iterations {
            self.iterations += 1;
            let jd = 0.5 * (a.jd + b.jd);
            let deg = self.eval(jd)?;
            let mid = Sample {
                jd,
                deg,
                unwrapped: a.unwrapped + normalize_pm180(deg - a.deg),
            };
            let inside = self.interval.contains(deg);
            self.consider(mid, inside);

            if (a.unwrapped - target) * (mid.unwrapped - target) <= 0.0 {
                b = mid;
            } else {
                a = mid;
            }

            if b.jd - a.jd < time_tolerance {
                return Ok(if inside {
                    Bisection::Converged(mid)
                } else {
                    Bisection::Outside(mid.jd)
                });
            }
        }
        Ok(Bisection::Exhausted)
    }

    fn consider(&mut self, s: Sample, inside: bool) {
        let residual = self.interval.midpoint_residual_deg(s.deg);
        let better = match self.best {
            None => true,
            Some((_, best_inside, best_residual)) => {
                (inside && !best_inside) || (inside == best_inside && residual < best_residual)
            }
        };
        if better {
            self.best = Some((s, inside, residual));
        }
    }

    fn result(&self, s: Sample, converged: bool) -> SearchResult {
        SearchResult {
            jd_ut: s.jd,
            achieved_ascendant_deg: s.deg,
            residual_deg: self.interval.midpoint_residual_deg(s.deg),
            iterations_used: self.iterations,
            evaluations: self.evaluations,
            converged,
        }
    }
}

/// Image `target + 360k` lying in the closed range spanned by `a` and `b`,
/// if any.
fn straddled_image(a: f64, b: f64, target: f64) -> Option<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let k = ((lo - target) / 360.0).ceil();
    let image = target + 360.0 * k;
    (image <= hi).then_some(image)
}
