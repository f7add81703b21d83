use super::catalog::CheckId;
use super::checks::{evaluate, Outcome};
use super::result::{Check, CheckStatus, RunId, ScanResult};
use crate::environment::Environment;
use chrono::Utc;

/// Receives every check transition of a synchronous scan.
pub trait ScanObserver {
    fn on_update(&mut self, run: RunId, check: &Check);
}

struct Silent;

impl ScanObserver for Silent {
    fn on_update(&mut self, _run: RunId, _check: &Check) {}
}

impl<F: FnMut(RunId, &Check)> ScanObserver for F {
    fn on_update(&mut self, run: RunId, check: &Check) {
        self(run, check)
    }
}

/// Owns the battery's state for the current run.
///
/// Every run is tagged with a fresh [`RunId`]. Step-wise updates carrying any
/// other id are dropped, so a superseded run finishing late cannot overwrite
/// the newer one.
#[derive(Debug, Clone)]
pub struct Scanner {
    last_run: u64,
    current: RunId,
    in_flight: bool,
    checks: Vec<Check>,
    result: Option<ScanResult>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            last_run: 0,
            current: RunId(0),
            in_flight: false,
            checks: initial_checks(),
            result: None,
        }
    }

    /// Run the whole battery against `env` and return the completed result.
    pub fn start_scan<E: Environment + ?Sized>(&mut self, env: &E) -> ScanResult {
        self.start_scan_observed(env, &mut Silent)
    }

    /// Like [`Scanner::start_scan`], reporting each transition to `observer`.
    pub fn start_scan_observed<E, O>(&mut self, env: &E, observer: &mut O) -> ScanResult
    where
        E: Environment + ?Sized,
        O: ScanObserver + ?Sized,
    {
        let run = self.begin_run();
        for check in &self.checks {
            observer.on_update(run, check);
        }

        for id in CheckId::ALL {
            let index = id.index();
            self.checks[index].begin();
            observer.on_update(run, &self.checks[index]);

            let outcome = evaluate(id, env);
            self.checks[index].resolve(outcome);
            observer.on_update(run, &self.checks[index]);
        }

        debug_assert!(
            self.checks.iter().all(|c| c.status.is_terminal()),
            "battery finished with unresolved checks"
        );
        let result = ScanResult::aggregate(run, self.checks.clone(), Utc::now());
        self.in_flight = false;
        self.result = Some(result.clone());
        result
    }

    /// Discard the result, return every check to pending, and supersede any
    /// run still in flight.
    pub fn reset_scan(&mut self) {
        self.current = self.next_run_id();
        self.in_flight = false;
        self.checks = initial_checks();
        self.result = None;
    }

    /// Start a step-wise run. Prior state is fully reset before this returns.
    pub fn begin_run(&mut self) -> RunId {
        self.reset_scan();
        self.in_flight = true;
        self.current
    }

    /// `pending -> running` for `id`. Returns false for stale runs or
    /// out-of-order transitions.
    pub fn mark_running(&mut self, run: RunId, id: CheckId) -> bool {
        if !self.accepts(run) {
            return false;
        }
        self.checks[id.index()].begin()
    }

    /// Resolve `id` with `outcome`. Returns false for stale runs or checks
    /// that are not running.
    pub fn record(&mut self, run: RunId, id: CheckId, outcome: Outcome) -> bool {
        if !self.accepts(run) {
            return false;
        }
        self.checks[id.index()].resolve(outcome)
    }

    /// Publish the result of a step-wise run.
    ///
    /// Returns `None` for stale runs. A current run with unresolved checks is
    /// a defect: it panics in debug builds and is left unpublished otherwise.
    pub fn finish(&mut self, run: RunId) -> Option<&ScanResult> {
        if !self.accepts(run) {
            return None;
        }

        match ScanResult::from_checks(run, self.checks.clone(), Utc::now()) {
            Some(result) => {
                self.in_flight = false;
                self.result = Some(result);
                self.result.as_ref()
            }
            None => {
                let unresolved: Vec<&str> = self
                    .checks
                    .iter()
                    .filter(|c| !c.status.is_terminal())
                    .map(|c| c.id.as_str())
                    .collect();
                debug_assert!(false, "run {} finished with unresolved checks: {:?}", run, unresolved);
                crate::buffered_eprintln!(
                    "Scan {} finished with unresolved checks: {}",
                    run,
                    unresolved.join(", ")
                );
                None
            }
        }
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    pub fn current_run(&self) -> RunId {
        self.current
    }

    pub fn is_scanning(&self) -> bool {
        self.in_flight
    }

    /// Check currently being evaluated, if any.
    pub fn running_check(&self) -> Option<CheckId> {
        self.checks
            .iter()
            .find(|c| c.status == CheckStatus::Running)
            .map(|c| c.id)
    }

    /// Checks that have reached a terminal state.
    pub fn completed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_terminal()).count()
    }

    fn accepts(&self, run: RunId) -> bool {
        self.in_flight && run == self.current
    }

    fn next_run_id(&mut self) -> RunId {
        self.last_run += 1;
        RunId(self.last_run)
    }
}

fn initial_checks() -> Vec<Check> {
    CheckId::ALL.into_iter().map(Check::pending).collect()
}
