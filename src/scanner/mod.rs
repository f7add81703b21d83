pub mod catalog;
pub mod checks;
pub mod engine;
pub mod grade;
pub mod result;

pub use catalog::{battery_max_score, CheckId};
pub use checks::{evaluate, Outcome, Verdict, AUTOMATION_MARKERS};
pub use engine::{ScanObserver, Scanner};
pub use grade::Grade;
pub use result::{Check, CheckStatus, ResultSummary, RunId, ScanResult};
