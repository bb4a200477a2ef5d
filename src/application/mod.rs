//! Application layer - the editing session and its services.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! - `ProposalSession` owns the record and persists every edit
//! - `RefinementService` turns the fallible refiner port into infallible calls

pub mod refinement;
pub mod session;

pub use refinement::RefinementService;
pub use session::{today_issue_date, ProposalSession, SessionError, ISSUE_DATE_FORMAT};
