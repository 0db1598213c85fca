//! # Studywatch Core Library
//!
//! This library provides the core business logic for the Studywatch study
//! timer. All time accounting lives here; the CLI binary is a thin display
//! driver over the same core library.
//!
//! ## Architecture
//!
//! - **Session Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for display updates and
//!   break-expiry detection
//! - **Break Policy**: Maps accumulated study time to a break allowance
//! - **Storage**: TOML-based configuration and the most-recent-break record
//!
//! The engine performs no I/O and owns no clock: every operation takes the
//! current timestamp from the caller, so drivers pass `Utc::now()` and tests
//! pass synthetic times.
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core session state machine
//! - [`BreakPolicy`]: Break-length computation
//! - [`Config`]: Application configuration management
//! - [`BreakLog`]: Single-record break log

pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use error::{BreakLogError, ConfigError, CoreError, InvalidOperation};
pub use events::Event;
pub use session::{minutes, BreakPolicy, SessionEngine, SessionState, Tick, INVALID_DISPLAY};
pub use storage::{BreakLog, BreakRecord, Config};
