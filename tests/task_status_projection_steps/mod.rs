//! Step definitions for task status projection scenarios.

mod then;
