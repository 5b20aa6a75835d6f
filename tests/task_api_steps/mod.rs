//! Step definitions for task API scenarios.

mod when;
