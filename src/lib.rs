//! Canvas state controller for the product collaboration board.
//!
//! This crate owns the full lifecycle of one open project canvas: translating
//! pointer and wheel events into drag sessions and viewport changes, keeping
//! the placed artifact cards in memory, and firing optimistic position saves
//! through an async store when a drag ends. Rendering and transport are the
//! host's problem; everything here is driven by plain method calls and is
//! testable headless.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Core state machine and the [`controller::Action`] surface |
//! | [`session`] | Async host glue: snapshot channel, fire-and-forget saves |
//! | [`artifact`] | Artifact cards, template kinds, and the placed-card set |
//! | [`team`] | Team, member, and project records |
//! | [`store`] | Async persistence trait with memory and Postgres backends |
//! | [`viewport`] | Pan/zoom transform and coordinate conversions |
//! | [`input`] | Pointer/wheel event types and the drag session state |
//! | [`consts`] | Shared numeric constants (zoom limits, card sizes, etc.) |

pub mod artifact;
pub mod consts;
pub mod controller;
pub mod input;
pub mod session;
pub mod store;
pub mod team;
pub mod viewport;
