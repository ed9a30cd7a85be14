//! Time and Leave Accounting Engine
//!
//! This crate implements the attendance and leave accounting core of an HR
//! back office: clock events become daily attendance records with arrival
//! classification and worked/effective/overtime minutes, and leave requests
//! become per-day ledger entries (weekly offs, holidays, half days, sandwich
//! rule) with balance reconciliation over the request lifecycle.
//!
//! The engine never talks to storage directly; workflow operations take the
//! records the caller loaded and return the mutated records for the caller
//! to persist.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod workflow;
