//! Eligibility determination engine for means-tested benefit schemes.
//!
//! This crate records applicants and their household members, defines benefit
//! schemes composed of criteria groups, and decides whether a given applicant
//! qualifies for a scheme. The decision core lives in [`eligibility`] and is a
//! pure function over already-loaded records; the HTTP surface and the
//! in-memory store live in [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod eligibility;
pub mod error;
pub mod models;
