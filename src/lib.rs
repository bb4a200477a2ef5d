//! MotionFlow - Commercial Proposal Generator
//!
//! This crate turns a structured proposal record into a styled, print-ready
//! document for motion design studios, with optional AI copy refinement.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
