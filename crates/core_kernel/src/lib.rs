//! Core Kernel - Foundational types shared by every crate of the case portal
//!
//! This crate provides the building blocks used across the domain, API and
//! client layers:
//! - Strongly-typed identifiers for clients, users and uploaded files
//! - The port error type and marker traits for the ports-and-adapters layout
//! - Adapter health reporting and per-operation metadata

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClientId, UserId, FileId, HistoryEntryId};
pub use ports::{
    PortError, DomainPort, OperationMetadata,
    AdapterHealth, HealthCheckResult, HealthCheckable,
};
