//! Request and response bodies
//!
//! These types define the JSON wire format and are shared with the portal
//! client, so every one of them is both `Serialize` and `Deserialize`.

pub mod auth;
pub mod clients;
pub mod admin;
pub mod health;

pub use auth::{LoginRequest, LoginResponse, UserResponse};
pub use clients::{CaseResponse, DocumentInfoResponse, SubmissionResponse};
pub use admin::{ListClientsQuery, StatsResponse, UpdateStatusRequest, UpdateStatusResponse};
pub use health::{HealthResponse, ReadinessResponse};
