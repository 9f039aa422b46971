//! Portal Client
//!
//! The consumer side of the case portal API:
//!
//! - [`PortalClient`]: typed calls over `reqwest`
//! - [`SessionManager`]: login, hydration from a persisted token, logout
//! - [`guard`]: which page a session may see
//! - [`views`]: dashboard view models built on the status engine
//! - [`ReceivedCase`]: case bodies decoded leniently, keeping unknown statuses

pub mod api;
pub mod error;
pub mod guard;
pub mod session;
pub mod views;
pub mod wire;

pub use api::PortalClient;
pub use error::ClientError;
pub use guard::{guard, home_for, Route, RouteDecision};
pub use session::{
    FileTokenStore, MemoryTokenStore, Session, SessionManager, SessionState, StoredToken,
    TokenStore,
};
pub use views::{
    AdminCaseView, AdminDashboardView, CaseRow, ClientDashboardView, DocumentRow, HistoryRow,
    StatusForm, StatusOption, TimelineRow,
};
pub use wire::ReceivedCase;
