pub mod charts;
pub mod commentary;
pub mod error;
pub mod metrics;
pub mod service;
pub mod session;
pub mod source;
pub mod staffing;

pub use error::{DashboardError, DashboardResult};
pub use session::DashboardSession;
