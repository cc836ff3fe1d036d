//! Application layer: coordinates loading and view queries on top of the
//! domain services.

pub mod dashboard_service;

pub use dashboard_service::{DashboardData, DashboardService, DashboardView};
