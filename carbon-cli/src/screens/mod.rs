//! One module per route, plus the login modal. Each screen runs until the
//! user navigates away and reports where to go next.

pub mod auth;
pub mod dashboard;
pub mod estimate;
pub mod history;
pub mod landing;
pub mod quiz;
pub mod regional;
