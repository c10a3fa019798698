pub mod bridge;
pub mod context;
pub mod session;
