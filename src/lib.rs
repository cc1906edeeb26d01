pub mod config;
pub mod kinematics;
pub mod messages;
pub mod runtime;
pub mod store;
