//! Market Lens terminal client: talks to the proxy, renders analyses, exports
//! PDF reports and records usage analytics.

pub mod api;
pub mod config;
pub mod db;
pub mod render;
pub mod report;
pub mod session;
