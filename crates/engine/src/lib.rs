//! Tavern Engine library.
//!
//! Session registry and real-time broadcast core for the tabletop server.
//!
//! ## Structure
//!
//! - `stores/` - The session registry lock and membership side table
//! - `use_cases/` - Registry operations and the idle reaper
//! - `infrastructure/` - Ports, clock, settings, in-memory storage
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
