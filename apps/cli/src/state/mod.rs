//! # State Module
//!
//! Application state shared by the commands of one CLI invocation.
//!
//! Each command takes only the state it needs instead of one `AppState`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  main.rs builds the states once, then dispatches:                       │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐               │
//! │  │   DbState    │  │ EncoderState │  │   ConfigState    │               │
//! │  │              │  │              │  │                  │               │
//! │  │  Database    │  │  Arc<Mutex<  │  │  location        │               │
//! │  │  (SQLite     │  │  EncoderForm │  │  user_id         │               │
//! │  │   pool)      │  │  >>          │  │  currency        │               │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘               │
//! │                                                                         │
//! │  • DbState: Database has an internal connection pool                    │
//! │  • EncoderState: form edits go through the Mutex                        │
//! │  • ConfigState: read-only after startup                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod encoder;

pub use config::ConfigState;
pub use db::DbState;
pub use encoder::EncoderState;
