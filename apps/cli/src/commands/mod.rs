//! # Commands Module
//!
//! Everything the `salesdesk` binary can do, as plain functions.
//!
//! ## Command Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs (clap)                                                         │
//! │     │  salesdesk report payments --from 2026-02-01 --search ana         │
//! │     ▼                                                                   │
//! │  pub async fn payment_report(                                           │
//! │      db: &DbState,            ◄── State the command needs               │
//! │      query: &ReportQuery,     ◄── Parsed arguments                      │
//! │  ) -> Result<PaymentReportResponse, ApiError>                           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  render.rs (table)  or  serde_json (--json)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they use: form edits need `EncoderState`,
//! reports need `DbState`, saves need both plus `ConfigState`.

pub mod cash;
pub mod encoder;
pub mod forms;
pub mod options;
pub mod report;
