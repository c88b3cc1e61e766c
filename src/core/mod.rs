//! # Core Application Logic
//!
//! The chat client's state and the rules that change it.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state holder)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No rendering.          │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Speech    │
//!     │  Adapter   │                          │ capability │
//!     │ (ratatui)  │                          │  (trait)   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! The only outside world the core touches is the recognizer, and only
//! through the [`voice::SpeechCapability`] trait.
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`message`]: Chat messages and authors
//! - [`voice`]: Voice capture state machine and the recognizer trait
//! - [`toast`]: Expiring notifications
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod message;
pub mod state;
pub mod toast;
pub mod voice;
