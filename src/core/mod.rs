//! # Core Session Logic
//!
//! This module contains the tab session engine. It knows nothing about any
//! specific UI technology or storage backend.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (tab state)  │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. Pure.          │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    CLI     │      │   Store    │      │  Renderer  │
//!     │   driver   │      │ (history,  │      │ (external) │
//!     │            │      │  scroll)   │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` struct with open tabs, active tab, scroll map
//! - [`tabs`]: The closed tab variant set and payloads
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: TOML configuration with layered overrides

pub mod action;
pub mod config;
pub mod state;
pub mod tabs;
