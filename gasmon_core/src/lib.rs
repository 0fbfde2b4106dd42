#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Gas cylinder state tracking (transport-agnostic).
//!
//! This crate turns a stream of status samples into the monitor's persisted
//! state. All I/O goes through `gasmon_traits::StatusSource`,
//! `gasmon_traits::Clock` and the `store::StateStore` trait.
//!
//! ## Architecture
//!
//! - **Metrics**: fill percentage, status tier, status card (`metrics`)
//! - **Readings**: bounded FIFO weight series for charts (`readings`)
//! - **Swap engine**: counter-based swap detection (`engine`)
//! - **State**: the persisted document and its mutations (`state`)
//! - **Storage**: atomic JSON file and in-memory stores (`store`)
//! - **Polling**: single-flight poller thread (`poller`)
//! - **Monitor**: applies poll results and persists (`monitor`)

pub mod conversions;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod metrics;
pub mod mocks;
pub mod monitor;
pub mod poller;
pub mod readings;
pub mod settings;
pub mod state;
pub mod store;
pub mod util;

pub use engine::{SwapTracker, Transition};
pub use error::MonitorError;
pub use history::{SwapHistory, SwapRecord};
pub use metrics::{StatusCard, StatusTier, net_gas_weight, percentage};
pub use monitor::{Connectivity, Dashboard, Monitor, TickOutcome};
pub use poller::{PollEvent, Poller, poll_once};
pub use readings::{Reading, ReadingBuffer};
pub use settings::{Settings, SettingsPatch};
pub use state::GasState;
pub use store::{JsonFileStore, MemoryStore, StateStore};
