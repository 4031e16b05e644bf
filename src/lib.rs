// SPDX-License-Identifier: Apache-2.0

//! Boolean logic networks whose nodes are described by covers (sum-of-cubes
//! with an ON/OFF-set polarity) over an arbitrary number of fanins.
//!
//! See `network` for the core `CoverNetwork` type.

pub mod compact;
pub mod cube;
mod display;
pub mod error;
pub mod events;
pub mod gate_builder;
pub mod network;
mod scratch;
pub mod sim;
pub mod stats;
pub mod storage;
pub mod strash;
mod substitute;
pub mod topo;
mod traversal;
pub mod truth_table;

pub use cube::{Cover, Cube, MAX_FANIN};
pub use error::CoverError;
pub use events::{NetworkEvents, SubscriptionId};
pub use gate_builder::{PrimitiveGate, ReductionKind};
pub use network::{CoverNetwork, CoverNetworkOptions};
pub use storage::{CoverRef, NodeRef, ResetValue, Signal};
pub use truth_table::TruthTable;
