//! Core data model: identifiers and two-agent allocations.

pub mod allocation;
pub mod id;

pub use allocation::{Allocation, Bundle};
pub use id::{AgentId, Category, ItemId};
