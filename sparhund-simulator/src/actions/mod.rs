//! Action units: each performs one real-world side effect and appends
//! the corresponding record to the run's event store.

mod file;
mod network;
mod process;
