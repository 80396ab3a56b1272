//! Terminal dashboard for exploring per-player football season statistics:
//! percentile pizza charts and a per-90 scatter explorer over a typed
//! in-memory stat table.

pub mod dataset;
pub mod export;
pub mod normalize;
pub mod persist;
pub mod pizza;
pub mod rankings;
pub mod sample_data;
pub mod scatter;
pub mod state;
