//! Statistics for the mirror

pub mod metrics;

pub use metrics::MirrorStats;
