//! Patient-flow analytics.

pub mod bottleneck;
