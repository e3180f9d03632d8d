//! The retrieval side of the pipeline: context expansion around a citation,
//! hybrid gathering of recommended + corpus-search passages, and the
//! order-preserving merge that feeds annotation.

pub mod context;
pub mod merge;
pub mod retrieve;
