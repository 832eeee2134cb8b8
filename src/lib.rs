//! Filter-and-aggregate engine for bike-share trip logs.
//!
//! The pipeline is [`catalog::Catalog::load`] → [`normalize::normalize`] →
//! [`filter::filter`] → [`stats::compute_statistics`], with [`output`]
//! rendering the resulting report.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod stats;

pub use catalog::{Catalog, City};
pub use error::{ExploreError, Result};
pub use filter::{Day, FilteredView, Month, Selection, Selector, filter};
pub use normalize::{NormalizedDataset, Trip, normalize};
pub use stats::{StatisticsReport, compute_statistics};
