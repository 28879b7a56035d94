//! # Order Pipeline
//!
//! > **Batch validation and consolidation of customer orders.**
//!
//! This crate reads a day's order lines, checks them against a product catalog,
//! merges the lines of each order into one priced summary, and works out how
//! much of every raw ingredient the accepted orders need.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### A pure core with I/O at the edges
//!
//! The [`validator`] and [`aggregator`] do no I/O and hold no global state. They
//! take a [`Catalog`](catalog::Catalog) and a slice of
//! [`RawOrderLine`](model::RawOrderLine)s and return values, so they can be tested
//! in isolation and run any number of times with identical results.
//!
//! Everything that touches the outside world sits behind a trait:
//! - [`CatalogProvider`](catalog::CatalogProvider) supplies the reference tables.
//! - [`OrderSource`](source::OrderSource) supplies the order lines (JSON or CSV).
//! - [`ReportSink`](report::ReportSink) receives error messages and the final report.
//!
//! ### Report and skip
//!
//! A bad order never stops a run. Invalid rows are dropped by the source, invalid
//! order groups are dropped by the aggregator, and each problem is reported as its
//! own message. Only a missing or empty catalog or order file is fatal.
//!
//! ### Exact money
//!
//! Prices and ingredient amounts are [`rust_decimal::Decimal`], so repeated
//! additions never drift.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`validator`], [`aggregator`])
//! - **Role**: Group lines by order id, validate each group, build
//!   [`OrderSummary`](model::OrderSummary) records and accumulate
//!   [`IngredientTotals`](model::IngredientTotals).
//! - **Key items**: [`OrderValidator`](validator::OrderValidator), [`OrderAggregator`](aggregator::OrderAggregator).
//!
//! ### 2. The Data ([`model`], [`catalog`])
//! - **Role**: Plain records and the immutable product/recipe tables.
//!
//! ### 3. The Edges ([`source`], [`report`], [`config`])
//! - **Role**: Read files, render results, resolve paths.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Wires the edges around the core and runs one batch.
//! - **Key items**: [`OrderPipeline`](lifecycle::OrderPipeline), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Uses data/products.json, data/recipes.json and data/orders.json
//! cargo run
//!
//! # Another order file, with info logs
//! cargo run -- --orders data/orders.csv -v
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```
//!
//! See [`mock`] for in-memory collaborators used by the integration tests.

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod report;
pub mod source;
pub mod validator;
