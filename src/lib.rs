// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregation;
pub mod categories;
pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod insights;
pub mod models;
pub mod persistence;
pub mod reactive;
pub mod reports;
pub mod repository;
pub mod seed;
pub mod settings;
pub mod store;
pub mod tracker;
pub mod utils;

pub use tracker::FinanceTracker;
