// Concierge: sentiment analysis for hotel guest reviews
//
// This is the library root. The sentiment core (normalize, classify,
// batch, distribution) knows nothing about storage or users; everything
// else is built on top of it.

pub mod accounts;
pub mod config;
pub mod dataset;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
