//! Terminal front end for the book catalog: settings, command wiring and the
//! table view that re-renders on every catalog event.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod report;
pub mod shell;
pub mod ui;
