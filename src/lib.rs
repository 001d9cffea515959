//! sheetboard — authenticated read-through facade over trading-performance
//! data stored in a Google Sheets spreadsheet.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod mappers;
pub mod sheets;
pub mod web;
