//! depbump - requirement declaration updater library
//!
//! This library provides:
//! - Parsing of Swift package requirement declarations into version requirements
//! - Rewriting declarations so they admit a target version
//! - Dependency groups with wildcard patterns, dependency types and ignore conditions

pub mod cli;
pub mod domain;
pub mod error;
pub mod group;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod update;
