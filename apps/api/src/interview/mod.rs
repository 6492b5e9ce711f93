//! Interview: the scripted candidate-screening conversation.
//!
//! Layering, bottom up:
//!   stage, profile, catalog   plain data, no I/O
//!   extract                   free text to profile fields
//!   prompts, questions        model prompts and lenient output parsing
//!   driver                    one turn of the state machine
//!   store, handlers           in-memory sessions behind the HTTP API

pub mod catalog;
pub mod driver;
pub mod extract;
pub mod handlers;
pub mod profile;
pub mod prompts;
pub mod questions;
pub mod session;
pub mod stage;
pub mod store;
