//! Reactive core for a user list screen built on Model-View-Intent.
//!
//! Intents go in through [`users::UserListStore::submit`]; state comes out
//! as an always-current watch value and one-shot events come out of an
//! [`users::EventStream`].

pub mod bus;
pub mod config;
pub mod domain;
pub mod flow;
pub mod logging;
pub mod mvi;
pub mod users;
