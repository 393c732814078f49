//! Secrets Module
//!
//! Vestigial: a page of anonymous "secrets" users can post. It has no
//! relation to boards and is kept as it shipped, behind sign-in.

pub mod handlers;

pub use handlers::{list_secrets, submit_form, submit_secret};
