//! # FoodEase Core
//!
//! Business logic behind the FoodEase kitchen assistant: fridge photo
//! analysis, recipe matching and meal-prep scheduling.
//!
//! - [`domain`] holds entities, ports and services. Every external system
//!   (vision model, recipe database, text generation, calendar, session
//!   store) sits behind a port trait.
//! - [`infrastructure`] holds the adapters implementing those ports.
//! - [`application`] wires the default adapters into a ready service.

pub mod application;
pub mod domain;
pub mod infrastructure;
