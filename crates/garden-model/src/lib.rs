//! Bloomlog Garden Model
//!
//! Defines the core data contracts for Bloomlog gardens:
//! - **Photos:** Dated photo references and the compose selection set
//! - **Gardens:** Plants, log entries, and the on-disk garden bundle
//! - **Notebook:** Timeline items (notes and tasks) with recurrence rules
//! - **Compose:** Layout kinds, colors, and collage/timelapse configuration
//!
//! All dates are calendar dates (`chrono::NaiveDate`); photo paths are
//! stored relative to the garden root so bundles survive being moved.

pub mod compose;
pub mod csv;
pub mod garden;
pub mod notebook;
pub mod photo;

pub use compose::*;
pub use garden::*;
pub use notebook::*;
pub use photo::*;
