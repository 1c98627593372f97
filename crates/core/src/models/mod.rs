//! Registry entities.
//!
//! Ownership runs one way: a [`Department`] holds its [`Patient`]s by value, and each
//! patient holds its [`Visit`]s and [`Note`]s by value. Removing a patient from its
//! department drops the whole subtree.

pub mod department;
pub mod note;
pub mod patient;
pub mod visit;

pub use department::Department;
pub use note::Note;
pub use patient::{Demographics, Patient};
pub use visit::Visit;
