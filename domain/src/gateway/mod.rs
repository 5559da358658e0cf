//! External collaborators the domain layer talks to through traits.

pub mod insight;
