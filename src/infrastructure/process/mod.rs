//! External process plumbing

mod locator;
mod system;

pub use locator::PathToolLocator;
pub use system::SystemProcessRunner;
