//! External build invocation
//!
//! The toolchain is an opaque subprocess. [`BuildRunner`] is the seam the
//! pipeline talks to, [`CommandRunner`] the real implementation, and
//! [`retry_bounded`] the fixed-ceiling retry loop around it.

mod mock;
mod retry;
mod runner;

pub use mock::MockRunner;
pub use retry::{retry_bounded, RetryOutcome};
pub use runner::{BuildRunner, BuildStatus, CommandRunner};
