//! Test harness for the `fondscan` command line
//!
//! Each test owns a temporary output root ([`OutputFixture`]), runs the tool
//! once ([`Invocation`]) and checks the files it left behind
//! ([`ExpectedLayout`], [`assert_log_contains`]). The harness never looks at
//! the exit status itself; a failed run shows up as missing files.

pub mod expect;
pub mod fixture;
pub mod invocation;
pub mod logging;
#[cfg(unix)]
pub mod stubs;

pub use expect::{ExpectedLayout, assert_log_contains, is_non_zero_file, log_contains};
pub use fixture::OutputFixture;
pub use invocation::{Invocation, InvocationOutput, Mode};
