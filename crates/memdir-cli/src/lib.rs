//! Library surface of the `memdir` binary. The logging bootstrap lives
//! here so integration tests can route it through a capture writer.

pub mod logging;
