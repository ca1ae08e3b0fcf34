//! Optional tracing integration.
//!
//! With the `tracing-integration` feature the macros here are the `tracing`
//! crate's own. Without it they expand to nothing, so call sites carry no
//! cost and need no `cfg` attributes.
//!
//! ```ignore
//! use crate::tracing_compat::debug;
//!
//! debug!(agent = %agent, gap, "no envy");
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, info, trace};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, info, trace};
}

#[cfg(not(feature = "tracing-integration"))]
#[allow(unused_imports)]
pub(crate) use noop::{debug, info, trace};

#[cfg(test)]
mod tests {
    use super::{debug, info, trace};

    #[test]
    fn macros_accept_structured_fields() {
        crate::test_utils::init_test_logging();
        let agent = "Agent1";
        let gap = -1.5_f64;
        trace!(agent = %agent, gap, "trace event");
        debug!(agent = %agent, ?gap, "debug event");
        info!(count = 2_usize, "info event");
        assert!(gap < 0.0 && !agent.is_empty());
        crate::test_complete!("macros_accept_structured_fields");
    }
}
