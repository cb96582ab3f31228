//! Log output for the `pcl` binary
//!
//! Nothing is logged unless a filter is configured through `PCL_LOG`.
//! Events go to stderr so they never mix with program output.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the stderr subscriber for `filter`, once per process
pub fn init(filter: Option<&str>) {
    let Some(directives) = filter else {
        return;
    };

    INIT.call_once(|| {
        let filter = match EnvFilter::try_new(directives) {
            Ok(filter) => filter,
            Err(err) => {
                eprintln!("warning: ignoring invalid PCL_LOG filter: {}", err);
                return;
            }
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
