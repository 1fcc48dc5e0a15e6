use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a verbosity level. `RUST_LOG` wins when set.
fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "pitchdeck=warn,warn";
    }
    match verbose {
        0 => "pitchdeck=info,warn",
        1 => "pitchdeck=debug,info",
        _ => "pitchdeck=trace,info",
    }
}

pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_directive(0, false), "pitchdeck=info,warn");
        assert_eq!(default_directive(1, false), "pitchdeck=debug,info");
        assert_eq!(default_directive(3, false), "pitchdeck=trace,info");
        assert_eq!(default_directive(2, true), "pitchdeck=warn,warn");
    }
}
