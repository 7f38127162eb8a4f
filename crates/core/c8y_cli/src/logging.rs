use tracing_subscriber::fmt::time::UtcTime;

/// Log to stderr, at INFO level unless `debug` is set
pub fn initialise_tracing_subscriber(debug: bool) {
    let log_level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_max_level(log_level)
        .init();
}
