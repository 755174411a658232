//! Shared helpers for the test suites.

pub mod logging {
    use tracing::subscriber::set_global_default;
    use tracing_log::LogTracer;
    use tracing_subscriber::fmt;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    lazy_static::lazy_static! {
        static ref TEST_SUBSCRIBER: () = install();
    }

    /// Installs the tracing stack once per test binary; every later caller
    /// shares the first subscriber.
    pub fn init() {
        lazy_static::initialize(&TEST_SUBSCRIBER);
    }

    fn install() {
        LogTracer::init().expect("log bridge already installed");

        // RUST_LOG wins when set; otherwise default the crate to debug so a
        // failing test shows its pipeline steps.
        let filter = std::env::var("RUST_LOG")
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(format!("{}=debug", env!("CARGO_CRATE_NAME"))));

        let fmt = fmt::layer().with_test_writer().with_target(false);

        let subscriber = tracing_subscriber::registry().with(filter).with(fmt);
        set_global_default(subscriber).expect("tracing already initialized");
    }
}
