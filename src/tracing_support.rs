//! Tracing support for algorithm runs.
//!
//! With the `tracing` feature enabled, every algorithm opens an `info_span!`
//! and [`init_tracing`] installs a subscriber that prints events at the level
//! named by the `GRAPHSIM_LOG` environment variable and accumulates per-span
//! timings.  With the feature disabled the same macros expand to no-ops.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    /// Environment variable holding the log level of the formatting layer.
    pub const LOG_ENV_VAR: &str = "GRAPHSIM_LOG";

    thread_local! {
        static TIMINGS: RefCell<BTreeMap<&'static str, SpanTiming>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    /// Accumulated wall time and number of closed spans for one span name.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpanTiming {
        pub total: Duration,
        pub count: usize,
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    TIMINGS.with(|timings| {
                        let mut timings = timings.borrow_mut();
                        let entry = timings.entry(name).or_default();
                        entry.total += elapsed;
                        entry.count += 1;
                    });
                }
            }
        }
    }

    fn log_level() -> LevelFilter {
        std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LevelFilter::WARN)
    }

    /// Installs the global subscriber.  Safe to call repeatedly; only the
    /// first call has an effect, and an already-installed foreign subscriber
    /// is left in place.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let fmt = tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_filter(log_level());
            let _ = Registry::default().with(TimingLayer).with(fmt).try_init();
        });
    }

    /// Returns the timings recorded on the current thread, keyed by span name.
    pub fn algorithm_timings() -> BTreeMap<&'static str, SpanTiming> {
        TIMINGS.with(|timings| timings.borrow().clone())
    }

    /// Clears the timings recorded on the current thread.
    pub fn reset_algorithm_timings() {
        init_tracing();
        TIMINGS.with(|timings| timings.borrow_mut().clear());
    }

    // Re-export tracing macros for convenience
    pub use tracing::{debug, info_span, trace};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::{collections::BTreeMap, time::Duration};

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpanTiming {
        pub total: Duration,
        pub count: usize,
    }

    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    pub fn algorithm_timings() -> BTreeMap<&'static str, SpanTiming> {
        BTreeMap::new()
    }

    pub fn reset_algorithm_timings() {
        // No-op when tracing is disabled
    }

    // Provide no-op macro replacements for the tracing macros
    #[macro_export]
    macro_rules! info_span {
        ($name:expr) => {{ $crate::tracing_support::NoOpSpan }};
        ($name:expr, $($fields:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    #[macro_export]
    macro_rules! debug {
        ($($args:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! trace {
        ($($args:tt)*) => {{}};
    }

    pub use {debug, info_span, trace};

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

// Re-export the appropriate implementation
#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
