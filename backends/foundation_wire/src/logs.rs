//! Logging macros that forward to `tracing` only when the matching crate
//! feature is enabled, so release builds without `standard` carry no log calls.

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => {
        if cfg!(feature = "log_info") {
            tracing::info!($($t)*);
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => {
        if cfg!(feature = "log_warnings") {
            tracing::warn!($($t)*);
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => {
        if cfg!(feature = "log_debug") {
            tracing::debug!($($t)*);
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => {
        if cfg!(feature = "log_errors") {
            tracing::error!($($t)*);
        }
    };
}
