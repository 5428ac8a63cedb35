#![allow(unused_macros)]
//! Diagnostic logging macros used inside tracewire code and by custom
//! exporters, processors and other plugins. They are not meant for general
//! application logging.
//!
//! Each macro takes an operation `name:` plus optional key-value fields and
//! forwards to `tracing` when the `internal-logs` feature is enabled;
//! without the feature the call compiles away.

/// Log an internal informational message.
///
/// # Example:
/// ```rust
/// use tracewire::wire_info;
/// wire_info!(name: "sdk_start", version = "1.0.0");
/// ```
#[macro_export]
macro_rules! wire_info {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::info!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::info!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Log an internal warning, such as a contained exporter failure.
///
/// # Example:
/// ```rust
/// use tracewire::wire_warn;
/// wire_warn!(name: "export_failed", result = "FailedRetryable");
/// ```
#[macro_export]
macro_rules! wire_warn {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::warn!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::warn!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Log an internal debug message.
///
/// # Example:
/// ```rust
/// use tracewire::wire_debug;
/// wire_debug!(name: "export_accepted", spans = 1);
/// ```
#[macro_export]
macro_rules! wire_debug {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

/// Log an internal error.
///
/// # Example:
/// ```rust
/// use tracewire::wire_error;
/// wire_error!(name: "shutdown_failed");
/// ```
#[macro_export]
macro_rules! wire_error {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::error!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::_private::error!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}
