//! Controller configuration

use std::time::Duration;

/// Default pause between paced pulls
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Options for constructing a [`crate::Controller`].
///
/// Use the builder pattern to configure options:
///
/// ```
/// use callscope_executor::ControllerOptions;
///
/// let opts = ControllerOptions::new().delay_ms(100).history(false);
/// assert_eq!(opts.delay.as_millis(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Wait between pulls while Running
    pub delay: Duration,
    /// Keep a [`crate::TraceHistory`] of delivered events
    pub history: bool,
}

impl ControllerOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inter-pull delay
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the inter-pull delay in milliseconds
    pub fn delay_ms(self, ms: u64) -> Self {
        self.delay(Duration::from_millis(ms))
    }

    /// Enable or disable the event history
    pub fn history(mut self, enabled: bool) -> Self {
        self.history = enabled;
        self
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            history: true,
        }
    }
}
