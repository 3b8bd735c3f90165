//! Diagnostics for wrap anchors that could not be located.

/// A wrap boundary that had to fall back to a hard cut.
///
/// The anchor taken from the end of `segment` was not found inside `window`,
/// so the escaped text was cut after `cut` visible characters instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// Visible segment whose end could not be matched.
    pub segment: String,
    /// Visible text that was searched for the anchor.
    pub window: String,
    /// Visible characters kept before the hard cut.
    pub cut: usize,
}

/// Receiver of wrap anomalies.
pub trait AnomalySink {
    fn record(&mut self, anomaly: Anomaly);
}

/// Forward anomalies to the `log` facade.
///
/// Misses inside a non-empty search window are warnings; an empty window
/// only happens on degenerate input and is logged at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AnomalySink for LogSink {
    fn record(&mut self, anomaly: Anomaly) {
        if anomaly.window.is_empty() {
            log::debug!(
                "No text left to match wrapped segment {:?}, cut at {} characters",
                anomaly.segment,
                anomaly.cut
            );
        } else {
            log::warn!(
                "Wrapped segment {:?} not found in {:?}, cut at {} characters",
                anomaly.segment,
                anomaly.window,
                anomaly.cut
            );
        }
    }
}

impl AnomalySink for Vec<Anomaly> {
    fn record(&mut self, anomaly: Anomaly) {
        self.push(anomaly);
    }
}
