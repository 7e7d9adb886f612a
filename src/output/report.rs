//! Plain-text summary tables over statistic snapshots.

use crate::error::StatError;
use crate::statistics::{StatisticSnapshot, SummaryStatistics};

/// Collects [`StatisticSnapshot`]s and renders fixed-width text tables.
///
/// Rows appear in insertion order. Statistics without a name render as
/// `-`; undefined values render as `NaN`.
///
/// # Example
///
/// ```
/// use simstat::output::StatisticReporter;
/// use simstat::{Statistic, SummaryStatistics};
///
/// let mut stat = Statistic::with_name("service time");
/// stat.collect_all(&[3.0, 5.0, 4.0, 6.0]);
///
/// let mut reporter = StatisticReporter::new();
/// reporter.add_statistic(&stat, 0.95).unwrap();
/// let report = reporter.summary_report();
/// assert!(report.contains("service time"));
/// assert!(report.contains("Average"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatisticReporter {
    snapshots: Vec<StatisticSnapshot>,
}

impl StatisticReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prepared snapshot.
    pub fn add(&mut self, snapshot: StatisticSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Snapshot `stat` at `level` and append the result.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::InvalidConfidenceLevel`] if `level` is outside
    /// (0, 1).
    pub fn add_statistic(
        &mut self,
        stat: &impl SummaryStatistics,
        level: f64,
    ) -> Result<(), StatError> {
        self.snapshots.push(stat.snapshot(level)?);
        Ok(())
    }

    /// The collected snapshots, in insertion order.
    pub fn snapshots(&self) -> &[StatisticSnapshot] {
        &self.snapshots
    }

    /// Number of collected snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshots have been collected.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn name_width(&self) -> usize {
        self.snapshots
            .iter()
            .filter_map(|s| s.name.as_deref())
            .map(str::len)
            .max()
            .unwrap_or(0)
            .max(10)
    }

    /// Table of count, average, and standard deviation per statistic.
    pub fn summary_report(&self) -> String {
        let width = self.name_width();
        let mut out = String::new();
        out.push_str(&format!(
            "{:<width$} {:>10} {:>15} {:>15}\n",
            "Name", "Count", "Average", "Std. Dev."
        ));
        out.push_str(&"-".repeat(width + 43));
        out.push('\n');
        for snapshot in &self.snapshots {
            out.push_str(&format!(
                "{:<width$} {:>10.0} {:>15.6} {:>15.6}\n",
                snapshot.name.as_deref().unwrap_or("-"),
                snapshot.count,
                snapshot.average,
                snapshot.std_deviation
            ));
        }
        out
    }

    /// Table of count, average, and confidence half-width per statistic.
    ///
    /// Each row uses the confidence level its snapshot was taken at.
    pub fn half_width_summary_report(&self) -> String {
        let width = self.name_width();
        let mut out = String::new();
        out.push_str(&format!(
            "{:<width$} {:>10} {:>15} {:>15}\n",
            "Name", "Count", "Average", "Half-Width"
        ));
        out.push_str(&"-".repeat(width + 43));
        out.push('\n');
        for snapshot in &self.snapshots {
            out.push_str(&format!(
                "{:<width$} {:>10.0} {:>15.6} {:>15.6}\n",
                snapshot.name.as_deref().unwrap_or("-"),
                snapshot.count,
                snapshot.average,
                snapshot.half_width
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Statistic;

    fn reporter_with_two_rows() -> StatisticReporter {
        let mut named = Statistic::with_name("service time");
        named.collect_all(&[3.0, 5.0, 4.0, 6.0]);
        let mut unnamed = Statistic::new();
        unnamed.collect_all(&[1.0, 2.0]);

        let mut reporter = StatisticReporter::new();
        reporter.add_statistic(&named, 0.95).unwrap();
        reporter.add_statistic(&unnamed, 0.95).unwrap();
        reporter
    }

    #[test]
    fn test_summary_report_layout() {
        let reporter = reporter_with_two_rows();
        let report = reporter.summary_report();

        assert!(report.contains("Name"));
        assert!(report.contains("Std. Dev."));
        assert!(report.contains("service time"));
        assert!(report.contains("4.500000"));
        // Header, separator, and one line per snapshot.
        assert_eq!(report.lines().count(), 4);
        // The unnamed statistic renders as a dash.
        assert!(report.lines().nth(3).unwrap().starts_with('-'));
    }

    #[test]
    fn test_half_width_report() {
        let reporter = reporter_with_two_rows();
        let report = reporter.half_width_summary_report();
        assert!(report.contains("Half-Width"));
        assert!(report.contains("service time"));
        assert_eq!(report.lines().count(), 4);
    }

    #[test]
    fn test_add_prepared_snapshot() {
        let mut stat = Statistic::with_name("queue");
        stat.collect_all(&[0.0, 2.0, 4.0]);
        let mut reporter = StatisticReporter::new();
        assert!(reporter.is_empty());
        reporter.add(stat.snapshot(0.9).unwrap());
        assert_eq!(reporter.len(), 1);
        assert_eq!(reporter.snapshots()[0].name.as_deref(), Some("queue"));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let stat = Statistic::from_data(&[1.0, 2.0]);
        let mut reporter = StatisticReporter::new();
        assert!(reporter.add_statistic(&stat, 1.0).is_err());
        assert!(reporter.is_empty());
    }
}
