//! Section-frequency presentation for the analytics view.

use kavach_intel_models::SectionTally;

/// One display-ready frequency bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBar {
    /// BNS section code.
    pub section: String,
    /// Human-readable label.
    pub label: String,
    /// Case count.
    pub count: u64,
    /// Count relative to the busiest section, in `[0, 1]`. Drives the bar
    /// width.
    pub fraction: f64,
}

/// Projects tallies into bars scaled against the busiest section.
///
/// Source order is preserved. An empty tally list yields no bars.
#[must_use]
pub fn section_frequency(tallies: &[SectionTally]) -> Vec<SectionBar> {
    let max = tallies.iter().map(|t| t.count).max().unwrap_or(0);
    tallies
        .iter()
        .map(|tally| {
            #[allow(clippy::cast_precision_loss)]
            let fraction = if max == 0 {
                0.0
            } else {
                tally.count as f64 / max as f64
            };
            SectionBar {
                section: tally.section.clone(),
                label: tally.label.clone(),
                count: tally.count,
                fraction,
            }
        })
        .collect()
}
