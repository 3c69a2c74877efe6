use super::core::Point3;

/// Length of the open polyline through `points`, summed segment by segment in order.
#[must_use]
pub fn polyline_length(points: &[Point3]) -> f64 {
    points
        .windows(2)
        .map(|window| window[1].sub_point(window[0]).length())
        .sum()
}

/// Result of analyzing polyline segment lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLengthAnalysis {
    /// Length of each segment.
    pub lengths: Vec<f64>,
    /// Total length of all segments.
    pub total_length: f64,
    /// Index and length of the shortest segment.
    pub shortest: Option<(usize, f64)>,
    /// Index and length of the longest segment.
    pub longest: Option<(usize, f64)>,
}

impl SegmentLengthAnalysis {
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }
}

/// Analyzes the segment lengths of the open polyline through `points`.
#[must_use]
pub fn analyze_polyline_segments(points: &[Point3]) -> SegmentLengthAnalysis {
    let mut lengths = Vec::with_capacity(points.len().saturating_sub(1));
    let mut total = 0.0;
    let mut shortest: Option<(usize, f64)> = None;
    let mut longest: Option<(usize, f64)> = None;

    for (i, window) in points.windows(2).enumerate() {
        let len = window[1].sub_point(window[0]).length();
        lengths.push(len);
        total += len;

        match shortest {
            Some((_, min_len)) if len >= min_len => {}
            _ => shortest = Some((i, len)),
        }
        match longest {
            Some((_, max_len)) if len <= max_len => {}
            _ => longest = Some((i, len)),
        }
    }

    SegmentLengthAnalysis {
        lengths,
        total_length: total,
        shortest,
        longest,
    }
}
