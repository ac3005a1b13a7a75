use serde::Serialize;

/// Highest glyph index a row can show.
pub const MAX_LEVEL: u8 = 7;

/// Binned values are expected in `[0, INPUT_MAX]`.
pub const INPUT_MAX: i64 = 100;

/// Combined height of both rows.
pub const SCALE_MAX: i64 = 16;

const ROW_SPAN: i64 = 8;

/// One display column: two stacked rows, each a glyph index in `[0, 7]`.
///
/// An `upper` of 0 is the blank sentinel, not glyph 0: the upper row only
/// lights once the lower row is full, so its smallest lit level is 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub lower: u8,
    pub upper: u8,
}

impl Bar {
    pub fn upper_is_blank(&self) -> bool {
        self.upper == 0
    }
}

/// Integer range map in the style of a microcontroller `map()`: the value is
/// truncated to an integer first, then scaled with integer division.
pub fn scale_level(value: f64) -> i64 {
    let v = value as i64;
    v.saturating_mul(SCALE_MAX) / INPUT_MAX
}

/// Splits a binned magnitude into a lower and upper row level.
///
/// Input outside `[0, 100]` is not rejected; the resulting levels are still
/// clamped to `[0, 7]`.
pub fn map_level(value: f64) -> Bar {
    let scaled = scale_level(value);

    if scaled <= ROW_SPAN {
        Bar {
            lower: scaled.clamp(0, MAX_LEVEL as i64) as u8,
            upper: 0,
        }
    } else {
        Bar {
            lower: MAX_LEVEL,
            upper: (scaled - ROW_SPAN).min(MAX_LEVEL as i64) as u8,
        }
    }
}

pub fn map_levels(binned: &[f64], bars: &mut [Bar]) {
    for (bar, &value) in bars.iter_mut().zip(binned) {
        *bar = map_level(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_scale_fills_lower_row() {
        assert_eq!(scale_level(50.0), 8);
        assert_eq!(map_level(50.0), Bar { lower: 7, upper: 0 });
    }

    #[test]
    fn upper_row_takes_the_excess() {
        assert_eq!(scale_level(93.0), 14);
        assert_eq!(map_level(93.0), Bar { lower: 7, upper: 6 });
    }

    #[test]
    fn truncates_before_scaling() {
        // 6.99 -> 6 -> 96 / 100 = 0
        assert_eq!(scale_level(6.99), 0);
        assert_eq!(scale_level(7.0), 1);
        assert_eq!(scale_level(56.9), 8);
        assert_eq!(scale_level(57.0), 9);
        assert_eq!(map_level(57.0), Bar { lower: 7, upper: 1 });
    }

    #[test]
    fn silence_is_lowest_glyph_with_blank_top() {
        let bar = map_level(0.0);
        assert_eq!(bar, Bar { lower: 0, upper: 0 });
        assert!(bar.upper_is_blank());
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(map_level(100.0), Bar { lower: 7, upper: 7 });
        assert_eq!(map_level(5_000.0), Bar { lower: 7, upper: 7 });
        assert_eq!(map_level(f64::INFINITY), Bar { lower: 7, upper: 7 });
        assert_eq!(map_level(-250.0), Bar { lower: 0, upper: 0 });
        assert_eq!(map_level(f64::NAN), Bar { lower: 0, upper: 0 });
    }

    #[test]
    fn maps_every_bin() {
        let binned = [0.0, 25.0, 50.0, 75.0, 100.0];
        let mut bars = [Bar::default(); 5];
        map_levels(&binned, &mut bars);
        let flat: Vec<(u8, u8)> = bars.iter().map(|b| (b.lower, b.upper)).collect();
        assert_eq!(flat, vec![(0, 0), (4, 0), (7, 0), (7, 4), (7, 7)]);
    }
}
