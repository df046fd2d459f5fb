// ABOUTME: Relative TP-Validity-Period (TS 23.040 9.2.3.12.1) to and from minutes
// ABOUTME: The octet is piecewise: 5 minute steps, then 30 minutes, then days, then weeks

const MINUTES_12_HOURS: u32 = 12 * 60;
const MINUTES_24_HOURS: u32 = 24 * 60;
const MINUTES_30_DAYS: u32 = 30 * MINUTES_24_HOURS;
const MINUTES_WEEK: u32 = 7 * MINUTES_24_HOURS;

/// Convert a validity period in minutes to the relative TP-VP octet.
/// Values between steps round down; anything past 63 weeks saturates.
pub fn to_relative(minutes: u32) -> u8 {
    let value = if minutes <= MINUTES_12_HOURS {
        (minutes / 5).saturating_sub(1)
    } else if minutes <= MINUTES_24_HOURS {
        (minutes - MINUTES_12_HOURS) / 30 + 143
    } else if minutes <= MINUTES_30_DAYS {
        minutes / MINUTES_24_HOURS + 166
    } else {
        (minutes / MINUTES_WEEK + 192).min(255)
    };
    value as u8
}

/// Convert a relative TP-VP octet to minutes
pub fn from_relative(value: u8) -> u32 {
    let value = u32::from(value);
    match value {
        0..=143 => (value + 1) * 5,
        144..=167 => MINUTES_12_HOURS + (value - 143) * 30,
        168..=196 => (value - 166) * MINUTES_24_HOURS,
        _ => (value - 192) * MINUTES_WEEK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(to_relative(5), 0);
        assert_eq!(to_relative(720), 143);
        assert_eq!(to_relative(750), 144);
        assert_eq!(to_relative(1440), 167);
        assert_eq!(to_relative(2 * 1440), 168);
        assert_eq!(to_relative(30 * 1440), 196);
        assert_eq!(to_relative(5 * 10080), 197);
        assert_eq!(to_relative(u32::MAX), 255);
    }

    #[test]
    fn three_days() {
        assert_eq!(to_relative(4320), 0xA9);
        assert_eq!(from_relative(0xA9), 4320);
    }

    #[test]
    fn short_periods_clamp_to_first_step() {
        assert_eq!(to_relative(0), 0);
        assert_eq!(to_relative(4), 0);
    }

    #[test]
    fn every_octet_survives_a_round_trip() {
        for value in 0..=255u8 {
            assert_eq!(to_relative(from_relative(value)), value, "octet {value}");
        }
    }
}
