use std::f64::consts::TAU;

/// Fixed-point scale for velocity components on the wire
const VELOCITY_SCALE: f64 = 256.0;

/// Packs a heading in radians into one byte (256 steps around the circle)
pub fn encode_yaw(yaw: f64) -> u8 {
    let turns = (yaw / TAU).rem_euclid(1.0);
    (turns * 256.0).round() as u64 as u8
}

pub fn decode_yaw(byte: u8) -> f64 {
    f64::from(byte) / 256.0 * TAU
}

/// Packs a velocity component into a signed 16-bit fixed-point value,
/// saturating at the representable range
pub fn encode_velocity(component: f64) -> i16 {
    (component * VELOCITY_SCALE)
        .round()
        .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

pub fn decode_velocity(raw: i16) -> f64 {
    f64::from(raw) / VELOCITY_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_round_trips_within_one_step() {
        let step = TAU / 256.0;
        for yaw in [0.0, 0.5, 1.0, 3.14, 6.0, -1.0, 10.0] {
            let decoded = decode_yaw(encode_yaw(yaw));
            let expected = yaw.rem_euclid(TAU);
            let diff = (decoded - expected).abs();
            let wrapped = diff.min(TAU - diff);
            assert!(wrapped <= step, "yaw {yaw} decoded to {decoded}");
        }
    }

    #[test]
    fn velocity_round_trips_within_fixed_point_precision() {
        for v in [0.0, 1.0, -3.5, 120.25, -127.99] {
            let decoded = decode_velocity(encode_velocity(v));
            assert!((decoded - v).abs() <= 1.0 / VELOCITY_SCALE);
        }
    }

    #[test]
    fn velocity_saturates_out_of_range() {
        assert_eq!(encode_velocity(1.0e6), i16::MAX);
        assert_eq!(encode_velocity(-1.0e6), i16::MIN);
    }
}
