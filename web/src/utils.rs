/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Three character counter display, `-99` to `999`.
pub(crate) fn format_for_counter(value: i32) -> String {
    let value = value.clamp(-99, 999);
    if value < 0 {
        format!("-{:02}", -value)
    } else {
        format!("{:03}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pads_and_clamps() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(60), "060");
        assert_eq!(format_for_counter(-10), "-10");
        assert_eq!(format_for_counter(-5), "-05");
        assert_eq!(format_for_counter(1500), "999");
        assert_eq!(format_for_counter(-400), "-99");
    }
}
