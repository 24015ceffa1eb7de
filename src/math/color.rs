/// Decode a packed `0xRRGGBB` sRGB color into linear RGB
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Encode linear RGB as an opaque sRGB pixel, clamping each channel to [0, 1]
pub fn to_rgba8(rgb: [f32; 3]) -> [u8; 4] {
    let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
    [encode(rgb[0]), encode(rgb[1]), encode(rgb[2]), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_black_and_white() {
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let white = hex_to_linear(0xffffff);
        for c in white {
            assert!((c - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hex_channel_order() {
        let orange = hex_to_linear(0xf7931e);
        assert!(orange[0] > orange[1]);
        assert!(orange[1] > orange[2]);
    }

    #[test]
    fn test_srgb_round_trip_midtone() {
        let c = 0.5;
        assert!((linear_to_srgb(srgb_to_linear(c)) - c).abs() < 1e-4);
    }

    #[test]
    fn test_to_rgba8_clamps() {
        assert_eq!(to_rgba8([2.0, -1.0, 1.0]), [255, 0, 255, 255]);
        assert_eq!(to_rgba8([0.0, 0.0, 0.0]), [0, 0, 0, 255]);
    }

    #[test]
    fn test_to_rgba8_recovers_hex() {
        let pixel = to_rgba8(hex_to_linear(0xff6f91));
        assert_eq!(pixel, [0xff, 0x6f, 0x91, 255]);
    }
}
