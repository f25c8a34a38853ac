use fastrand::Rng;

/// A single carrier value able to hold one message bit in its least significant bit.
///
/// Implemented for 8 bit pixel samples and quantized DCT coefficients, the
/// two domains differ in which values are usable and how edges are handled.
pub trait Sample: Copy + PartialEq {
    /// The least significant bit.
    fn lsb(self) -> bool;

    /// Whether a path may address this value.
    fn is_usable(self) -> bool;

    /// LSB replacement: force bit 0 to `bit`.
    fn replaced(self, bit: bool) -> Self;

    /// LSB matching: keep the value if its LSB already equals `bit`,
    /// otherwise step by one in a random direction where both are legal.
    fn matched(self, bit: bool, rng: &mut Rng) -> Self;
}

impl Sample for u8 {
    #[inline]
    fn lsb(self) -> bool {
        self & 1 == 1
    }

    #[inline]
    fn is_usable(self) -> bool {
        true
    }

    #[inline]
    fn replaced(self, bit: bool) -> Self {
        (self & !1) | u8::from(bit)
    }

    fn matched(self, bit: bool, rng: &mut Rng) -> Self {
        if self.lsb() == bit {
            return self;
        }
        match self {
            u8::MAX => self - 1,
            0 => 1,
            v if rng.bool() => v + 1,
            v => v - 1,
        }
    }
}

impl Sample for i32 {
    #[inline]
    fn lsb(self) -> bool {
        self & 1 == 1
    }

    /// Zero coefficients carry no data.
    #[inline]
    fn is_usable(self) -> bool {
        self != 0
    }

    fn replaced(self, bit: bool) -> Self {
        match (self & !1) | i32::from(bit) {
            // 1 with a cleared LSB would vanish, 2 holds the same bit
            0 => 2,
            v => v,
        }
    }

    fn matched(self, bit: bool, rng: &mut Rng) -> Self {
        if self.lsb() == bit {
            return self;
        }
        match self {
            1 => 2,
            -1 => -2,
            i32::MAX => self - 1,
            i32::MIN => self + 1,
            v if rng.bool() => v + 1,
            v => v - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_replacement() {
        assert_eq!(200u8.replaced(true), 201);
        assert_eq!(201u8.replaced(true), 201);
        assert_eq!(201u8.replaced(false), 200);
        assert_eq!(255u8.replaced(false), 254);
        assert_eq!(0u8.replaced(true), 1);
    }

    #[test]
    fn test_pixel_matching_edges() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..100 {
            assert_eq!(255u8.matched(false, &mut rng), 254);
            assert_eq!(0u8.matched(true, &mut rng), 1);
            assert_eq!(255u8.matched(true, &mut rng), 255);
            assert_eq!(0u8.matched(false, &mut rng), 0);
        }
    }

    #[test]
    fn test_pixel_matching_steps_by_one() {
        let mut rng = Rng::with_seed(11);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let v = 100u8.matched(true, &mut rng);
            assert!(v == 99 || v == 101);
            seen[usize::from(v == 101)] = true;
        }
        assert!(seen[0] && seen[1], "both directions should be taken");
    }

    #[test]
    fn test_coefficient_lsb_of_negatives() {
        assert!((-1i32).lsb());
        assert!(!(-2i32).lsb());
        assert!((-3i32).lsb());
    }

    #[test]
    fn test_coefficient_replacement_never_yields_zero() {
        assert_eq!(1i32.replaced(false), 2);
        assert_eq!(1i32.replaced(true), 1);
        assert_eq!((-1i32).replaced(false), -2);
        assert_eq!((-1i32).replaced(true), -1);
        assert_eq!(6i32.replaced(true), 7);
        assert_eq!((-6i32).replaced(true), -5);
    }

    #[test]
    fn test_coefficient_matching_never_crosses_zero() {
        let mut rng = Rng::with_seed(3);
        for _ in 0..100 {
            assert_eq!(1i32.matched(false, &mut rng), 2);
            assert_eq!((-1i32).matched(false, &mut rng), -2);
            for v in [-5i32, -4, -3, -2, 2, 3, 4, 5] {
                for bit in [false, true] {
                    let m = v.matched(bit, &mut rng);
                    assert_ne!(m, 0);
                    assert_eq!(m.lsb(), bit);
                    assert!((m - v).abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn test_usable() {
        assert!(0u8.is_usable());
        assert!(!0i32.is_usable());
        assert!((-1i32).is_usable());
    }
}
