use nalgebra::Matrix1x4;
use num::Float;
use std::fmt::Debug;

/* ------------------------------------------------------------------------------
 * Type aliases
 * ------------------------------------------------------------------------------ */
pub type Xyxy<T> = Matrix1x4<T>;

/* ------------------------------------------------------------------------------
 * Rect struct
 * ------------------------------------------------------------------------------ */

/// Axis-aligned bounding box in image-pixel space, stored as
/// `[x1, y1, x2, y2]` with `x2 >= x1` and `y2 >= y1` expected but not
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T>
where
    T: Debug + Float + 'static,
{
    xyxy: Xyxy<T>,
}

impl<T> Rect<T>
where
    T: Debug + Float + 'static,
{
    /// Create a Rect from its top-left corner and size.
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    /// Create Rect from [x1, y1, x2, y2] format
    pub fn from_xyxy(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self {
            xyxy: Matrix1x4::new(x1, y1, x2, y2),
        }
    }

    #[inline(always)]
    pub fn x1(&self) -> T {
        self.xyxy[(0, 0)]
    }

    #[inline(always)]
    pub fn y1(&self) -> T {
        self.xyxy[(0, 1)]
    }

    #[inline(always)]
    pub fn x2(&self) -> T {
        self.xyxy[(0, 2)]
    }

    #[inline(always)]
    pub fn y2(&self) -> T {
        self.xyxy[(0, 3)]
    }

    /// Width, negative for a malformed box.
    #[inline(always)]
    pub fn width(&self) -> T {
        self.x2() - self.x1()
    }

    /// Height, negative for a malformed box.
    #[inline(always)]
    pub fn height(&self) -> T {
        self.y2() - self.y1()
    }

    pub fn area(&self) -> T {
        self.width() * self.height()
    }

    /// Get bounding box as [x1, y1, x2, y2] format
    pub fn get_xyxy(&self) -> [T; 4] {
        [self.x1(), self.y1(), self.x2(), self.y2()]
    }

    /// Intersection over union with `other`.
    ///
    /// Returns 0 when the boxes do not overlap (touching edges included),
    /// when either box is malformed, and when the union is empty. The result
    /// is always in `[0, 1]` for finite coordinates.
    pub fn calc_iou(&self, other: &Rect<T>) -> T {
        let ix1 = self.x1().max(other.x1());
        let iy1 = self.y1().max(other.y1());
        let ix2 = self.x2().min(other.x2());
        let iy2 = self.y2().min(other.y2());

        if ix2 <= ix1 || iy2 <= iy1 {
            return T::zero();
        }

        let intersection = (ix2 - ix1) * (iy2 - iy1);
        let union = self.area() + other.area() - intersection;
        if union <= T::zero() {
            return T::zero();
        }
        intersection / union
    }
}

impl<T> From<[T; 4]> for Rect<T>
where
    T: Debug + Float + 'static,
{
    fn from(xyxy: [T; 4]) -> Self {
        Self::from_xyxy(xyxy[0], xyxy[1], xyxy[2], xyxy[3])
    }
}

/// Serde adapter writing a [`Rect`] as a plain `[x1, y1, x2, y2]` array.
pub mod xyxy_array {
    use super::Rect;
    use num::Float;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt::Debug;

    pub fn serialize<S, T>(rect: &Rect<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Debug + Float + Serialize + 'static,
    {
        rect.get_xyxy().serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Rect<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Debug + Float + Deserialize<'de> + 'static,
    {
        let xyxy = <[T; 4]>::deserialize(deserializer)?;
        Ok(Rect::from(xyxy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearly_eq::assert_nearly_eq;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect<f64> {
        Rect::from_xyxy(x1, y1, x2, y2)
    }

    #[test]
    fn test_new_uses_top_left_and_size() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.get_xyxy(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(r.width(), 30.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.area(), 1200.0);
    }

    #[test]
    fn test_iou_identical_boxes() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(a.calc_iou(&a), 1.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(50.0, 50.0, 150.0, 150.0);
        // Intersection: 50x50 = 2500, Union: 20000 - 2500 = 17500
        assert_nearly_eq!(a.calc_iou(&b), 2500.0 / 17500.0, 1e-12);
    }

    #[test]
    fn test_iou_shifted_box() {
        let a = rect(100.0, 100.0, 200.0, 200.0);
        let b = rect(105.0, 105.0, 205.0, 205.0);
        // Intersection: 95x95 = 9025, Union: 20000 - 9025 = 10975
        assert_nearly_eq!(a.calc_iou(&b), 9025.0 / 10975.0, 1e-12);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(200.0, 200.0, 300.0, 300.0);
        assert_eq!(a.calc_iou(&b), 0.0);
    }

    #[test]
    fn test_iou_touching_edges_is_zero() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(100.0, 0.0, 200.0, 100.0);
        assert_eq!(a.calc_iou(&b), 0.0);
    }

    #[test]
    fn test_iou_zero_area_boxes() {
        let a = rect(50.0, 50.0, 50.0, 50.0);
        assert_eq!(a.calc_iou(&a), 0.0);
    }

    #[test]
    fn test_iou_malformed_box_is_zero() {
        let inverted = rect(100.0, 100.0, 0.0, 0.0);
        let b = rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(inverted.calc_iou(&b), 0.0);
        assert_eq!(b.calc_iou(&inverted), 0.0);
    }

    #[test]
    fn test_iou_contained_box() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(25.0, 25.0, 75.0, 75.0);
        assert_nearly_eq!(outer.calc_iou(&inner), 0.25, 1e-12);
    }

    #[test]
    fn test_iou_f32() {
        let a = Rect::<f32>::from_xyxy(100.0, 100.0, 200.0, 200.0);
        let b = Rect::<f32>::from_xyxy(110.0, 110.0, 210.0, 210.0);
        assert_nearly_eq!(a.calc_iou(&b), 0.6806723, 1e-5);
    }

    #[test]
    fn test_from_array() {
        let r = Rect::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r.get_xyxy(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r, Rect::from_xyxy(1.0, 2.0, 3.0, 4.0));
    }

    /* --------------------------------------------------------------------
     * Properties
     * -------------------------------------------------------------------- */

    #[derive(Debug, Clone)]
    struct ArbRect(Rect<f64>);

    impl Arbitrary for ArbRect {
        fn arbitrary(g: &mut Gen) -> Self {
            let mut coord = || f64::from(u16::arbitrary(g) % 1000);
            let (x, y) = (coord(), coord());
            let (w, h) = (coord(), coord());
            ArbRect(Rect::new(x, y, w, h))
        }
    }

    quickcheck! {
        fn prop_iou_symmetric(a: ArbRect, b: ArbRect) -> bool {
            a.0.calc_iou(&b.0) == b.0.calc_iou(&a.0)
        }

        fn prop_iou_in_unit_range(a: ArbRect, b: ArbRect) -> bool {
            let iou = a.0.calc_iou(&b.0);
            (0.0..=1.0).contains(&iou)
        }

        fn prop_iou_self_is_one(a: ArbRect) -> bool {
            if a.0.area() > 0.0 {
                a.0.calc_iou(&a.0) == 1.0
            } else {
                a.0.calc_iou(&a.0) == 0.0
            }
        }
    }
}
