// pc-core/src/units.rs

use uom::si::f64::{Force as UomForce, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Force = UomForce;
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn kn(v: f64) -> Force {
    use uom::si::force::kilonewton;
    Force::new::<kilonewton>(v)
}

/// Length in meters, the engine's model length unit.
#[inline]
pub fn to_m(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

#[inline]
pub fn to_mm(l: Length) -> f64 {
    use uom::si::length::millimeter;
    l.get::<millimeter>()
}

/// Force in kilonewtons, the engine's model force unit.
#[inline]
pub fn to_kn(f: Force) -> f64 {
    use uom::si::force::kilonewton;
    f.get::<kilonewton>()
}
