//! Fast-path lane blocks checked against the generic fallback as an oracle.
//!
//! The lane-block contract promises that every specialized implementation
//! produces the same per-lane results as element-wise scalar arithmetic,
//! which is exactly what `Lanes<T, N>` computes. Element-wise operations
//! must match bit-for-bit; reductions may differ by accumulation order, so
//! they are compared within rounding tolerance.

use approx::assert_relative_eq;
use ganita::{F32x4, F32x8, F64x2, F64x4, LaneOps, Lanes};

macro_rules! parity_test {
    ($name:ident, $t:ty, $fast:ty, $n:expr, $values:expr, $scalars:expr, $eps:expr) => {
        #[test]
        fn $name() {
            let values: &[[$t; $n]] = $values;
            let scalars: &[$t] = $scalars;

            for a in values {
                for b in values {
                    let fa = <$fast as LaneOps<$t, $n>>::set(*a);
                    let fb = <$fast as LaneOps<$t, $n>>::set(*b);
                    let ga = <Lanes<$t, $n> as LaneOps<$t, $n>>::set(*a);
                    let gb = <Lanes<$t, $n> as LaneOps<$t, $n>>::set(*b);

                    // Element-wise operations are bit-identical per lane.
                    assert_eq!(
                        LaneOps::<$t, $n>::add(fa, fb).to_array(),
                        LaneOps::<$t, $n>::add(ga, gb).to_array(),
                        "add {a:?} {b:?}"
                    );
                    assert_eq!(
                        LaneOps::<$t, $n>::sub(fa, fb).to_array(),
                        LaneOps::<$t, $n>::sub(ga, gb).to_array(),
                        "sub {a:?} {b:?}"
                    );
                    assert_eq!(
                        LaneOps::<$t, $n>::mul(fa, fb).to_array(),
                        LaneOps::<$t, $n>::mul(ga, gb).to_array(),
                        "mul {a:?} {b:?}"
                    );
                    assert_eq!(
                        LaneOps::<$t, $n>::div(fa, fb).to_array(),
                        LaneOps::<$t, $n>::div(ga, gb).to_array(),
                        "div {a:?} {b:?}"
                    );
                    assert_eq!(LaneOps::<$t, $n>::neg(fa).to_array(), LaneOps::<$t, $n>::neg(ga).to_array(), "neg {a:?}");
                    assert_eq!(
                        fa.mul_add(fb, fa).to_array(),
                        ga.mul_add(gb, ga).to_array(),
                        "mul_add {a:?} {b:?}"
                    );

                    // Reductions agree within rounding tolerance.
                    let fd = fa.dot(fb);
                    let gd = ga.dot(gb);
                    assert_relative_eq!(fd, gd, max_relative = $eps);
                }

                let fa = <$fast as LaneOps<$t, $n>>::set(*a);
                let ga = <Lanes<$t, $n> as LaneOps<$t, $n>>::set(*a);

                assert_relative_eq!(fa.sum(), ga.sum(), max_relative = $eps);
                assert_eq!(fa.spread::<0>().to_array(), ga.spread::<0>().to_array());
                assert_eq!(fa.spread::<1>().to_array(), ga.spread::<1>().to_array());

                for &s in scalars {
                    assert_eq!(fa.add_scalar(s).to_array(), ga.add_scalar(s).to_array());
                    assert_eq!(fa.sub_scalar(s).to_array(), ga.sub_scalar(s).to_array());
                    assert_eq!(fa.mul_scalar(s).to_array(), ga.mul_scalar(s).to_array());
                    assert_eq!(fa.div_scalar(s).to_array(), ga.div_scalar(s).to_array());
                }

                // Broadcast construction agrees too.
                assert_eq!(
                    <$fast as LaneOps<$t, $n>>::splat(a[0]).to_array(),
                    <Lanes<$t, $n> as LaneOps<$t, $n>>::splat(a[0]).to_array()
                );
            }
        }
    };
}

// Divisors are kept away from zero so lane quotients stay comparable with
// `==` (NaN would compare unequal even to itself).

parity_test!(
    test_f32x4_matches_fallback,
    f32,
    F32x4<4>,
    4,
    &[
        [1.0, 2.0, 3.0, 4.0],
        [-1.5, 0.25, -8.0, 16.0],
        [1.0e30, -1.0e30, 1.0e-30, -1.0e-30],
        [0.1, 0.2, 0.3, 0.4],
        [7.0, 7.0, 7.0, 7.0],
    ],
    &[1.0, -2.5, 0.125, 3.0e10],
    1e-6
);

parity_test!(
    test_f32x4_padded_width3_matches_fallback,
    f32,
    F32x4<3>,
    3,
    &[
        [1.0, 2.0, 3.0],
        [-0.5, 4.0, -2.25],
        [1.0e20, -1.0e20, 1.0e-20],
        [0.1, 0.2, 0.3],
    ],
    &[1.0, -2.5, 0.125],
    1e-6
);

parity_test!(
    test_f32x8_matches_fallback,
    f32,
    F32x8,
    8,
    &[
        [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        [-1.0, 0.5, -0.25, 8.0, -16.0, 32.0, -64.0, 128.0],
        [1.0e15, -1.0e15, 1.0e-15, -1.0e-15, 2.0, -2.0, 0.5, -0.5],
    ],
    &[1.0, -3.5, 0.0625],
    1e-5
);

parity_test!(
    test_f64x2_matches_fallback,
    f64,
    F64x2,
    2,
    &[
        [1.0, 2.0],
        [-1.5, 0.25],
        [1.0e150, 1.0e-150],
        [0.1, 0.7],
    ],
    &[1.0, -2.5, 0.125],
    1e-12
);

parity_test!(
    test_f64x4_matches_fallback,
    f64,
    F64x4<4>,
    4,
    &[
        [1.0, 2.0, 3.0, 4.0],
        [-1.5, 0.25, -8.0, 16.0],
        [1.0e150, -1.0e150, 1.0e-150, -1.0e-150],
        [0.1, 0.2, 0.3, 0.4],
    ],
    &[1.0, -2.5, 0.125],
    1e-12
);

parity_test!(
    test_f64x4_padded_width3_matches_fallback,
    f64,
    F64x4<3>,
    3,
    &[
        [1.0, 2.0, 3.0],
        [-0.5, 4.0, -2.25],
        [1.0e100, -1.0e100, 1.0e-100],
    ],
    &[1.0, -2.5, 0.125],
    1e-12
);

/// The fused multiply-add of the fast paths matches scalar `mul_add`, not
/// mul-then-add: both paths round once.
#[test]
fn test_fma_parity_is_fused() {
    let x = 1.0f64 + f64::EPSILON;
    let fast = <F64x4<4> as LaneOps<f64, 4>>::splat(x);
    let generic = <Lanes<f64, 4> as LaneOps<f64, 4>>::splat(x);
    let f_neg1 = <F64x4<4> as LaneOps<f64, 4>>::splat(-1.0);
    let g_neg1 = <Lanes<f64, 4> as LaneOps<f64, 4>>::splat(-1.0);

    let f = fast.mul_add(fast, f_neg1).to_array()[0];
    let g = generic.mul_add(generic, g_neg1).to_array()[0];
    let scalar = x.mul_add(x, -1.0);
    assert_eq!(f, scalar);
    assert_eq!(g, scalar);
    // And it is genuinely fused: the unfused result differs.
    assert_ne!(scalar, x * x - 1.0);
}
