//! Adaptive precision floating-point predicates, following the algorithms
//! and the reference implementation of Jonathan Richard Shewchuk
//! (<https://www.cs.cmu.edu/~quake/robust.html>).
//!
//! The predicates operate on *expansions*: unevaluated sums of floating
//! point values whose components do not overlap. A cheap filtered estimate
//! is refined through successively tighter expansion tiers only when the
//! estimate's error bound cannot certify its sign, so the exact path is
//! rarely taken.

// The constants below match the values computed by Shewchuk's `exactinit`
// for IEEE-754 double precision with round-to-nearest.
const SPLITTER: f64 = 134_217_729f64; // 2^27 + 1
const EPSILON: f64 = f64::EPSILON / 2.0; // 2^-53

const RESULT_ERR_BOUND: f64 = (3.0 + 8.0 * EPSILON) * EPSILON;
const CCW_ERR_BOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const CCW_ERR_BOUND_B: f64 = (2.0 + 12.0 * EPSILON) * EPSILON;
const CCW_ERR_BOUND_C: f64 = (9.0 + 64.0 * EPSILON) * EPSILON * EPSILON;
const ICC_ERR_BOUND_A: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;
const ICC_ERR_BOUND_B: f64 = (4.0 + 48.0 * EPSILON) * EPSILON;
const ICC_ERR_BOUND_C: f64 = (44.0 + 576.0 * EPSILON) * EPSILON * EPSILON;

// ---------------------------------------------------------------------------
// Expansion primitives. All of these are exact: the returned components sum
// to the mathematically correct result.
// ---------------------------------------------------------------------------

#[inline]
fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    // Requires |a| >= |b|.
    let x = a + b;
    let b_virt = x - a;
    (x, b - b_virt)
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let b_virt = x - a;
    let a_virt = x - b_virt;
    let b_round = b - b_virt;
    let a_round = a - a_virt;
    (x, a_round + b_round)
}

#[inline]
fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

#[inline]
fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let b_virt = a - x;
    let a_virt = x + b_virt;
    let b_round = b_virt - b;
    let a_round = a - a_virt;
    a_round + b_round
}

#[inline]
fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let a_big = c - a;
    let hi = c - a_big;
    (hi, a - hi)
}

#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    let x = a * b;
    let (a_hi, a_lo) = split(a);
    let (b_hi, b_lo) = split(b);
    let err = x - a_hi * b_hi;
    let err = err - a_lo * b_hi;
    let err = err - a_hi * b_lo;
    (x, a_lo * b_lo - err)
}

// Variant of `two_product` for a `b` that has already been split; used by
// `scale_expansion_zeroelim` to split the scalar only once.
#[inline]
fn two_product_presplit(a: f64, b: f64, b_hi: f64, b_lo: f64) -> (f64, f64) {
    let x = a * b;
    let (a_hi, a_lo) = split(a);
    let err = x - a_hi * b_hi;
    let err = err - a_lo * b_hi;
    let err = err - a_hi * b_lo;
    (x, a_lo * b_lo - err)
}

#[inline]
fn square(a: f64) -> (f64, f64) {
    let x = a * a;
    let (a_hi, a_lo) = split(a);
    let err = x - a_hi * a_hi;
    let err = err - (a_hi + a_hi) * a_lo;
    (x, a_lo * a_lo - err)
}

#[inline]
fn two_one_sum(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_sum(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

#[inline]
fn two_one_diff(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

#[inline]
fn two_two_sum(a1: f64, a0: f64, b1: f64, b0: f64) -> (f64, f64, f64, f64) {
    let (j, i, x0) = two_one_sum(a1, a0, b0);
    let (x3, x2, x1) = two_one_sum(j, i, b1);
    (x3, x2, x1, x0)
}

#[inline]
fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> (f64, f64, f64, f64) {
    let (j, i, x0) = two_one_diff(a1, a0, b0);
    let (x3, x2, x1) = two_one_diff(j, i, b1);
    (x3, x2, x1, x0)
}

/// Sums two expansions into `h`, eliminating zero components, and returns
/// the number of components written. Both inputs must be nonoverlapping and
/// in increasing order of magnitude; so is the output.
fn fast_expansion_sum_zeroelim(e: &[f64], f: &[f64], h: &mut [f64]) -> usize {
    let mut e_now = e[0];
    let mut f_now = f[0];
    let mut e_index = 0;
    let mut f_index = 0;

    let mut q;
    if (f_now > e_now) == (f_now > -e_now) {
        q = e_now;
        e_index += 1;
    } else {
        q = f_now;
        f_index += 1;
    }

    let mut h_index = 0;
    if e_index < e.len() && f_index < f.len() {
        e_now = e[e_index];
        f_now = f[f_index];
        let (q_new, hh) = if (f_now > e_now) == (f_now > -e_now) {
            e_index += 1;
            fast_two_sum(e_now, q)
        } else {
            f_index += 1;
            fast_two_sum(f_now, q)
        };
        q = q_new;
        if hh != 0.0 {
            h[h_index] = hh;
            h_index += 1;
        }

        while e_index < e.len() && f_index < f.len() {
            e_now = e[e_index];
            f_now = f[f_index];
            let (q_new, hh) = if (f_now > e_now) == (f_now > -e_now) {
                e_index += 1;
                two_sum(q, e_now)
            } else {
                f_index += 1;
                two_sum(q, f_now)
            };
            q = q_new;
            if hh != 0.0 {
                h[h_index] = hh;
                h_index += 1;
            }
        }
    }

    while e_index < e.len() {
        let (q_new, hh) = two_sum(q, e[e_index]);
        q = q_new;
        e_index += 1;
        if hh != 0.0 {
            h[h_index] = hh;
            h_index += 1;
        }
    }

    while f_index < f.len() {
        let (q_new, hh) = two_sum(q, f[f_index]);
        q = q_new;
        f_index += 1;
        if hh != 0.0 {
            h[h_index] = hh;
            h_index += 1;
        }
    }

    if q != 0.0 || h_index == 0 {
        h[h_index] = q;
        h_index += 1;
    }
    h_index
}

/// Multiplies the expansion `e` by the scalar `b`, writing the product into
/// `h` with zero components eliminated. Returns the component count.
fn scale_expansion_zeroelim(e: &[f64], b: f64, h: &mut [f64]) -> usize {
    let (b_hi, b_lo) = split(b);
    let (mut q, hh) = two_product_presplit(e[0], b, b_hi, b_lo);

    let mut h_index = 0;
    if hh != 0.0 {
        h[h_index] = hh;
        h_index += 1;
    }

    for &e_now in &e[1..] {
        let (product1, product0) = two_product_presplit(e_now, b, b_hi, b_lo);
        let (sum, hh) = two_sum(q, product0);
        if hh != 0.0 {
            h[h_index] = hh;
            h_index += 1;
        }
        let (q_new, hh) = fast_two_sum(product1, sum);
        q = q_new;
        if hh != 0.0 {
            h[h_index] = hh;
            h_index += 1;
        }
    }

    if q != 0.0 || h_index == 0 {
        h[h_index] = q;
        h_index += 1;
    }
    h_index
}

/// One-word approximation of an expansion's value.
fn estimate(e: &[f64]) -> f64 {
    let mut q = e[0];
    for component in &e[1..] {
        q += component;
    }
    q
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Returns a value whose sign matches the sign of twice the signed area of
/// the triangle `(pa, pb, pc)`; zero if and only if the points are
/// collinear. Positive means `pc` lies to the left of the directed line
/// `pa -> pb`.
pub(crate) fn orient2d(pa: [f64; 2], pb: [f64; 2], pc: [f64; 2]) -> f64 {
    let det_left = (pa[0] - pc[0]) * (pb[1] - pc[1]);
    let det_right = (pa[1] - pc[1]) * (pb[0] - pc[0]);
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return det;
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return det;
        }
        -det_left - det_right
    } else {
        return det;
    };

    let err_bound = CCW_ERR_BOUND_A * det_sum;
    if det >= err_bound || -det >= err_bound {
        det
    } else {
        orient2d_adapt(pa, pb, pc, det_sum)
    }
}

fn orient2d_adapt(pa: [f64; 2], pb: [f64; 2], pc: [f64; 2], det_sum: f64) -> f64 {
    let acx = pa[0] - pc[0];
    let bcx = pb[0] - pc[0];
    let acy = pa[1] - pc[1];
    let bcy = pb[1] - pc[1];

    let (det_left, det_left_tail) = two_product(acx, bcy);
    let (det_right, det_right_tail) = two_product(acy, bcx);

    let (b3, b2, b1, b0) = two_two_diff(det_left, det_left_tail, det_right, det_right_tail);
    let b = [b0, b1, b2, b3];

    let mut det = estimate(&b);
    let err_bound = CCW_ERR_BOUND_B * det_sum;
    if det >= err_bound || -det >= err_bound {
        return det;
    }

    let acx_tail = two_diff_tail(pa[0], pc[0], acx);
    let bcx_tail = two_diff_tail(pb[0], pc[0], bcx);
    let acy_tail = two_diff_tail(pa[1], pc[1], acy);
    let bcy_tail = two_diff_tail(pb[1], pc[1], bcy);

    if acx_tail == 0.0 && acy_tail == 0.0 && bcx_tail == 0.0 && bcy_tail == 0.0 {
        return det;
    }

    let err_bound = CCW_ERR_BOUND_C * det_sum + RESULT_ERR_BOUND * det.abs();
    det += (acx * bcy_tail + bcy * acx_tail) - (acy * bcx_tail + bcx * acy_tail);
    if det >= err_bound || -det >= err_bound {
        return det;
    }

    let (s1, s0) = two_product(acx_tail, bcy);
    let (t1, t0) = two_product(acy_tail, bcx);
    let (u3, u2, u1, u0) = two_two_diff(s1, s0, t1, t0);
    let u = [u0, u1, u2, u3];
    let mut c1 = [0.0f64; 8];
    let c1_len = fast_expansion_sum_zeroelim(&b, &u, &mut c1);

    let (s1, s0) = two_product(acx, bcy_tail);
    let (t1, t0) = two_product(acy, bcx_tail);
    let (u3, u2, u1, u0) = two_two_diff(s1, s0, t1, t0);
    let u = [u0, u1, u2, u3];
    let mut c2 = [0.0f64; 12];
    let c2_len = fast_expansion_sum_zeroelim(&c1[..c1_len], &u, &mut c2);

    let (s1, s0) = two_product(acx_tail, bcy_tail);
    let (t1, t0) = two_product(acy_tail, bcx_tail);
    let (u3, u2, u1, u0) = two_two_diff(s1, s0, t1, t0);
    let u = [u0, u1, u2, u3];
    let mut d = [0.0f64; 16];
    let d_len = fast_expansion_sum_zeroelim(&c2[..c2_len], &u, &mut d);

    // The largest component carries the sign of the exact determinant.
    d[d_len - 1]
}

// ---------------------------------------------------------------------------
// In-circle
// ---------------------------------------------------------------------------

/// Returns a value whose sign tells whether `pd` lies inside (positive),
/// outside (negative) or on (zero) the circle through `pa`, `pb` and `pc`,
/// assuming the three circle points are in counterclockwise order.
pub(crate) fn incircle(pa: [f64; 2], pb: [f64; 2], pc: [f64; 2], pd: [f64; 2]) -> f64 {
    let adx = pa[0] - pd[0];
    let bdx = pb[0] - pd[0];
    let cdx = pc[0] - pd[0];
    let ady = pa[1] - pd[1];
    let bdy = pb[1] - pd[1];
    let cdy = pc[1] - pd[1];

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let a_lift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let b_lift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let c_lift = cdx * cdx + cdy * cdy;

    let det = a_lift * (bdxcdy - cdxbdy) + b_lift * (cdxady - adxcdy) + c_lift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * a_lift
        + (cdxady.abs() + adxcdy.abs()) * b_lift
        + (adxbdy.abs() + bdxady.abs()) * c_lift;
    let err_bound = ICC_ERR_BOUND_A * permanent;
    if det > err_bound || -det > err_bound {
        return det;
    }
    incircle_adapt(pa, pb, pc, pd, permanent)
}

#[allow(clippy::too_many_lines)]
fn incircle_adapt(pa: [f64; 2], pb: [f64; 2], pc: [f64; 2], pd: [f64; 2], permanent: f64) -> f64 {
    let mut temp8 = [0f64; 8];
    let mut temp16a = [0f64; 16];
    let mut temp16b = [0f64; 16];
    let mut temp16c = [0f64; 16];
    let mut temp32a = [0f64; 32];
    let mut temp32b = [0f64; 32];
    let mut temp48 = [0f64; 48];
    let mut temp64 = [0f64; 64];

    let adx = pa[0] - pd[0];
    let bdx = pb[0] - pd[0];
    let cdx = pc[0] - pd[0];
    let ady = pa[1] - pd[1];
    let bdy = pb[1] - pd[1];
    let cdy = pc[1] - pd[1];

    let (bdxcdy1, bdxcdy0) = two_product(bdx, cdy);
    let (cdxbdy1, cdxbdy0) = two_product(cdx, bdy);
    let (bc3, bc2, bc1, bc0) = two_two_diff(bdxcdy1, bdxcdy0, cdxbdy1, cdxbdy0);
    let bc = [bc0, bc1, bc2, bc3];

    let mut axbc = [0f64; 8];
    let axbc_len = scale_expansion_zeroelim(&bc, adx, &mut axbc);
    let mut axxbc = [0f64; 16];
    let axxbc_len = scale_expansion_zeroelim(&axbc[..axbc_len], adx, &mut axxbc);
    let mut aybc = [0f64; 8];
    let aybc_len = scale_expansion_zeroelim(&bc, ady, &mut aybc);
    let mut ayybc = [0f64; 16];
    let ayybc_len = scale_expansion_zeroelim(&aybc[..aybc_len], ady, &mut ayybc);
    let mut adet = [0f64; 32];
    let a_len = fast_expansion_sum_zeroelim(&axxbc[..axxbc_len], &ayybc[..ayybc_len], &mut adet);

    let (cdxady1, cdxady0) = two_product(cdx, ady);
    let (adxcdy1, adxcdy0) = two_product(adx, cdy);
    let (ca3, ca2, ca1, ca0) = two_two_diff(cdxady1, cdxady0, adxcdy1, adxcdy0);
    let ca = [ca0, ca1, ca2, ca3];

    let mut bxca = [0f64; 8];
    let bxca_len = scale_expansion_zeroelim(&ca, bdx, &mut bxca);
    let mut bxxca = [0f64; 16];
    let bxxca_len = scale_expansion_zeroelim(&bxca[..bxca_len], bdx, &mut bxxca);
    let mut byca = [0f64; 8];
    let byca_len = scale_expansion_zeroelim(&ca, bdy, &mut byca);
    let mut byyca = [0f64; 16];
    let byyca_len = scale_expansion_zeroelim(&byca[..byca_len], bdy, &mut byyca);
    let mut bdet = [0f64; 32];
    let b_len = fast_expansion_sum_zeroelim(&bxxca[..bxxca_len], &byyca[..byyca_len], &mut bdet);

    let (adxbdy1, adxbdy0) = two_product(adx, bdy);
    let (bdxady1, bdxady0) = two_product(bdx, ady);
    let (ab3, ab2, ab1, ab0) = two_two_diff(adxbdy1, adxbdy0, bdxady1, bdxady0);
    let ab = [ab0, ab1, ab2, ab3];

    let mut cxab = [0f64; 8];
    let cxab_len = scale_expansion_zeroelim(&ab, cdx, &mut cxab);
    let mut cxxab = [0f64; 16];
    let cxxab_len = scale_expansion_zeroelim(&cxab[..cxab_len], cdx, &mut cxxab);
    let mut cyab = [0f64; 8];
    let cyab_len = scale_expansion_zeroelim(&ab, cdy, &mut cyab);
    let mut cyyab = [0f64; 16];
    let cyyab_len = scale_expansion_zeroelim(&cyab[..cyab_len], cdy, &mut cyyab);
    let mut cdet = [0f64; 32];
    let c_len = fast_expansion_sum_zeroelim(&cxxab[..cxxab_len], &cyyab[..cyyab_len], &mut cdet);

    let mut abdet = [0f64; 64];
    let ab_len = fast_expansion_sum_zeroelim(&adet[..a_len], &bdet[..b_len], &mut abdet);
    let mut fin1 = [0f64; 1152];
    let mut fin2 = [0f64; 1152];
    let mut fin_length = fast_expansion_sum_zeroelim(&abdet[..ab_len], &cdet[..c_len], &mut fin1);

    let mut det = estimate(&fin1[..fin_length]);
    let err_bound = ICC_ERR_BOUND_B * permanent;
    if det >= err_bound || -det >= err_bound {
        return det;
    }

    let adx_tail = two_diff_tail(pa[0], pd[0], adx);
    let ady_tail = two_diff_tail(pa[1], pd[1], ady);
    let bdx_tail = two_diff_tail(pb[0], pd[0], bdx);
    let bdy_tail = two_diff_tail(pb[1], pd[1], bdy);
    let cdx_tail = two_diff_tail(pc[0], pd[0], cdx);
    let cdy_tail = two_diff_tail(pc[1], pd[1], cdy);
    if adx_tail == 0.0
        && bdx_tail == 0.0
        && cdx_tail == 0.0
        && ady_tail == 0.0
        && bdy_tail == 0.0
        && cdy_tail == 0.0
    {
        return det;
    }

    let err_bound = ICC_ERR_BOUND_C * permanent + RESULT_ERR_BOUND * det.abs();
    det += ((adx * adx + ady * ady)
        * ((bdx * cdy_tail + cdy * bdx_tail) - (bdy * cdx_tail + cdx * bdy_tail))
        + 2.0 * (adx * adx_tail + ady * ady_tail) * (bdx * cdy - bdy * cdx))
        + ((bdx * bdx + bdy * bdy)
            * ((cdx * ady_tail + ady * cdx_tail) - (cdy * adx_tail + adx * cdy_tail))
            + 2.0 * (bdx * bdx_tail + bdy * bdy_tail) * (cdx * ady - cdy * adx))
        + ((cdx * cdx + cdy * cdy)
            * ((adx * bdy_tail + bdy * adx_tail) - (ady * bdx_tail + bdx * ady_tail))
            + 2.0 * (cdx * cdx_tail + cdy * cdy_tail) * (adx * bdy - ady * bdx));
    if det >= err_bound || -det >= err_bound {
        return det;
    }

    // Exact tier. Accumulate every second-order correction term into the
    // running expansion `fin1`.

    let mut aa = [0f64; 4];
    if bdx_tail != 0.0 || bdy_tail != 0.0 || cdx_tail != 0.0 || cdy_tail != 0.0 {
        let (adxadx1, adxadx0) = square(adx);
        let (adyady1, adyady0) = square(ady);
        let (aa3, aa2, aa1, aa0) = two_two_sum(adxadx1, adxadx0, adyady1, adyady0);
        aa = [aa0, aa1, aa2, aa3];
    }

    let mut bb = [0f64; 4];
    if cdx_tail != 0.0 || cdy_tail != 0.0 || adx_tail != 0.0 || ady_tail != 0.0 {
        let (bdxbdx1, bdxbdx0) = square(bdx);
        let (bdybdy1, bdybdy0) = square(bdy);
        let (bb3, bb2, bb1, bb0) = two_two_sum(bdxbdx1, bdxbdx0, bdybdy1, bdybdy0);
        bb = [bb0, bb1, bb2, bb3];
    }

    let mut cc = [0f64; 4];
    if adx_tail != 0.0 || ady_tail != 0.0 || bdx_tail != 0.0 || bdy_tail != 0.0 {
        let (cdxcdx1, cdxcdx0) = square(cdx);
        let (cdycdy1, cdycdy0) = square(cdy);
        let (cc3, cc2, cc1, cc0) = two_two_sum(cdxcdx1, cdxcdx0, cdycdy1, cdycdy0);
        cc = [cc0, cc1, cc2, cc3];
    }

    let mut axtbc = [0f64; 8];
    let mut axtbc_len = 0;
    if adx_tail != 0.0 {
        axtbc_len = scale_expansion_zeroelim(&bc, adx_tail, &mut axtbc);
        let temp16a_len = scale_expansion_zeroelim(&axtbc[..axtbc_len], 2.0 * adx, &mut temp16a);

        let mut axtcc = [0f64; 8];
        let axtcc_len = scale_expansion_zeroelim(&cc, adx_tail, &mut axtcc);
        let temp16b_len = scale_expansion_zeroelim(&axtcc[..axtcc_len], bdy, &mut temp16b);

        let mut axtbb = [0f64; 8];
        let axtbb_len = scale_expansion_zeroelim(&bb, adx_tail, &mut axtbb);
        let temp16c_len = scale_expansion_zeroelim(&axtbb[..axtbb_len], -cdy, &mut temp16c);

        let temp32a_len =
            fast_expansion_sum_zeroelim(&temp16a[..temp16a_len], &temp16b[..temp16b_len], &mut temp32a);
        let temp48_len =
            fast_expansion_sum_zeroelim(&temp16c[..temp16c_len], &temp32a[..temp32a_len], &mut temp48);
        fin_length =
            fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
        core::mem::swap(&mut fin1, &mut fin2);
    }

    let mut aytbc = [0f64; 8];
    let mut aytbc_len = 0;
    if ady_tail != 0.0 {
        aytbc_len = scale_expansion_zeroelim(&bc, ady_tail, &mut aytbc);
        let temp16a_len = scale_expansion_zeroelim(&aytbc[..aytbc_len], 2.0 * ady, &mut temp16a);

        let mut aytcc = [0f64; 8];
        let aytcc_len = scale_expansion_zeroelim(&cc, ady_tail, &mut aytcc);
        let temp16b_len = scale_expansion_zeroelim(&aytcc[..aytcc_len], cdx, &mut temp16b);

        let mut aytbb = [0f64; 8];
        let aytbb_len = scale_expansion_zeroelim(&bb, ady_tail, &mut aytbb);
        let temp16c_len = scale_expansion_zeroelim(&aytbb[..aytbb_len], -bdx, &mut temp16c);

        let temp32a_len =
            fast_expansion_sum_zeroelim(&temp16a[..temp16a_len], &temp16b[..temp16b_len], &mut temp32a);
        let temp48_len =
            fast_expansion_sum_zeroelim(&temp16c[..temp16c_len], &temp32a[..temp32a_len], &mut temp48);
        fin_length =
            fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
        core::mem::swap(&mut fin1, &mut fin2);
    }

    let mut bxtca = [0f64; 8];
    let mut bxtca_len = 0;
    if bdx_tail != 0.0 {
        bxtca_len = scale_expansion_zeroelim(&ca, bdx_tail, &mut bxtca);
        let temp16a_len = scale_expansion_zeroelim(&bxtca[..bxtca_len], 2.0 * bdx, &mut temp16a);

        let mut bxtaa = [0f64; 8];
        let bxtaa_len = scale_expansion_zeroelim(&aa, bdx_tail, &mut bxtaa);
        let temp16b_len = scale_expansion_zeroelim(&bxtaa[..bxtaa_len], cdy, &mut temp16b);

        let mut bxtcc = [0f64; 8];
        let bxtcc_len = scale_expansion_zeroelim(&cc, bdx_tail, &mut bxtcc);
        let temp16c_len = scale_expansion_zeroelim(&bxtcc[..bxtcc_len], -ady, &mut temp16c);

        let temp32a_len =
            fast_expansion_sum_zeroelim(&temp16a[..temp16a_len], &temp16b[..temp16b_len], &mut temp32a);
        let temp48_len =
            fast_expansion_sum_zeroelim(&temp16c[..temp16c_len], &temp32a[..temp32a_len], &mut temp48);
        fin_length =
            fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
        core::mem::swap(&mut fin1, &mut fin2);
    }

    let mut bytca = [0f64; 8];
    let mut bytca_len = 0;
    if bdy_tail != 0.0 {
        bytca_len = scale_expansion_zeroelim(&ca, bdy_tail, &mut bytca);
        let temp16a_len = scale_expansion_zeroelim(&bytca[..bytca_len], 2.0 * bdy, &mut temp16a);

        let mut bytcc = [0f64; 8];
        let bytcc_len = scale_expansion_zeroelim(&cc, bdy_tail, &mut bytcc);
        let temp16b_len = scale_expansion_zeroelim(&bytcc[..bytcc_len], adx, &mut temp16b);

        let mut bytaa = [0f64; 8];
        let bytaa_len = scale_expansion_zeroelim(&aa, bdy_tail, &mut bytaa);
        let temp16c_len = scale_expansion_zeroelim(&bytaa[..bytaa_len], -cdx, &mut temp16c);

        let temp32a_len =
            fast_expansion_sum_zeroelim(&temp16a[..temp16a_len], &temp16b[..temp16b_len], &mut temp32a);
        let temp48_len =
            fast_expansion_sum_zeroelim(&temp16c[..temp16c_len], &temp32a[..temp32a_len], &mut temp48);
        fin_length =
            fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
        core::mem::swap(&mut fin1, &mut fin2);
    }

    let mut cxtab = [0f64; 8];
    let mut cxtab_len = 0;
    if cdx_tail != 0.0 {
        cxtab_len = scale_expansion_zeroelim(&ab, cdx_tail, &mut cxtab);
        let temp16a_len = scale_expansion_zeroelim(&cxtab[..cxtab_len], 2.0 * cdx, &mut temp16a);

        let mut cxtbb = [0f64; 8];
        let cxtbb_len = scale_expansion_zeroelim(&bb, cdx_tail, &mut cxtbb);
        let temp16b_len = scale_expansion_zeroelim(&cxtbb[..cxtbb_len], ady, &mut temp16b);

        let mut cxtaa = [0f64; 8];
        let cxtaa_len = scale_expansion_zeroelim(&aa, cdx_tail, &mut cxtaa);
        let temp16c_len = scale_expansion_zeroelim(&cxtaa[..cxtaa_len], -bdy, &mut temp16c);

        let temp32a_len =
            fast_expansion_sum_zeroelim(&temp16a[..temp16a_len], &temp16b[..temp16b_len], &mut temp32a);
        let temp48_len =
            fast_expansion_sum_zeroelim(&temp16c[..temp16c_len], &temp32a[..temp32a_len], &mut temp48);
        fin_length =
            fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
        core::mem::swap(&mut fin1, &mut fin2);
    }

    let mut cytab = [0f64; 8];
    let mut cytab_len = 0;
    if cdy_tail != 0.0 {
        cytab_len = scale_expansion_zeroelim(&ab, cdy_tail, &mut cytab);
        let temp16a_len = scale_expansion_zeroelim(&cytab[..cytab_len], 2.0 * cdy, &mut temp16a);

        let mut cytaa = [0f64; 8];
        let cytaa_len = scale_expansion_zeroelim(&aa, cdy_tail, &mut cytaa);
        let temp16b_len = scale_expansion_zeroelim(&cytaa[..cytaa_len], bdx, &mut temp16b);

        let mut cytbb = [0f64; 8];
        let cytbb_len = scale_expansion_zeroelim(&bb, cdy_tail, &mut cytbb);
        let temp16c_len = scale_expansion_zeroelim(&cytbb[..cytbb_len], -adx, &mut temp16c);

        let temp32a_len =
            fast_expansion_sum_zeroelim(&temp16a[..temp16a_len], &temp16b[..temp16b_len], &mut temp32a);
        let temp48_len =
            fast_expansion_sum_zeroelim(&temp16c[..temp16c_len], &temp32a[..temp32a_len], &mut temp48);
        fin_length =
            fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
        core::mem::swap(&mut fin1, &mut fin2);
    }

    if adx_tail != 0.0 || ady_tail != 0.0 {
        let mut bct = [0f64; 8];
        let mut bctt = [0f64; 4];
        let bct_len;
        let bctt_len;
        if bdx_tail != 0.0 || bdy_tail != 0.0 || cdx_tail != 0.0 || cdy_tail != 0.0 {
            let (ti1, ti0) = two_product(bdx_tail, cdy);
            let (tj1, tj0) = two_product(bdx, cdy_tail);
            let (u3, u2, u1, u0) = two_two_sum(ti1, ti0, tj1, tj0);
            let u = [u0, u1, u2, u3];
            let (ti1, ti0) = two_product(cdx_tail, -bdy);
            let (tj1, tj0) = two_product(cdx, -bdy_tail);
            let (v3, v2, v1, v0) = two_two_sum(ti1, ti0, tj1, tj0);
            let v = [v0, v1, v2, v3];
            bct_len = fast_expansion_sum_zeroelim(&u, &v, &mut bct);

            let (ti1, ti0) = two_product(bdx_tail, cdy_tail);
            let (tj1, tj0) = two_product(cdx_tail, bdy_tail);
            let (bctt3, bctt2, bctt1, bctt0) = two_two_diff(ti1, ti0, tj1, tj0);
            bctt = [bctt0, bctt1, bctt2, bctt3];
            bctt_len = 4;
        } else {
            bct[0] = 0.0;
            bct_len = 1;
            bctt[0] = 0.0;
            bctt_len = 1;
        }

        if adx_tail != 0.0 {
            let temp16a_len = scale_expansion_zeroelim(&axtbc[..axtbc_len], adx_tail, &mut temp16a);
            let mut axtbct = [0f64; 16];
            let axtbct_len = scale_expansion_zeroelim(&bct[..bct_len], adx_tail, &mut axtbct);
            let temp32a_len =
                scale_expansion_zeroelim(&axtbct[..axtbct_len], 2.0 * adx, &mut temp32a);
            let temp48_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp32a[..temp32a_len],
                &mut temp48,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);

            if bdy_tail != 0.0 {
                let temp8_len = scale_expansion_zeroelim(&cc, adx_tail, &mut temp8);
                let temp16a_len =
                    scale_expansion_zeroelim(&temp8[..temp8_len], bdy_tail, &mut temp16a);
                fin_length = fast_expansion_sum_zeroelim(
                    &fin1[..fin_length],
                    &temp16a[..temp16a_len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
            if cdy_tail != 0.0 {
                let temp8_len = scale_expansion_zeroelim(&bb, -adx_tail, &mut temp8);
                let temp16a_len =
                    scale_expansion_zeroelim(&temp8[..temp8_len], cdy_tail, &mut temp16a);
                fin_length = fast_expansion_sum_zeroelim(
                    &fin1[..fin_length],
                    &temp16a[..temp16a_len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }

            let temp32a_len = scale_expansion_zeroelim(&axtbct[..axtbct_len], adx_tail, &mut temp32a);
            let mut axtbctt = [0f64; 8];
            let axtbctt_len = scale_expansion_zeroelim(&bctt[..bctt_len], adx_tail, &mut axtbctt);
            let temp16a_len =
                scale_expansion_zeroelim(&axtbctt[..axtbctt_len], 2.0 * adx, &mut temp16a);
            let temp16b_len =
                scale_expansion_zeroelim(&axtbctt[..axtbctt_len], adx_tail, &mut temp16b);
            let temp32b_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp16b[..temp16b_len],
                &mut temp32b,
            );
            let temp64_len = fast_expansion_sum_zeroelim(
                &temp32a[..temp32a_len],
                &temp32b[..temp32b_len],
                &mut temp64,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp64[..temp64_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        if ady_tail != 0.0 {
            let temp16a_len = scale_expansion_zeroelim(&aytbc[..aytbc_len], ady_tail, &mut temp16a);
            let mut aytbct = [0f64; 16];
            let aytbct_len = scale_expansion_zeroelim(&bct[..bct_len], ady_tail, &mut aytbct);
            let temp32a_len =
                scale_expansion_zeroelim(&aytbct[..aytbct_len], 2.0 * ady, &mut temp32a);
            let temp48_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp32a[..temp32a_len],
                &mut temp48,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);

            let temp32a_len = scale_expansion_zeroelim(&aytbct[..aytbct_len], ady_tail, &mut temp32a);
            let mut aytbctt = [0f64; 8];
            let aytbctt_len = scale_expansion_zeroelim(&bctt[..bctt_len], ady_tail, &mut aytbctt);
            let temp16a_len =
                scale_expansion_zeroelim(&aytbctt[..aytbctt_len], 2.0 * ady, &mut temp16a);
            let temp16b_len =
                scale_expansion_zeroelim(&aytbctt[..aytbctt_len], ady_tail, &mut temp16b);
            let temp32b_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp16b[..temp16b_len],
                &mut temp32b,
            );
            let temp64_len = fast_expansion_sum_zeroelim(
                &temp32a[..temp32a_len],
                &temp32b[..temp32b_len],
                &mut temp64,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp64[..temp64_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }
    }

    if bdx_tail != 0.0 || bdy_tail != 0.0 {
        let mut cat = [0f64; 8];
        let mut catt = [0f64; 4];
        let cat_len;
        let catt_len;
        if cdx_tail != 0.0 || cdy_tail != 0.0 || adx_tail != 0.0 || ady_tail != 0.0 {
            let (ti1, ti0) = two_product(cdx_tail, ady);
            let (tj1, tj0) = two_product(cdx, ady_tail);
            let (u3, u2, u1, u0) = two_two_sum(ti1, ti0, tj1, tj0);
            let u = [u0, u1, u2, u3];
            let (ti1, ti0) = two_product(adx_tail, -cdy);
            let (tj1, tj0) = two_product(adx, -cdy_tail);
            let (v3, v2, v1, v0) = two_two_sum(ti1, ti0, tj1, tj0);
            let v = [v0, v1, v2, v3];
            cat_len = fast_expansion_sum_zeroelim(&u, &v, &mut cat);

            let (ti1, ti0) = two_product(cdx_tail, ady_tail);
            let (tj1, tj0) = two_product(adx_tail, cdy_tail);
            let (catt3, catt2, catt1, catt0) = two_two_diff(ti1, ti0, tj1, tj0);
            catt = [catt0, catt1, catt2, catt3];
            catt_len = 4;
        } else {
            cat[0] = 0.0;
            cat_len = 1;
            catt[0] = 0.0;
            catt_len = 1;
        }

        if bdx_tail != 0.0 {
            let temp16a_len = scale_expansion_zeroelim(&bxtca[..bxtca_len], bdx_tail, &mut temp16a);
            let mut bxtcat = [0f64; 16];
            let bxtcat_len = scale_expansion_zeroelim(&cat[..cat_len], bdx_tail, &mut bxtcat);
            let temp32a_len =
                scale_expansion_zeroelim(&bxtcat[..bxtcat_len], 2.0 * bdx, &mut temp32a);
            let temp48_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp32a[..temp32a_len],
                &mut temp48,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);

            if cdy_tail != 0.0 {
                let temp8_len = scale_expansion_zeroelim(&aa, bdx_tail, &mut temp8);
                let temp16a_len =
                    scale_expansion_zeroelim(&temp8[..temp8_len], cdy_tail, &mut temp16a);
                fin_length = fast_expansion_sum_zeroelim(
                    &fin1[..fin_length],
                    &temp16a[..temp16a_len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
            if ady_tail != 0.0 {
                let temp8_len = scale_expansion_zeroelim(&cc, -bdx_tail, &mut temp8);
                let temp16a_len =
                    scale_expansion_zeroelim(&temp8[..temp8_len], ady_tail, &mut temp16a);
                fin_length = fast_expansion_sum_zeroelim(
                    &fin1[..fin_length],
                    &temp16a[..temp16a_len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }

            let temp32a_len = scale_expansion_zeroelim(&bxtcat[..bxtcat_len], bdx_tail, &mut temp32a);
            let mut bxtcatt = [0f64; 8];
            let bxtcatt_len = scale_expansion_zeroelim(&catt[..catt_len], bdx_tail, &mut bxtcatt);
            let temp16a_len =
                scale_expansion_zeroelim(&bxtcatt[..bxtcatt_len], 2.0 * bdx, &mut temp16a);
            let temp16b_len =
                scale_expansion_zeroelim(&bxtcatt[..bxtcatt_len], bdx_tail, &mut temp16b);
            let temp32b_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp16b[..temp16b_len],
                &mut temp32b,
            );
            let temp64_len = fast_expansion_sum_zeroelim(
                &temp32a[..temp32a_len],
                &temp32b[..temp32b_len],
                &mut temp64,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp64[..temp64_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        if bdy_tail != 0.0 {
            let temp16a_len = scale_expansion_zeroelim(&bytca[..bytca_len], bdy_tail, &mut temp16a);
            let mut bytcat = [0f64; 16];
            let bytcat_len = scale_expansion_zeroelim(&cat[..cat_len], bdy_tail, &mut bytcat);
            let temp32a_len =
                scale_expansion_zeroelim(&bytcat[..bytcat_len], 2.0 * bdy, &mut temp32a);
            let temp48_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp32a[..temp32a_len],
                &mut temp48,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);

            let temp32a_len = scale_expansion_zeroelim(&bytcat[..bytcat_len], bdy_tail, &mut temp32a);
            let mut bytcatt = [0f64; 8];
            let bytcatt_len = scale_expansion_zeroelim(&catt[..catt_len], bdy_tail, &mut bytcatt);
            let temp16a_len =
                scale_expansion_zeroelim(&bytcatt[..bytcatt_len], 2.0 * bdy, &mut temp16a);
            let temp16b_len =
                scale_expansion_zeroelim(&bytcatt[..bytcatt_len], bdy_tail, &mut temp16b);
            let temp32b_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp16b[..temp16b_len],
                &mut temp32b,
            );
            let temp64_len = fast_expansion_sum_zeroelim(
                &temp32a[..temp32a_len],
                &temp32b[..temp32b_len],
                &mut temp64,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp64[..temp64_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }
    }

    if cdx_tail != 0.0 || cdy_tail != 0.0 {
        let mut abt = [0f64; 8];
        let mut abtt = [0f64; 4];
        let abt_len;
        let abtt_len;
        if adx_tail != 0.0 || ady_tail != 0.0 || bdx_tail != 0.0 || bdy_tail != 0.0 {
            let (ti1, ti0) = two_product(adx_tail, bdy);
            let (tj1, tj0) = two_product(adx, bdy_tail);
            let (u3, u2, u1, u0) = two_two_sum(ti1, ti0, tj1, tj0);
            let u = [u0, u1, u2, u3];
            let (ti1, ti0) = two_product(bdx_tail, -ady);
            let (tj1, tj0) = two_product(bdx, -ady_tail);
            let (v3, v2, v1, v0) = two_two_sum(ti1, ti0, tj1, tj0);
            let v = [v0, v1, v2, v3];
            abt_len = fast_expansion_sum_zeroelim(&u, &v, &mut abt);

            let (ti1, ti0) = two_product(adx_tail, bdy_tail);
            let (tj1, tj0) = two_product(bdx_tail, ady_tail);
            let (abtt3, abtt2, abtt1, abtt0) = two_two_diff(ti1, ti0, tj1, tj0);
            abtt = [abtt0, abtt1, abtt2, abtt3];
            abtt_len = 4;
        } else {
            abt[0] = 0.0;
            abt_len = 1;
            abtt[0] = 0.0;
            abtt_len = 1;
        }

        if cdx_tail != 0.0 {
            let temp16a_len = scale_expansion_zeroelim(&cxtab[..cxtab_len], cdx_tail, &mut temp16a);
            let mut cxtabt = [0f64; 16];
            let cxtabt_len = scale_expansion_zeroelim(&abt[..abt_len], cdx_tail, &mut cxtabt);
            let temp32a_len =
                scale_expansion_zeroelim(&cxtabt[..cxtabt_len], 2.0 * cdx, &mut temp32a);
            let temp48_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp32a[..temp32a_len],
                &mut temp48,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);

            if ady_tail != 0.0 {
                let temp8_len = scale_expansion_zeroelim(&bb, cdx_tail, &mut temp8);
                let temp16a_len =
                    scale_expansion_zeroelim(&temp8[..temp8_len], ady_tail, &mut temp16a);
                fin_length = fast_expansion_sum_zeroelim(
                    &fin1[..fin_length],
                    &temp16a[..temp16a_len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }
            if bdy_tail != 0.0 {
                let temp8_len = scale_expansion_zeroelim(&aa, -cdx_tail, &mut temp8);
                let temp16a_len =
                    scale_expansion_zeroelim(&temp8[..temp8_len], bdy_tail, &mut temp16a);
                fin_length = fast_expansion_sum_zeroelim(
                    &fin1[..fin_length],
                    &temp16a[..temp16a_len],
                    &mut fin2,
                );
                core::mem::swap(&mut fin1, &mut fin2);
            }

            let temp32a_len = scale_expansion_zeroelim(&cxtabt[..cxtabt_len], cdx_tail, &mut temp32a);
            let mut cxtabtt = [0f64; 8];
            let cxtabtt_len = scale_expansion_zeroelim(&abtt[..abtt_len], cdx_tail, &mut cxtabtt);
            let temp16a_len =
                scale_expansion_zeroelim(&cxtabtt[..cxtabtt_len], 2.0 * cdx, &mut temp16a);
            let temp16b_len =
                scale_expansion_zeroelim(&cxtabtt[..cxtabtt_len], cdx_tail, &mut temp16b);
            let temp32b_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp16b[..temp16b_len],
                &mut temp32b,
            );
            let temp64_len = fast_expansion_sum_zeroelim(
                &temp32a[..temp32a_len],
                &temp32b[..temp32b_len],
                &mut temp64,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp64[..temp64_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }

        if cdy_tail != 0.0 {
            let temp16a_len = scale_expansion_zeroelim(&cytab[..cytab_len], cdy_tail, &mut temp16a);
            let mut cytabt = [0f64; 16];
            let cytabt_len = scale_expansion_zeroelim(&abt[..abt_len], cdy_tail, &mut cytabt);
            let temp32a_len =
                scale_expansion_zeroelim(&cytabt[..cytabt_len], 2.0 * cdy, &mut temp32a);
            let temp48_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp32a[..temp32a_len],
                &mut temp48,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp48[..temp48_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);

            let temp32a_len = scale_expansion_zeroelim(&cytabt[..cytabt_len], cdy_tail, &mut temp32a);
            let mut cytabtt = [0f64; 8];
            let cytabtt_len = scale_expansion_zeroelim(&abtt[..abtt_len], cdy_tail, &mut cytabtt);
            let temp16a_len =
                scale_expansion_zeroelim(&cytabtt[..cytabtt_len], 2.0 * cdy, &mut temp16a);
            let temp16b_len =
                scale_expansion_zeroelim(&cytabtt[..cytabtt_len], cdy_tail, &mut temp16b);
            let temp32b_len = fast_expansion_sum_zeroelim(
                &temp16a[..temp16a_len],
                &temp16b[..temp16b_len],
                &mut temp32b,
            );
            let temp64_len = fast_expansion_sum_zeroelim(
                &temp32a[..temp32a_len],
                &temp32b[..temp32b_len],
                &mut temp64,
            );
            fin_length =
                fast_expansion_sum_zeroelim(&fin1[..fin_length], &temp64[..temp64_len], &mut fin2);
            core::mem::swap(&mut fin1, &mut fin2);
        }
    }

    fin1[fin_length - 1]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_two_sum_is_exact() {
        let (x, y) = two_sum(1e16, 1.0);
        // 1e16 + 1 is not representable; the tail recovers the lost unit.
        assert_eq!(x + y, 1e16 + 1.0);
        assert_ne!(y, 0.0);

        // The exact sum of the doubles nearest to 0.1 and 0.2 is not
        // representable, so the tail must be non-zero.
        let (x, y) = two_sum(0.1, 0.2);
        assert_eq!(x, 0.1 + 0.2);
        assert_ne!(y, 0.0);
    }

    #[test]
    fn test_two_product_is_exact() {
        let a = 1.0 + f64::EPSILON;
        let b = 1.0 - f64::EPSILON;
        let (x, y) = two_product(a, b);
        // a * b = 1 - eps^2 exactly; the head rounds to 1.
        assert_eq!(x, 1.0);
        assert_eq!(y, -f64::EPSILON * f64::EPSILON);
    }

    #[test]
    fn test_split_halves_bits() {
        let (hi, lo) = split(core::f64::consts::PI);
        assert_eq!(hi + lo, core::f64::consts::PI);
        assert!(lo.abs() <= hi.abs() * 2f64.powi(-26));
    }

    #[test]
    fn test_expansion_sum_zeroelim() {
        let e = [1e-30, 1e0];
        let f = [1e-15, 1e15];
        let mut h = [0f64; 4];
        let len = fast_expansion_sum_zeroelim(&e, &f, &mut h);
        let total: f64 = h[..len].iter().sum();
        assert_eq!(total, 1e15 + 1e0 + 1e-15);
    }

    #[test]
    fn test_scale_expansion_zeroelim() {
        let e = [0.5, 2.0];
        let mut h = [0f64; 4];
        let len = scale_expansion_zeroelim(&e, 3.0, &mut h);
        let total: f64 = h[..len].iter().sum();
        assert_eq!(total, 7.5);
    }

    #[test]
    fn test_orient2d_exact_zero() {
        // Collinear points at awkward magnitudes still give exactly zero.
        let a = [0.1, 0.1];
        let b = [0.2, 0.2];
        let c = [0.3, 0.3];
        assert_eq!(orient2d(a, b, c), 0.0);
    }

    #[test]
    fn test_orient2d_near_collinear_sign() {
        // A perturbation of one ulp must flip the result away from zero
        // deterministically.
        let a = [12.0, 12.0];
        let b = [24.0, 24.0];
        let eps = f64::EPSILON;
        let left = [0.5, 0.5 + eps];
        let right = [0.5, 0.5 - eps];
        assert!(orient2d(a, b, left) > 0.0);
        assert!(orient2d(a, b, right) < 0.0);
        assert_eq!(orient2d(a, b, [0.5, 0.5]), 0.0);
    }

    #[test]
    fn test_incircle_simple() {
        let a = [0.0, 0.0];
        let b = [1.0, 0.0];
        let c = [0.0, 1.0];
        assert!(incircle(a, b, c, [0.5, 0.5]) > 0.0);
        assert!(incircle(a, b, c, [2.0, 2.0]) < 0.0);
        // Cocircular.
        assert_eq!(incircle(a, b, c, [1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_incircle_near_cocircular() {
        // Unit square plus a center point one ulp off the circumcircle.
        let a = [0.0, 0.0];
        let b = [1.0, 0.0];
        let c = [1.0, 1.0];
        let eps = 2f64.powi(-52);
        let just_inside = [0.5, 0.5 + eps];
        let res = incircle(a, b, c, just_inside);
        assert_ne!(res, 0.0);
        // (0.5, 0.5 + eps) moves towards the circle's center for the circle
        // through the three corners, so it must test inside.
        assert!(res > 0.0);
    }
}
