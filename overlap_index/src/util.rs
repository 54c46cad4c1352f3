// Copyright 2025 the Overlap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Returns the smallest `s` with `s.pow(degree) >= num`.
///
/// Used to pick the number of slabs per axis when packing leaves.
#[inline]
pub(crate) fn iroot_ceil(num: usize, degree: usize) -> usize {
    match degree {
        0 => 1,
        1 => num,
        2 => isqrt_ceil(num),
        _ => {
            let mut s = 1_usize;
            while !reaches(s, degree, num) {
                s += 1;
            }
            s
        }
    }
}

/// Returns the square root of the number, rounded up.
#[inline]
const fn isqrt_ceil(num: usize) -> usize {
    let s = num.isqrt();

    // This multiplication cannot overflow because `s` is the rounded-down square root of `num`,
    // i.e., `s * s` is guaranteed to be less than or equal to `num`.
    if s * s < num { s + 1 } else { s }
}

fn reaches(base: usize, degree: usize, num: usize) -> bool {
    let mut acc = 1_usize;
    for _ in 0..degree {
        acc = match acc.checked_mul(base) {
            Some(v) => v,
            None => return true,
        };
    }
    acc >= num
}
