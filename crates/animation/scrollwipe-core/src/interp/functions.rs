//! Interpolation helpers:
//! - lerp_f32 (scalar blend)
//! - bezier_ease_t (cubic-bezier timing curve, solved on X by bisection)
//! - interpolate_value (numeric blend, discrete switch at completion)
//! - frame_index (hard-cut stepping through a list)

use crate::value::Value;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Evaluate a CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve at `t`.
pub fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 ∈ [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Blend `from` → `to` at eased time `t`.
///
/// Numeric values of the same kind interpolate. Discrete values, and numeric
/// values of mismatched kinds, hold `from` until `complete` and then switch to `to`.
pub fn interpolate_value(from: &Value, to: &Value, t: f32, complete: bool) -> Value {
    match (from, to) {
        (Value::Float(a), Value::Float(b))
        | (Value::Percent(a), Value::Percent(b))
        | (Value::Px(a), Value::Px(b)) => to.with_number(lerp_f32(*a, *b, t)),
        _ => {
            if complete {
                to.clone()
            } else {
                from.clone()
            }
        }
    }
}

/// Map normalized progress onto one of `len` frames: `floor(progress * (len - 1))`.
///
/// Always within `[0, len - 1]`; NaN maps to the first frame. `len == 0` yields 0 and
/// callers are expected to guard against empty sequences.
#[inline]
pub fn frame_index(progress: f32, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let last = len - 1;
    let idx = (p * last as f32).floor() as usize;
    idx.min(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bezier_linear_fast_path() {
        assert_eq!(bezier_ease_t(0.3, 0.0, 0.0, 1.0, 1.0), 0.3);
    }

    #[test]
    fn bezier_endpoints_are_fixed() {
        assert!(bezier_ease_t(0.0, 0.42, 0.0, 0.58, 1.0).abs() < 1e-4);
        assert!((bezier_ease_t(1.0, 0.42, 0.0, 0.58, 1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn mismatched_kinds_switch_on_completion() {
        let a = Value::Percent(0.0);
        let b = Value::Px(10.0);
        assert_eq!(interpolate_value(&a, &b, 0.5, false), a);
        assert_eq!(interpolate_value(&a, &b, 1.0, true), b);
    }

    #[test]
    fn frame_index_handles_nan_and_bounds() {
        assert_eq!(frame_index(f32::NAN, 5), 0);
        assert_eq!(frame_index(-1.0, 5), 0);
        assert_eq!(frame_index(2.0, 5), 4);
        assert_eq!(frame_index(0.7, 0), 0);
    }
}
