use kurbo::Point;

/// Seeded FNV-1a 64 used to derive stable memo-cache keys from shape state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Orientation of the point triplet `(p0, p1, p2)`:
/// `1` counterclockwise, `-1` clockwise, `0` collinear.
pub(crate) fn orientation(p0: Point, p1: Point, p2: Point) -> i8 {
    let val = (p1.y - p0.y) * (p2.x - p1.x) - (p2.y - p1.y) * (p1.x - p0.x);
    if val > 0.0 {
        1
    } else if val < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether `q` lies on the segment `p..r`, assuming `q` is collinear with it.
pub(crate) fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x >= p.x.min(r.x) && q.x <= p.x.max(r.x) && q.y >= p.y.min(r.y) && q.y <= p.y.max(r.y)
}

/// Segment-segment intersection via orientation predicates, with collinear
/// ties resolved by bounding-box containment.
pub(crate) fn segments_intersect(p0: Point, p1: Point, q0: Point, q1: Point) -> bool {
    let o1 = orientation(p0, p1, q0);
    let o2 = orientation(p0, p1, q1);
    let o3 = orientation(q0, q1, p0);
    let o4 = orientation(q0, q1, p1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == 0 && on_segment(p0, q0, p1))
        || (o2 == 0 && on_segment(p0, q1, p1))
        || (o3 == 0 && on_segment(q0, p0, q1))
        || (o4 == 0 && on_segment(q0, p1, q1))
}

/// Closest point to `p` on the segment `a..b`.
pub(crate) fn project_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Linear interpolation between `x` and `y` by `a`.
pub fn mix(x: f64, y: f64, a: f64) -> f64 {
    x * (1.0 - a) + y * a
}

/// Hermite smoothstep between `edge0` and `edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// `1.0` when `x >= edge`, else `0.0`.
pub fn step(edge: f64, x: f64) -> f64 {
    if x >= edge {
        1.0
    } else {
        0.0
    }
}

/// Fractional part of `x`.
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
