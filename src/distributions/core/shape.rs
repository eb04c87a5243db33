//! Static shapes and broadcasting rules.
//!
//! Purpose
//! -------
//! Track array shapes in the two flavours a distribution needs: a *static*
//! shape, known when the distribution is described and possibly containing
//! unknown dimensions, and a *dynamic* shape (`Vec<usize>`) resolved from
//! concrete arrays.
//!
//! Key behaviors
//! -------------
//! - [`broadcast_shapes`] implements NumPy broadcasting on concrete shapes.
//! - [`broadcast_static_shapes`] extends the same rules to unknown dims:
//!   `(?, 1) → ?`, `(?, n) → n` for `n > 1`, `(?, ?) → ?`.
//! - [`StaticShape`] renders unknown dims as `?` and checks compatibility
//!   with a concrete shape.
//!
//! Conventions
//! -----------
//! - Shapes are aligned from the trailing dimension; the shorter shape is
//!   left-padded with ones.
//! - Broadcasting failures are reported as `None`; callers turn them into
//!   `DistError::ShapeMismatch` with their own context.

/// StaticShape — a shape whose dimensions may be unknown (`None`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StaticShape(Vec<Option<usize>>);

impl StaticShape {
    /// Build from explicit (possibly unknown) dimensions.
    pub fn new(dims: Vec<Option<usize>>) -> StaticShape {
        StaticShape(dims)
    }

    /// Build a fully-known shape.
    pub fn known(dims: &[usize]) -> StaticShape {
        StaticShape(dims.iter().map(|&d| Some(d)).collect())
    }

    /// The empty (scalar) shape.
    pub fn scalar() -> StaticShape {
        StaticShape(Vec::new())
    }

    /// Dimensions as a list, `None` for unknown entries.
    pub fn as_list(&self) -> Vec<Option<usize>> {
        self.0.clone()
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    pub fn is_fully_defined(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Concrete dimensions, or `None` if any dimension is unknown.
    pub fn to_dims(&self) -> Option<Vec<usize>> {
        self.0.iter().copied().collect()
    }

    /// `true` when `dims` has the same rank and agrees on every known entry.
    pub fn is_compatible_with(&self, dims: &[usize]) -> bool {
        self.0.len() == dims.len()
            && self.0.iter().zip(dims).all(|(s, &d)| s.map_or(true, |s| s == d))
    }
}

impl From<&[usize]> for StaticShape {
    fn from(dims: &[usize]) -> Self {
        StaticShape::known(dims)
    }
}

impl std::fmt::Display for StaticShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match dim {
                Some(d) => write!(f, "{d}")?,
                None => write!(f, "?")?,
            }
        }
        write!(f, "]")
    }
}

/// Broadcast two concrete shapes (NumPy rules).
///
/// Returns `None` when some aligned pair of dimensions differs and neither
/// is `1`.
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut out = vec![0; rank];
    for i in 0..rank {
        let da = if i < rank - a.len() { 1 } else { a[i - (rank - a.len())] };
        let db = if i < rank - b.len() { 1 } else { b[i - (rank - b.len())] };
        out[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }
    Some(out)
}

/// Broadcast two static shapes, treating unknown dims optimistically.
///
/// An unknown dim against `1` (or another unknown) stays unknown; against a
/// known `n > 1` it becomes `n`, since that is the only size that could
/// broadcast. Known pairs follow [`broadcast_shapes`].
pub fn broadcast_static_shapes(a: &StaticShape, b: &StaticShape) -> Option<StaticShape> {
    let (a, b) = (&a.0, &b.0);
    let rank = a.len().max(b.len());
    let mut out = Vec::with_capacity(rank);
    for i in 0..rank {
        let da = if i < rank - a.len() { Some(1) } else { a[i - (rank - a.len())] };
        let db = if i < rank - b.len() { Some(1) } else { b[i - (rank - b.len())] };
        let dim = match (da, db) {
            (Some(x), Some(y)) if x == y => Some(x),
            (Some(1), other) | (other, Some(1)) => other,
            (None, Some(y)) | (Some(y), None) => Some(y),
            (None, None) => None,
            (Some(_), Some(_)) => return None,
        };
        out.push(dim);
    }
    Some(StaticShape(out))
}
