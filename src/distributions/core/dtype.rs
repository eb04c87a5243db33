//! Element types accepted as distribution parameters.
//!
//! Parameters arrive tagged with a [`DType`] so that construction can reject
//! integer and boolean inputs with a typed error instead of silently casting
//! them. All arithmetic inside the crate is carried out in `f64`; the dtype
//! is kept only as metadata (see [`DType::promote`]).

/// DType — element type tag of a parameter or observation array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float32,
    Float64,
    Int32,
    Int64,
    Bool,
}

impl DType {
    /// `true` for the floating-point dtypes (the only ones a Normal accepts).
    pub const fn is_real(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    /// Promote two real dtypes to the wider of the two.
    ///
    /// `float32 ⊕ float32 = float32`, any other real combination gives
    /// `float64`. Non-real inputs are never promoted; callers validate first.
    pub const fn promote(self, other: DType) -> DType {
        match (self, other) {
            (DType::Float32, DType::Float32) => DType::Float32,
            _ => DType::Float64,
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Bool => "bool",
        };
        write!(f, "{name}")
    }
}
