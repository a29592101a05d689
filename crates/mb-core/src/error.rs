use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    InvalidStride,
    EmptyImage,
    InvalidTileSize { tile_size: usize, max_distance: f32 },
    InvalidRadius(f32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::EmptyImage => write!(f, "image has zero width or height"),
            Self::InvalidTileSize {
                tile_size,
                max_distance,
            } => write!(
                f,
                "tile size {tile_size} must be non-zero and at least max distance {max_distance}"
            ),
            Self::InvalidRadius(r) => write!(f, "radius must be finite and positive, got {r}"),
        }
    }
}

impl std::error::Error for Error {}
