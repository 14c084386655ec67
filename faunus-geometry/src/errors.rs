use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("volume must be strictly positive, got {0}")]
    NonPositiveVolume(f64),
    #[error("cylinder and slit geometries only support scaling along z or xy, not both at once")]
    UnsupportedScalePolicy,
    #[error("scale factor {0} is not finite")]
    NonFiniteScaleFactor(f64),
}
