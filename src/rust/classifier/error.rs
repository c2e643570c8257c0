use thiserror::Error;

/// Represents the different types of errors that can occur while extracting
/// features or classifying a waste item.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The input image is empty or could not be processed
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    /// The probability vector handed to the decision engine is unusable
    #[error("Malformed probability vector: {0}")]
    MalformedProbabilityVector(String),
    /// A feature vector does not match the expected layout
    #[error("Malformed feature vector: {0}")]
    MalformedFeatureVector(String),
    /// The attached probabilistic model failed or is missing
    #[error("Model error: {0}")]
    ModelError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// The image could not be decoded
    #[error("Image decoding error: {0}")]
    ImageLoad(#[from] image::ImageError),
}
