pub mod metrics;
pub mod server;
pub mod settings;
pub mod torch;

/// Fixed constants of the segmentation contract. The model was trained on
/// 256x256 crops with ImageNet normalization, so the service only accepts
/// that exact shape.
pub mod consts {
    /// Expected input width and height, in pixels
    pub const IMAGE_SIZE: u32 = 256;

    /// Expected number of input channels (RGB)
    pub const CHANNELS: u32 = 3;

    /// Per-channel normalization mean (ImageNet)
    pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

    /// Per-channel normalization standard deviation (ImageNet)
    pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

    /// Probability cutoff separating foreground from background
    pub const MASK_THRESHOLD: f64 = 0.5;

    /// Greeting returned by `GET /`
    pub const GREETING: &str = "Semantic Segmentation API - Torch backed model.";

    /// Opaque message returned for any server-side failure
    pub const RUN_ERROR_MESSAGE: &str = "Error during model run";
}
