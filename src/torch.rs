//! Code for loading and running the (trained) TorchScript segmentation model

use crate::consts::{CHANNELS, IMAGE_SIZE, MASK_THRESHOLD, MEAN, STD};
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use image::{ImageBuffer, ImageOutputFormat, Luma, RgbImage};
use std::io::Cursor;
use tch::{no_grad, Kind, Tensor};

/// Load and run a TorchScript file
#[derive(Debug)]
pub struct SegmentationModel {
    /// The loaded torch model
    model: tch::CModule,
}

impl SegmentationModel {
    pub fn load(filename: &str) -> Result<Self> {
        Ok(SegmentationModel {
            model: tch::CModule::load(filename)?,
        })
    }

    /// Run the whole pipeline on a decoded RGB image: normalize, forward,
    /// threshold, and return the binary mask as a base64 PNG
    pub fn segment(&self, image: &RgbImage) -> Result<String> {
        let input = preprocess(image);
        let output = no_grad(|| self.model.forward_ts(&[input]))?;
        let mask = threshold(&output)?;
        mask_to_base64_png(&mask)
    }
}

/// Convert an RGB image to a normalized float tensor of shape
/// `[1, 3, H, W]`: scale to [0, 1], subtract the per-channel mean, divide
/// by the per-channel std
pub fn preprocess(image: &RgbImage) -> Tensor {
    let (width, height) = image.dimensions();
    let pixels = Tensor::from_slice(image.as_raw())
        .view([height as i64, width as i64, CHANNELS as i64])
        .to_kind(Kind::Float)
        / 255.0;

    // mean/std broadcast over the trailing channel axis
    let mean = Tensor::from_slice(&MEAN);
    let std = Tensor::from_slice(&STD);
    let normalized = (pixels - mean) / std;

    // HWC -> CHW, then add the batch dimension
    normalized.permute([2, 0, 1]).unsqueeze(0)
}

/// Collapse a single-channel probability map into 0/255 grayscale bytes,
/// cutting at [`MASK_THRESHOLD`]
pub fn threshold(output: &Tensor) -> Result<Vec<u8>> {
    let probs = output.squeeze();
    let expected = vec![IMAGE_SIZE as i64, IMAGE_SIZE as i64];
    if probs.size() != expected {
        return Err(anyhow!(
            "model produced output shape {:?}, expected {:?}",
            probs.size(),
            expected
        ));
    }

    let mask = probs.gt(MASK_THRESHOLD).to_kind(Kind::Uint8) * 255;
    let numel = (IMAGE_SIZE * IMAGE_SIZE) as usize;
    let mut bytes = vec![0u8; numel];
    mask.view([-1]).copy_data(&mut bytes, numel);
    Ok(bytes)
}

/// Pack raw grayscale mask bytes into a PNG and base64-encode it for
/// transport
pub fn mask_to_base64_png(mask: &[u8]) -> Result<String> {
    let image: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(IMAGE_SIZE, IMAGE_SIZE, mask.to_vec()).ok_or_else(|| {
            anyhow!("mask has {} bytes, expected {IMAGE_SIZE}x{IMAGE_SIZE}", mask.len())
        })?;

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;
    Ok(general_purpose::STANDARD.encode(png))
}
