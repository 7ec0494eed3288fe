//! Evaluation metrics the segmentation model was trained against. The
//! request path never calls these; they exist so saved checkpoints can be
//! sanity-checked against the same definitions used at training time.

use anyhow::Result;
use tch::{Kind, Tensor};

/// Smoothing term guarding the ratios when both masks are empty
const SMOOTH: f64 = 1e-15;

/// Intersection over union between a ground-truth and a predicted mask
pub fn iou(y_true: &Tensor, y_pred: &Tensor) -> Result<f64> {
    let intersection = f64::try_from((y_true * y_pred).sum(Kind::Float))?;
    let total = f64::try_from((y_true + y_pred).sum(Kind::Float))?;
    let union = total - intersection;
    Ok((intersection + SMOOTH) / (union + SMOOTH))
}

/// Dice coefficient: `2|A∩B| / (|A| + |B|)`
pub fn dice_coef(y_true: &Tensor, y_pred: &Tensor) -> Result<f64> {
    let intersection = f64::try_from((y_true * y_pred).sum(Kind::Float))?;
    let denom =
        f64::try_from(y_true.sum(Kind::Float))? + f64::try_from(y_pred.sum(Kind::Float))?;
    Ok((2.0 * intersection + SMOOTH) / (denom + SMOOTH))
}

pub fn dice_loss(y_true: &Tensor, y_pred: &Tensor) -> Result<f64> {
    Ok(1.0 - dice_coef(y_true, y_pred)?)
}
