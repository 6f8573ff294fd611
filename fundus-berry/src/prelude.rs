//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Idx2d;

pub use crate::{
    DetectError, DetectResult, DetectorConfig, ImgWriteRaw, ImgWriteVis, LabelView, LabelViewMut,
    LesionDetector, OpeningMode, OwnedLabelMap, RoiMask,
};

#[cfg(feature = "plot")]
pub use crate::ImgDisplay;

pub use crate::classifier::{Precomputed, RegionClassifier};
pub use crate::vessel::{NoVessels, PrecomputedVessels, VesselDetector};

pub use crate::consts::label::{
    BACKGROUND, BLOOD_VESSEL, CAMERA_HUE, DRUSEN, HAEMORAGE, MASKED, OD,
};
pub use crate::consts::Label;

pub use crate::render::{overlay, LESIONS};

#[cfg(feature = "rayon")]
pub use crate::batch::detect_batch;
pub use crate::batch::detect_all;
