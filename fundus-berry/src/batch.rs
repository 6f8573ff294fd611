//! 多张图像的批量检测.
//!
//! 每张图像各用一个独立的检测器, 分类器与血管检测器以共享引用的方式复用.

use crate::classifier::RegionClassifier;
use crate::error::{DetectError, DetectResult};
use crate::vessel::VesselDetector;
use crate::{DetectorConfig, LesionDetector, OwnedLabelMap, RoiMask};
use image::DynamicImage;

/// 一张待检测的图像及其 ROI 掩膜.
pub type Job = (DynamicImage, RoiMask);

/// 对单张图像运行完整的精化流程.
pub fn detect_one<C, V>(
    (image, roi): Job,
    classifier: &C,
    vessels: &V,
    config: &DetectorConfig,
) -> DetectResult<OwnedLabelMap>
where
    C: RegionClassifier + ?Sized,
    V: VesselDetector + ?Sized,
{
    let mut detector = LesionDetector::new(image, roi, classifier, vessels, config.clone())?;
    detector.find_bright_regions()?;
    detector.into_prediction().ok_or(DetectError::NoPrediction)
}

/// 依次检测所有图像. 结果与输入一一对应, 单张图像失败不影响其它图像.
pub fn detect_all<C, V>(
    jobs: Vec<Job>,
    classifier: &C,
    vessels: &V,
    config: &DetectorConfig,
) -> Vec<DetectResult<OwnedLabelMap>>
where
    C: RegionClassifier + ?Sized,
    V: VesselDetector + ?Sized,
{
    jobs.into_iter()
        .map(|job| detect_one(job, classifier, vessels, config))
        .collect()
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IntoParallelIterator, ParallelIterator};

        /// 借助 `rayon`, 并行地检测所有图像. 结果顺序与输入一致.
        pub fn detect_batch<C, V>(
            jobs: Vec<Job>,
            classifier: &C,
            vessels: &V,
            config: &DetectorConfig,
        ) -> Vec<DetectResult<OwnedLabelMap>>
        where
            C: RegionClassifier + Sync + ?Sized,
            V: VesselDetector + Sync + ?Sized,
        {
            jobs.into_par_iter()
                .map(|job| detect_one(job, classifier, vessels, config))
                .collect()
        }
    }
}
