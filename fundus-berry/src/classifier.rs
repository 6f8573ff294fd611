//! 外部区域分类器接口.

use crate::error::BoxedError;
use crate::OwnedLabelMap;
use image::DynamicImage;
use ndarray::Array2;

/// 区域分类器 (例如基于局部特征的 k-近邻分类器).
///
/// 对整张图像产出初始标签图, 形状为 (高, 宽), 每个像素是一个标签编码.
/// 检测器只消费该结果, 不关心分类器如何训练.
pub trait RegionClassifier {
    /// 对图像逐像素分类.
    fn classify(&self, image: &DynamicImage) -> Result<Array2<u8>, BoxedError>;
}

impl<T: RegionClassifier + ?Sized> RegionClassifier for &T {
    #[inline]
    fn classify(&self, image: &DynamicImage) -> Result<Array2<u8>, BoxedError> {
        (**self).classify(image)
    }
}

/// 直接返回一份事先算好的标签图.
#[derive(Clone, Debug)]
pub struct Precomputed(pub OwnedLabelMap);

impl RegionClassifier for Precomputed {
    fn classify(&self, _image: &DynamicImage) -> Result<Array2<u8>, BoxedError> {
        Ok(self.0.clone().into_raw())
    }
}
