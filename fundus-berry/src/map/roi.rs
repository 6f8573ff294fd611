//! 视网膜有效区域 (ROI) 掩膜.

use crate::error::{DetectError, DetectResult};
use crate::Idx2d;
use image::GrayImage;
use ndarray::{Array2, ArrayView2};
use std::path::Path;

/// 视网膜有效区域掩膜. `true` 表示像素位于有效眼底区域内,
/// 黑边和暗角等区域为 `false`.
///
/// 掩膜由外部提供, 构建后只读.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoiMask {
    data: Array2<bool>,
}

impl RoiMask {
    /// 从二值矩阵创建掩膜, 非零即有效.
    pub fn from_array(data: ArrayView2<u8>) -> DetectResult<Self> {
        let (h, w) = data.dim();
        if h == 0 || w == 0 {
            return Err(DetectError::EmptyImage);
        }
        Ok(Self {
            data: data.mapv(|p| p != 0),
        })
    }

    /// 从单通道图像创建掩膜, 非零即有效.
    pub fn from_gray(img: &GrayImage) -> DetectResult<Self> {
        let (w, h) = img.dimensions();
        if h == 0 || w == 0 {
            return Err(DetectError::EmptyImage);
        }
        let data = Array2::from_shape_fn((h as usize, w as usize), |(r, c)| {
            img.get_pixel(c as u32, r as u32).0[0] != 0
        });
        Ok(Self { data })
    }

    /// 从图像文件加载掩膜. 彩色图像先转为灰度, 非零即有效.
    pub fn open<P: AsRef<Path>>(path: P) -> DetectResult<Self> {
        let img = image::open(path)?.to_luma8();
        Self::from_gray(&img)
    }

    /// 全部像素都有效的掩膜.
    pub fn full(shape: Idx2d) -> Self {
        Self {
            data: Array2::from_elem(shape, true),
        }
    }

    /// 掩膜形状 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// `pos` 是否位于有效区域内. 越界时返回 `false`.
    #[inline]
    pub fn contains(&self, pos: Idx2d) -> bool {
        self.data.get(pos).copied().unwrap_or(false)
    }

    /// 有效区域像素个数.
    pub fn area(&self) -> usize {
        self.data.iter().filter(|p| **p).count()
    }

    /// 底层数据的不可变视图.
    #[inline]
    pub fn array_view(&self) -> ArrayView2<bool> {
        self.data.view()
    }
}
