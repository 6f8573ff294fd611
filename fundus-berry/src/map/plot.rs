//! 图片展示模块, 主要用于调试.
//!
//! # 注意
//!
//! 需要 `plot` feature.

use crate::{Idx2d, LabelView, LabelViewMut};
use image::RgbImage;
use opencv::core::{Scalar, Size, Vec3b, CV_8UC1, CV_8UC3};
use opencv::highgui::{imshow, wait_key};
use opencv::prelude::{Mat, MatTrait, MatTraitConst};
use std::time::Duration;

/// 表明一个可以在窗口中可视化的对象.
pub trait ImgDisplay {
    /// 在名为 `title` 的窗口中展示对象.
    fn show(&self, title: &str) -> opencv::Result<()>;

    /// 同 `show()`, 但在之后自动等待一次用户按键输入.
    fn show_and_wait(&self, title: &str) -> opencv::Result<i32> {
        self.show(title)?;
        wait_key(0)
    }

    /// 同 `show()`, 但在之后自动等待给定时间.
    fn show_and_wait_for(&self, title: &str, d: Duration) -> opencv::Result<i32> {
        self.show(title)?;
        let ms = d.as_millis().min(i32::MAX as u128);
        wait_key(ms as i32)
    }
}

/// 将标签图转换为单通道矩阵, 同时进行可视化友好的像素转换.
fn label_view_to_opencv_mat(view: &LabelView<'_>) -> opencv::Result<Mat> {
    let (h, w): Idx2d = view.shape();
    let mut mat = Mat::new_size_with_default(Size::new(w as i32, h as i32), CV_8UC1, Scalar::from(0))?;
    for ((i, j), &pix) in view.indexed_iter() {
        *mat.at_2d_mut::<u8>(i as i32, j as i32)? = super::save::pretty(pix);
    }
    Ok(mat)
}

macro_rules! impl_label {
    ($($view: ty),+) => {
        $(
            /// 按类别映射为不同灰度后展示.
            impl ImgDisplay for $view {
                fn show(&self, title: &str) -> opencv::Result<()> {
                    let mat = label_view_to_opencv_mat(&self.shallow_copy())?;
                    imshow(title, &mat)
                }
            }
        )+
    };
}

impl_label!(LabelView<'_>, LabelViewMut<'_>);

/// 叠加图. OpenCV 使用 BGR 通道顺序.
impl ImgDisplay for RgbImage {
    fn show(&self, title: &str) -> opencv::Result<()> {
        let (w, h) = self.dimensions();
        let mut mat = Mat::new_size_with_default(Size::new(w as i32, h as i32), CV_8UC3, Scalar::all(0.0))?;
        for (x, y, p) in self.enumerate_pixels() {
            let [r, g, b] = p.0;
            *mat.at_2d_mut::<Vec3b>(y as i32, x as i32)? = Vec3b::from([b, g, r]);
        }
        imshow(title, &mat)
    }
}
