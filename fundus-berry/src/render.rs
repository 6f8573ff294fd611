//! 叠加图渲染.
//!
//! 把标签图中的若干类别以固定颜色画在原图上, 便于肉眼检查.

use crate::consts::Label;
use crate::error::{ensure_shape, DetectResult};
use crate::LabelView;
use image::{DynamicImage, Rgb, RgbImage};

/// 默认叠加的类别: 亮病灶 (绿) 与暗病灶 (红).
pub const LESIONS: [Label; 2] = [Label::Drusen, Label::Haemorage];

/// 把 `labels` 中的各类别以各自颜色画到 `image` 的 RGB 副本上.
///
/// `image` 的尺寸必须与标签图一致. 没有颜色的类别 (背景, 相机伪影) 被忽略.
pub fn overlay(image: &DynamicImage, map: &LabelView<'_>, labels: &[Label]) -> DetectResult<RgbImage> {
    let mut canvas = image.to_rgb8();
    let (w, h) = canvas.dimensions();
    ensure_shape(map.shape(), (h as usize, w as usize))?;

    let mut palette: [Option<[u8; 3]>; 256] = [None; 256];
    for l in labels {
        palette[l.code() as usize] = l.color();
    }
    for ((r, c), &p) in map.indexed_iter() {
        if let Some(color) = palette[p as usize] {
            canvas.put_pixel(c as u32, r as u32, Rgb(color));
        }
    }
    Ok(canvas)
}

/// 在黑色背景上以各类别颜色渲染整张标签图.
pub fn palette(map: &LabelView<'_>) -> RgbImage {
    let (h, w) = map.shape();
    RgbImage::from_fn(w as u32, h as u32, |c, r| {
        let color = Label::try_from(map[(r as usize, c as usize)])
            .ok()
            .and_then(Label::color)
            .unwrap_or([0, 0, 0]);
        Rgb(color)
    })
}
