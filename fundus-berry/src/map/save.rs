//! 标签图的持久化存储, 主要用于调试.

use super::{LabelView, LabelViewMut};
use image::ImageResult;
use std::path::Path;

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// 标签图只含 0 到 6 的小整数, 直接保存时肉眼几乎全黑.
/// 该 trait 在保存前把每个类别映射到易于区分的灰度.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 表明一个可以通过 **按原样** 模式持久化存储的图像对象.
pub trait ImgWriteRaw {
    /// 按原样将图片保存到 `path` 路径.
    fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()>;
}

/// 使像素更有利于单通道可视化.
///
/// 标签空间之外的编码统一映射为 [`UNKNOWN`](crate::consts::gray::UNKNOWN).
#[inline]
pub(crate) fn pretty(label: u8) -> u8 {
    use crate::consts::{gray::*, label::*};
    match label {
        BACKGROUND => BLACK,
        CAMERA_HUE => 40,
        MASKED => 80,
        BLOOD_VESSEL => 120,
        OD => 160,
        HAEMORAGE => 208,
        DRUSEN => WHITE,
        _ => UNKNOWN,
    }
}

macro_rules! impl_label_vis {
    ($($view: ty),+) => {
        $(
            /// 按类别映射为不同灰度.
            impl ImgWriteVis for $view {
                fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.shape();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    for ((h, w), &pix) in self.indexed_iter() {
                        buf.put_pixel(w as u32, h as u32, image::Luma([pretty(pix)]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

macro_rules! impl_label_raw {
    ($($view: ty),+) => {
        $(
            /// 按原样存储.
            impl ImgWriteRaw for $view {
                fn save_raw<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
                    let (height, width) = self.shape();
                    let mut buf = image::GrayImage::new(width as u32, height as u32);
                    for ((h, w), &pix) in self.indexed_iter() {
                        buf.put_pixel(w as u32, h as u32, image::Luma([pix]));
                    }
                    buf.save(path)
                }
            }
        )+
    };
}

impl_label_vis!(LabelView<'_>, LabelViewMut<'_>);
impl_label_raw!(LabelView<'_>, LabelViewMut<'_>);

#[cfg(test)]
mod tests {
    use super::{pretty, ImgWriteRaw, ImgWriteVis};
    use crate::consts::{gray, label::*, Label};
    use crate::OwnedLabelMap;
    use std::collections::HashSet;

    #[test]
    fn test_pretty_is_injective() {
        let grays: HashSet<u8> = Label::ALL.iter().map(|l| pretty(l.code())).collect();
        assert_eq!(grays.len(), Label::ALL.len());
        assert!(!grays.contains(&gray::UNKNOWN));
    }

    #[test]
    fn test_pretty_unknown_code() {
        assert_eq!(pretty(LABEL_COUNT as u8), gray::UNKNOWN);
        assert_eq!(pretty(200), gray::UNKNOWN);
    }

    fn sample() -> OwnedLabelMap {
        let mut map = OwnedLabelMap::background((4, 5));
        let mut m = map.as_mutable();
        m[(0, 1)] = DRUSEN;
        m[(1, 2)] = MASKED;
        m[(2, 3)] = BLOOD_VESSEL;
        m[(3, 4)] = OD;
        map
    }

    #[test]
    fn test_save_vis_palette() {
        let map = sample();
        let path = std::env::temp_dir().join("fundus_berry_save_vis.png");
        map.as_immut().save(&path).unwrap();
        let back = image::open(&path).unwrap().to_luma8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back.dimensions(), (5, 4));
        assert_eq!(back.get_pixel(1, 0).0[0], gray::WHITE);
        assert_eq!(back.get_pixel(0, 0).0[0], gray::BLACK);
        assert_eq!(back.get_pixel(2, 1).0[0], pretty(MASKED));
        assert_eq!(back.get_pixel(3, 2).0[0], pretty(BLOOD_VESSEL));
        assert_eq!(back.get_pixel(4, 3).0[0], pretty(OD));
    }

    #[test]
    fn test_save_raw_keeps_codes() {
        let mut map = sample();
        let path = std::env::temp_dir().join("fundus_berry_save_raw.png");
        map.as_mutable().save_raw(&path).unwrap();
        let back = image::open(&path).unwrap().to_luma8();
        std::fs::remove_file(&path).unwrap();

        for ((h, w), &code) in map.as_immut().indexed_iter() {
            assert_eq!(back.get_pixel(w as u32, h as u32).0[0], code);
        }
    }

    #[test]
    fn test_save_vis_unknown_code() {
        let mut map = sample();
        map.as_mutable()[(0, 0)] = 200;
        let path = std::env::temp_dir().join("fundus_berry_save_unknown.png");
        map.as_immut().save(&path).unwrap();
        let back = image::open(&path).unwrap().to_luma8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back.get_pixel(0, 0).0[0], gray::UNKNOWN);
        assert_eq!(back.get_pixel(1, 0).0[0], gray::WHITE);
    }
}
