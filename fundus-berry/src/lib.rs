#![warn(missing_docs)] // <= 合适时移除它.
// #![warn(clippy::missing_docs_in_private_items)]  // <= too strict.

//! 核心库. 在眼底彩照上检测亮病灶 (玻璃膜疣/硬性渗出) 与暗病灶 (出血/微动脉瘤),
//! 并对像素分类器给出的初始标签图做一系列精化.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 像素分类器与血管检测器都是外部协作者 (见 [`RegionClassifier`] 与 [`VesselDetector`]),
//!   本 crate 只消费它们的输出, 不负责训练.
//! 2. 所有数据集相关的参数都通过 [`DetectorConfig`] 注入, 不依赖任何目录结构.
//! 3. 前置条件不满足时返回 [`DetectError`]; 找不到任何亮区域之类的退化输入不是错误.
//!
//! # 开发计划
//!
//! ### 标签图与 ROI 掩膜 ✅
//!
//! 借用/拥有三件套 `LabelView`, `LabelViewMut`, `OwnedLabelMap`, 以及只读的 `RoiMask`.
//!
//! 实现位于 `fundus-berry/src/map`.
//!
//! ### 连通域标记与结构元 ✅
//!
//! 方形结构元 (5 * 5 或 9 * 9) 决定两个前景像素是否相邻.
//! OpenCV `MORPH_ELLIPSE` 规则的椭圆结构元用于开运算.
//!
//! 实现位于 `fundus-berry/src/region.rs` 与 `fundus-berry/src/morph`.
//!
//! ### 视盘屏蔽 ✅
//!
//! 假设最大亮区域是视盘. 第二大亮区域面积超过一定比例时一并屏蔽.
//!
//! ### 血管叠加 ✅
//!
//! 外部血管检测器的结果按最近邻插值还原到原分辨率, 覆盖任何已有类别.
//!
//! ### 大区域屏蔽与形态学清理 ✅
//!
//! 1. 面积不小于 ROI 面积一定比例的连通域被屏蔽. ✅
//! 2. 开运算去掉零星小簇. 默认逐类别进行, 整图灰度开运算作为旧行为保留. ✅
//!
//! 实现位于 `fundus-berry/src/post_proc`.
//!
//! ### 血管邻域泛洪 ✅
//!
//! 阻挡集合 (病灶, 已屏蔽, ROI 之外) 在泛洪前一次性算出,
//! 泛洪离开血管的步数有上限. 与标签编码的数值顺序无关.
//!
//! 实现位于 `fundus-berry/src/flood.rs`.
//!
//! ### 批量检测 ✅
//!
//! 开启 `rayon` feature 时并行处理多张图像.
//!
//! ### 相关消融实验 ✅
//!
//! 逐类别开运算与整图灰度开运算的对比.
//!
//! 实现位于 `ablations/opening`.

/// 二维索引 `(行, 列)`, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

type Area2d = Vec<Idx2d>;
type Areas2d = Vec<Area2d>;

pub mod consts;

mod error;

pub use error::{BoxedError, DetectError, DetectResult};

mod config;

pub use config::DetectorConfig;

/// 标签图基础数据结构.
mod map;

pub use map::{
    ImgWriteRaw, ImgWriteVis, LabelMirror, LabelView, LabelViewMut, OwnedLabelMap, PosIter,
    RoiMask,
};

#[cfg(feature = "plot")]
pub use map::ImgDisplay;

pub mod morph;

pub use morph::OpeningMode;

pub mod region;

pub mod flood;

pub mod classifier;

pub mod vessel;

pub mod post_proc;

pub mod render;

mod detector;

pub use detector::LesionDetector;

pub mod batch;

pub mod prelude;

pub use classifier::RegionClassifier;
pub use consts::Label;
pub use vessel::VesselDetector;

#[cfg(test)]
mod testing;
