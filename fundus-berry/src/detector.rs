//! 亮/暗病灶检测流程.

use crate::classifier::RegionClassifier;
use crate::config::{check_threshold, DetectorConfig};
use crate::consts::Label;
use crate::error::{ensure_shape, DetectError, DetectResult};
use crate::post_proc::{self, OpticDisc};
use crate::render;
use crate::vessel::VesselDetector;
use crate::{Idx2d, LabelView, OwnedLabelMap, RoiMask};
use image::{DynamicImage, GenericImageView, RgbImage};
use log::{debug, info};
use ndarray::{Array2, ArrayView2};

/// 单张眼底图像的亮病灶 (玻璃膜疣/渗出) 与暗病灶 (出血/微动脉瘤) 检测器.
///
/// 检测器独占该图像的标签图与 ROI 掩膜. 初始标签图由区域分类器给出,
/// 之后各精化阶段按固定顺序就地修改它:
///
/// 1. 视盘屏蔽;
/// 2. 血管叠加;
/// 3. 大区域屏蔽;
/// 4. 形态学清理.
///
/// 血管邻域泛洪 ([`Self::eliminate_vessel_neighbours`]) 是可选的额外阶段.
///
/// 需要并行处理多张图像时, 为每张图像各建一个检测器, 它们之间没有共享的可变状态.
pub struct LesionDetector<C, V> {
    image: DynamicImage,
    roi: RoiMask,
    classifier: C,
    vessels: V,
    config: DetectorConfig,
    prediction: Option<OwnedLabelMap>,
    vessel_markers: Option<Array2<u8>>,
}

impl<C: RegionClassifier, V: VesselDetector> LesionDetector<C, V> {
    /// 创建检测器. 此时不做任何计算.
    ///
    /// 配置不合法, 图像为空, 或 ROI 掩膜与图像尺寸不一致时返回错误.
    pub fn new(
        image: DynamicImage,
        roi: RoiMask,
        classifier: C,
        vessels: V,
        config: DetectorConfig,
    ) -> DetectResult<Self> {
        config.validate()?;
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Err(DetectError::EmptyImage);
        }
        ensure_shape((h as usize, w as usize), roi.shape())?;
        debug!("创建检测器: {h} * {w}, ROI {} 像素", roi.area());
        Ok(Self {
            image,
            roi,
            classifier,
            vessels,
            config,
            prediction: None,
            vessel_markers: None,
        })
    }

    /// 图像分辨率 (高, 宽).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.roi.shape()
    }

    /// 原始图像.
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// ROI 掩膜.
    #[inline]
    pub fn roi(&self) -> &RoiMask {
        &self.roi
    }

    /// 当前配置.
    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// 当前标签图. 尚未分类时返回 `None`.
    #[inline]
    pub fn prediction(&self) -> Option<LabelView<'_>> {
        self.prediction.as_ref().map(OwnedLabelMap::as_immut)
    }

    /// 最近一次血管叠加使用的血管掩膜 (已还原到图像分辨率).
    #[inline]
    pub fn vessel_markers(&self) -> Option<ArrayView2<u8>> {
        self.vessel_markers.as_ref().map(Array2::view)
    }

    /// 取出标签图, 消耗检测器.
    #[inline]
    pub fn into_prediction(self) -> Option<OwnedLabelMap> {
        self.prediction
    }

    /// 运行区域分类器, 用其结果替换当前标签图.
    ///
    /// 分类结果的形状必须与图像一致, 且所有编码都属于标签空间.
    pub fn classify(&mut self) -> DetectResult<LabelView<'_>> {
        let raw = self
            .classifier
            .classify(&self.image)
            .map_err(DetectError::Classifier)?;
        ensure_shape(self.shape(), raw.dim())?;
        let map = OwnedLabelMap::from_array(raw)?;
        info!("初始分类完成: {:?}", map.as_immut().statistics());
        self.vessel_markers = None;
        Ok(self.prediction.insert(map).as_immut())
    }

    /// 直接指定当前标签图, 跳过分类器. 形状必须与图像一致.
    pub fn set_prediction(&mut self, map: OwnedLabelMap) -> DetectResult<()> {
        ensure_shape(self.shape(), map.as_immut().shape())?;
        self.prediction = Some(map);
        self.vessel_markers = None;
        Ok(())
    }

    /// 尚未分类时先运行分类器.
    fn ensure_prediction(&mut self) -> DetectResult<()> {
        if self.prediction.is_none() {
            self.classify()?;
        }
        Ok(())
    }

    /// 屏蔽视盘 (以及可能的相邻眩光). 必须已有标签图.
    pub fn mask_off_od(&mut self) -> DetectResult<Option<OpticDisc>> {
        let map = self.prediction.as_mut().ok_or(DetectError::NoPrediction)?;
        post_proc::mask_off_optic_disc(&mut map.as_mutable(), &self.roi, self.config.od_ratio)
    }

    /// 以配置中的面积阈值运行 [`Self::find_bright_regions_with`].
    pub fn find_bright_regions(&mut self) -> DetectResult<LabelView<'_>> {
        let thresh = self.config.area_threshold;
        self.find_bright_regions_with(thresh)
    }

    /// 运行完整的精化流程, 返回精化后的标签图.
    ///
    /// 尚未分类时先运行分类器. `thresh` 不在 (0, 1) 之内时立即返回错误,
    /// 此时不会调用分类器, 也不会修改标签图.
    pub fn find_bright_regions_with(&mut self, thresh: f64) -> DetectResult<LabelView<'_>> {
        check_threshold(thresh)?;
        self.ensure_prediction()?;
        let disc = self.mask_off_od()?;

        let map = self.prediction.as_mut().ok_or(DetectError::NoPrediction)?;
        let mut view = map.as_mutable();
        let overlay = post_proc::overlay_vessels(&mut view, &self.roi, &self.vessels)?;
        let suppressed = post_proc::suppress_large_regions(&mut view, &self.roi, thresh)?;
        let cleaned = post_proc::clean(&mut view, self.config.opening)?;
        info!(
            "精化完成: 视盘 {:?}, 血管像素 {}, 屏蔽大区域 {suppressed} 个, 清理 {cleaned} 像素",
            disc.map(|d| d.disc),
            overlay.painted
        );
        self.vessel_markers = Some(overlay.markers);

        self.display_current()?;
        self.prediction().ok_or(DetectError::NoPrediction)
    }

    /// 把紧贴血管的零散像素并入血管. 必须已有标签图.
    ///
    /// 返回新改为血管的像素个数.
    pub fn eliminate_vessel_neighbours(&mut self) -> DetectResult<usize> {
        let map = self.prediction.as_mut().ok_or(DetectError::NoPrediction)?;
        let changed = post_proc::eliminate_vessel_neighbours(
            &mut map.as_mutable(),
            &self.roi,
            self.config.bleed_radius,
        )?;
        self.display_current()?;
        Ok(changed)
    }

    /// 把当前标签图中的 `labels` 各类别叠加到原图上.
    pub fn overlay(&self, labels: &[Label]) -> DetectResult<RgbImage> {
        let map = self.prediction().ok_or(DetectError::NoPrediction)?;
        render::overlay(&self.image, &map, labels)
    }

    /// 调试模式下展示当前的病灶叠加图 (亮病灶绿色, 暗病灶红色).
    ///
    /// 开启 `plot` feature 时弹出窗口, 否则只记录各类别像素统计.
    /// 非调试模式或尚无标签图时什么也不做.
    pub fn display_current(&self) -> DetectResult<()> {
        if !self.config.debug {
            return Ok(());
        }
        let Some(map) = self.prediction() else {
            return Ok(());
        };
        debug!("当前标签统计: {:?}", map.statistics());

        #[cfg(feature = "plot")]
        {
            use crate::ImgDisplay;

            let vis = render::overlay(&self.image, &map, &render::LESIONS)?;
            if let Err(e) = vis.show_and_wait("lesions") {
                log::warn!("无法展示调试叠加图: {e}");
            }
        }
        Ok(())
    }
}
