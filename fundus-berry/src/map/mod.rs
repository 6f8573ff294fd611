//! 标签图与 ROI 掩膜.

mod core;
mod iter;
mod mirror;
mod roi;
mod save;

pub use core::{LabelView, LabelViewMut, OwnedLabelMap};

pub use iter::PosIter;

pub use mirror::LabelMirror;

pub use roi::RoiMask;

pub use save::{ImgWriteRaw, ImgWriteVis};

cfg_if::cfg_if! {
    if #[cfg(feature = "plot")] {
        mod plot;

        pub use plot::ImgDisplay;
    }
}
