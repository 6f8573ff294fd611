//! 标签图镜像. 用于暂存和复原某一时刻的标签图.

use super::{LabelView, LabelViewMut};

/// 一个拥有所有权的标签图的不透明镜像.
/// 用于临时保存标签图的值, 并在随后恢复.
///
/// 注意该结构是被设计来 **快速** 回填原数据的, 因此并不压缩原数据.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMirror(pub(crate) Vec<u8>);

impl LabelMirror {
    /// 与 `other` 相比, 取值不同的像素个数. 长度不同时返回 `None`.
    pub fn diff_count(&self, other: &LabelMirror) -> Option<usize> {
        (self.0.len() == other.0.len())
            .then(|| self.0.iter().zip(other.0.iter()).filter(|(a, b)| a != b).count())
    }
}

impl From<&LabelView<'_>> for LabelMirror {
    fn from(value: &LabelView<'_>) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl From<&LabelViewMut<'_>> for LabelMirror {
    fn from(value: &LabelViewMut<'_>) -> Self {
        Self(value.iter().copied().collect())
    }
}
