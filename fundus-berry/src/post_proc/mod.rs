//! 标签图精化流程的各个阶段.
//!
//! 每个阶段都就地修改同一张标签图, 必须按顺序执行:
//! 视盘屏蔽 -> 血管叠加 -> 大区域屏蔽 -> 形态学清理. 血管邻域泛洪是可选的额外阶段.

mod clean;
mod optic_disc;
mod suppress;
mod vessel_neighbours;
mod vessels;

pub use clean::clean;
pub use optic_disc::{mask_off_optic_disc, OpticDisc};
pub use suppress::suppress_large_regions;
pub use vessel_neighbours::eliminate_vessel_neighbours;
pub use vessels::{overlay_vessels, paint_vessels, VesselOverlay};
