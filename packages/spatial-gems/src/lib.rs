mod buffer;
mod create_point;
mod distance;
mod find_nearest;
mod heat_map;
mod poly_build;
mod simplify;
mod spatial_match;

pub use buffer::{Buffer, BufferProperties};
pub use create_point::{CreatePoint, CreatePointProperties, PointMapping};
pub use distance::{Distance, DistanceProperties};
pub use find_nearest::{FindNearest, FindNearestProperties};
pub use heat_map::{HeatMap, HeatMapProperties};
pub use poly_build::{PolyBuild, PolyBuildProperties};
pub use simplify::{Simplify, SimplifyProperties};
pub use spatial_match::{SpatialMatch, SpatialMatchProperties};

pub(crate) const DATABRICKS_PREVIEW_NOTE: &str =
    "**This Gem uses Databricks Spatial SQL features currently in Private Preview.**\n\n\
     To enable these capabilities, please contact your Databricks representative. For more \
     information, see the [Databricks Preview Feature Documentation]\
     (https://docs.databricks.com/en/admin/workspace-settings/manage-previews.html).";

pub(crate) const WKT_INPUT_NOTE: &str =
    "This gem requires that the Source Column and Destination Column contain geometric values \
     in Well-Known Text (WKT) format. To convert longitude and latitude coordinates into WKT \
     format, use the [CreatePoint gem](https://docs.prophecy.io/analysts/create-point/).";
