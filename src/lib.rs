//! statchart
//!
//! The data-to-geometry and color-mapping core behind small publication-style
//! charts: proportional unit grids, bubble matrices, choropleth-style color
//! fills and composition-range bars. Pairs with the `statchart` CLI.
//!
//! ### Features
//! - Allocate whole display units that always sum to the requested total
//! - Fit a row/column grid into an area without overflow
//! - Build sequential/diverging, continuous/binned color scales and pick legible text colors
//! - Lay out range charts on linear or log axes with collision-free tick labels
//!
//! Every layout and color function is total: empty or degenerate input yields
//! an empty or constant result, never an error.
//!
//! ### Example
//! ```
//! use statchart::{Category, allocate::allocate, grid};
//!
//! let cats = vec![Category::new("A", 1.0), Category::new("B", 1.0), Category::new("C", 1.0)];
//! let units: Vec<u32> = allocate(&cats, 100).iter().map(|a| a.units).collect();
//! assert_eq!(units, vec![34, 33, 33]);
//!
//! let fit = grid::fit(7, 400.0, 300.0, 80.0, 10.0, 10.0);
//! assert_eq!((fit.plan.columns, fit.plan.rows), (4, 2));
//! ```

pub mod allocate;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod range;
pub mod stats;
pub mod storage;
pub mod text;

pub use color::{ColorScale, Palette, Rgb, ScaleMode, contrast_color};
pub use config::ChartConfig;
pub use error::{Error, Result};
pub use models::{Allocation, Category, GridPlan, RangeRow, ScaleLabel, Segment};
