//! Word clouds from library catalog subject headings.
//!
//! The pipeline has three stages:
//!
//! 1. **Normalization** ([`analyzer`]): subject cells are cleaned into
//!    space-separated tokens by one of two variants.
//! 2. **Selection** ([`dataset`], [`view`]): cleaned values for one
//!    classification code, or one column of an uploaded table, are joined.
//! 3. **Rendering** ([`render`]): the joined text is turned into an image
//!    through a [`render::CloudRenderer`] and encoded as PNG.
//!
//! ```
//! use shelfcloud_core::analyzer::{StopWords, TextNormalizer};
//! use shelfcloud_core::dataset::Dataset;
//! use shelfcloud_core::render::TileCloudRenderer;
//! use shelfcloud_core::view::SubjectCloud;
//! use shelfcloud_types::NormalizerVersion;
//!
//! let stop = StopWords::default();
//! let normalizer = TextNormalizer::new(NormalizerVersion::V1, &stop);
//! let csv = "LC Classification Code,Subjects,Loans (In House + Not In House)\n\
//!            M,Music -- History; Opera,4\n";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &Default::default(), &normalizer).unwrap();
//!
//! let view = SubjectCloud::new(&dataset, TileCloudRenderer::default());
//! let panel = view.update(Some("M"));
//! assert_eq!(panel.top_subjects()[0].to_string(), "music___history opera (4 loans)");
//! ```

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod render;
pub mod view;

pub use analyzer::{StopWords, TextNormalizer};
pub use dataset::{Dataset, Table};
pub use error::AppError;
pub use render::{CloudOptions, CloudRenderer, RenderedCloud, TileCloudRenderer};
pub use view::{CloudPanel, ColumnCloud, SubjectCloud};
