//! Independent field extractors. Each one is a pure function over the
//! item's text and returns only the tags it found.

pub mod brand;
pub mod bundle;
pub mod capacity;
pub mod joint;
pub mod length;
pub mod material;
pub mod style;

pub use brand::extract_brand;
pub use bundle::extract_bundle;
pub use capacity::extract_capacity;
pub use joint::extract_joint_details;
pub use length::extract_length;
pub use material::{extract_materials, Material};
pub use style::extract_styles;
