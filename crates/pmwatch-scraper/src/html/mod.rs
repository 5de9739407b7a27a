//! Extractors that read postings out of career-page HTML.

pub mod anchors;
pub mod facetwp;
pub mod normalize;
pub mod proximity;

pub use anchors::extract_rendered_postings;
pub use proximity::extract_static_postings;
