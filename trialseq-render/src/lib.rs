pub mod geometry;
pub mod presenter;

pub use geometry::StimulusGeometry;
pub use presenter::SkiaPresenter;
