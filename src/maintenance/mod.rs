pub mod reclassify;

pub use reclassify::reclassify;
