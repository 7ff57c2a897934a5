mod write_features;

pub use write_features::FeatureWriter;
