mod category;
mod comparison;
mod dataset;
mod distribution;

pub use category::{CategorySet, MBTI_TYPES};
pub use comparison::{Comparison, MaxDifference};
pub use dataset::{Dataset, Field, FieldKind, Schema};
pub use distribution::Distribution;
