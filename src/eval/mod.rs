//! Frame and animation evaluation: one rayon task per frame, results
//! reassembled in index order, failures aborting the whole animation.

mod animation;
mod frame;

pub use animation::{Animation, EvaluatedAnimation, PopulateFn, MAX_NAME_LENGTH};
pub use frame::Frame;

pub(crate) use animation::evaluate_animation;
