//! Query methods on [`StaticKdTree`](crate::StaticKdTree).

mod batch;
mod nearest_n;
