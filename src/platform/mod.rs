mod error;
mod model;
pub mod traits;
mod util;

pub mod leetcode;

pub use error::*;
pub use leetcode::{LeetCodeClient, LeetCodeError};
pub use model::*;
pub use traits::JudgeApi;
pub use util::*;
