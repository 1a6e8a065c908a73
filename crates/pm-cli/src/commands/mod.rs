pub mod analyze;
pub mod dispatch;
pub mod normalize;
pub mod prompt;
pub mod schema;
pub mod validate;
