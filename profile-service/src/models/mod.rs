pub mod fields;
pub mod goal;
pub mod goal_status;
pub mod user;

pub use goal::Goal;
pub use goal_status::GoalStatus;
pub use user::User;
