use super::not_blank;
use crate::models::{fields::TextOrNumber, Goal};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /users/{user_id}/goal_info/{goal_id}`.
///
/// `goal_amount` and `goal_timeline` may arrive as JSON numbers; they are
/// stored as text in the same canonical form the read path produces.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterGoalRequest {
    #[validate(custom(function = "not_blank"))]
    pub goal_amount: TextOrNumber,
    #[validate(custom(function = "not_blank"))]
    pub goal_description: String,
    #[validate(custom(function = "not_blank"))]
    pub goal_line: String,
    #[validate(custom(function = "not_blank"))]
    pub goal_timeline: TextOrNumber,
    #[validate(custom(function = "not_blank"))]
    pub goal_set_date: String,
}

impl RegisterGoalRequest {
    pub fn into_goal(self, id: String) -> Goal {
        Goal {
            id,
            goal_amount: self.goal_amount.into_amount(),
            goal_description: self.goal_description,
            goal_line: self.goal_line,
            goal_timeline: self.goal_timeline.into_timeline(),
            goal_set_date: self.goal_set_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalRegisteredResponse {
    pub message: String,
    pub goal: Goal,
}

impl From<Goal> for GoalRegisteredResponse {
    fn from(goal: Goal) -> Self {
        Self {
            message: "Goal registered successfully".to_string(),
            goal,
        }
    }
}
