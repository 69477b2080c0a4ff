use api_types::records::{OrderBy, Record};

use crate::{
    EngineError, GoalsSummary, Money, NewSavingsGoal, ResultEngine, SavingsGoal,
    SavingsGoalChanges, savings_goals,
};

use super::{Engine, Notify, contribution_overflow, ensure_non_negative};

impl Engine {
    /// All goals by ascending priority.
    pub async fn list_savings_goals(&self) -> ResultEngine<Vec<SavingsGoal>> {
        self.fetch_all(
            Vec::new(),
            vec![OrderBy::asc(savings_goals::PRIORITY)],
            Notify::Yes,
        )
        .await
    }

    pub async fn savings_goal(&self, id: i64) -> ResultEngine<Option<SavingsGoal>> {
        self.fetch_by_id(id).await
    }

    pub async fn create_savings_goal(&self, new: &NewSavingsGoal) -> ResultEngine<SavingsGoal> {
        ensure_non_negative(new.target_amount, "target amount")?;
        self.create_one(Record::from(new)).await
    }

    pub async fn update_savings_goal(
        &self,
        id: i64,
        changes: &SavingsGoalChanges,
    ) -> ResultEngine<SavingsGoal> {
        if let Some(target) = changes.target_amount {
            ensure_non_negative(target, "target amount")?;
        }
        if let Some(current) = changes.current_amount {
            ensure_non_negative(current, "current amount")?;
        }
        self.update_one(changes.to_record(id)).await
    }

    /// Adds `amount` to the saved total of a goal.
    ///
    /// Reads the goal, then writes `current + amount` back. There is no
    /// version check between the two calls, so two contributions racing on
    /// the same goal can lose one of them. A sum past the `Money` range is
    /// [`EngineError::InvalidAmount`].
    pub async fn add_contribution(&self, id: i64, amount: Money) -> ResultEngine<SavingsGoal> {
        let goal = self
            .savings_goal(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("savings goal {id}")))?;

        let current = goal
            .current_amount
            .checked_add(amount)
            .ok_or_else(contribution_overflow)?;
        let changes = SavingsGoalChanges {
            current_amount: Some(current),
            ..SavingsGoalChanges::default()
        };
        self.update_savings_goal(id, &changes).await
    }

    pub async fn delete_savings_goal(&self, id: i64) -> ResultEngine<()> {
        self.delete_one::<SavingsGoal>(id).await
    }

    pub async fn goals_summary(&self) -> ResultEngine<GoalsSummary> {
        let goals = self.list_savings_goals().await?;
        Ok(GoalsSummary::from_goals(&goals))
    }
}
