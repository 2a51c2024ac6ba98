use async_trait::async_trait;

/// Asks the user to approve a destructive action.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, question: &str) -> bool;
}
