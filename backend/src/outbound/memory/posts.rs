//! In-memory posts, comments and goals.
//!
//! The three collections share a shape: authored content with optional
//! options, listed by creation time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{CommentRepository, GoalRepository, PostRepository, RepositoryError};
use crate::domain::{
    Comment, CommentId, CommentPatch, Goal, GoalId, GoalPatch, Post, PostId, PostPatch, UserId,
};

/// Documents kept in insertion order.
#[derive(Debug)]
struct Table<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Clone> Table<T> {
    async fn push(&self, row: &T) {
        self.rows.write().await.push(row.clone());
    }

    async fn find(&self, matches: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().await.iter().find(|row| matches(row)).cloned()
    }

    async fn filter(&self, matches: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| matches(row))
            .cloned()
            .collect()
    }

    async fn modify(&self, matches: impl Fn(&T) -> bool, apply: impl FnOnce(&mut T)) -> bool {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|row| matches(row)) {
            Some(row) => {
                apply(row);
                true
            }
            None => false,
        }
    }

    async fn remove(&self, matches: impl Fn(&T) -> bool) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| !matches(row));
        rows.len() != before
    }
}

/// Sort by creation time, newest first. Later ids win ties.
fn newest_first<T, K: Ord>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, K)) {
    rows.sort_by_key(|row| std::cmp::Reverse(key(row)));
}

#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    posts: Table<Post>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts.push(post).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        Ok(self.posts.find(|post| post.id == *id).await)
    }

    async fn list(&self, author: Option<UserId>) -> Result<Vec<Post>, RepositoryError> {
        let mut posts = self
            .posts
            .filter(|post| author.is_none_or(|author| post.author == author))
            .await;
        newest_first(&mut posts, |post| (post.date_created, post.id));
        Ok(posts)
    }

    async fn update(
        &self,
        id: &PostId,
        patch: &PostPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .posts
            .modify(
                |post| post.id == *id,
                |post| {
                    if let Some(content) = &patch.content {
                        post.content.clone_from(content);
                    }
                    if let Some(options) = &patch.options {
                        post.options = Some(options.clone());
                    }
                    post.date_updated = at;
                },
            )
            .await)
    }

    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError> {
        Ok(self.posts.remove(|post| post.id == *id).await)
    }
}

#[derive(Debug, Default)]
pub struct MemoryCommentRepository {
    comments: Table<Comment>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.comments.push(comment).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        Ok(self.comments.find(|comment| comment.id == *id).await)
    }

    async fn list_for_post(&self, post: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        let mut comments = self.comments.filter(|comment| comment.post == *post).await;
        comments.sort_by_key(|comment| (comment.date_created, comment.id));
        Ok(comments)
    }

    async fn update(
        &self,
        id: &CommentId,
        patch: &CommentPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .comments
            .modify(
                |comment| comment.id == *id,
                |comment| {
                    if let Some(content) = &patch.content {
                        comment.content.clone_from(content);
                    }
                    if let Some(options) = &patch.options {
                        comment.options = Some(options.clone());
                    }
                    comment.date_updated = at;
                },
            )
            .await)
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError> {
        Ok(self.comments.remove(|comment| comment.id == *id).await)
    }
}

#[derive(Debug, Default)]
pub struct MemoryGoalRepository {
    goals: Table<Goal>,
}

impl MemoryGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GoalRepository for MemoryGoalRepository {
    async fn insert(&self, goal: &Goal) -> Result<(), RepositoryError> {
        self.goals.push(goal).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &GoalId) -> Result<Option<Goal>, RepositoryError> {
        Ok(self.goals.find(|goal| goal.id == *id).await)
    }

    async fn list(&self, author: Option<UserId>) -> Result<Vec<Goal>, RepositoryError> {
        let mut goals = self
            .goals
            .filter(|goal| author.is_none_or(|author| goal.author == author))
            .await;
        newest_first(&mut goals, |goal| (goal.date_created, goal.id));
        Ok(goals)
    }

    async fn update(
        &self,
        id: &GoalId,
        patch: &GoalPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .goals
            .modify(
                |goal| goal.id == *id,
                |goal| {
                    if let Some(content) = &patch.content {
                        goal.content.clone_from(content);
                    }
                    if let Some(options) = &patch.options {
                        goal.options = Some(options.clone());
                    }
                    goal.date_updated = at;
                },
            )
            .await)
    }

    async fn delete(&self, id: &GoalId) -> Result<bool, RepositoryError> {
        Ok(self.goals.remove(|goal| goal.id == *id).await)
    }
}
