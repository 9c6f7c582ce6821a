use crate::{
    error::{AppError, Result},
    models::{
        thread::{build_threads, orphans},
        Comment, CommentThread, EntityId, Likeable, NewCommentForm,
    },
    services::{
        mutation::{EntityRef, FormKey, MutationQueue, SubmissionGuard},
        query::{Mutation, QueryClient},
    },
    store::ClientStore,
};
use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

#[derive(Clone)]
pub struct CommentService {
    query: QueryClient,
    store: ClientStore,
    queue: MutationQueue,
    submissions: SubmissionGuard,
}

impl CommentService {
    pub fn new(
        query: QueryClient,
        store: ClientStore,
        queue: MutationQueue,
        submissions: SubmissionGuard,
    ) -> Self {
        Self {
            query,
            store,
            queue,
            submissions,
        }
    }

    /// Every comment of the post, in store order.
    pub async fn get_post_comments(&self, post_id: &EntityId) -> Result<Vec<Comment>> {
        self.query.comments(post_id).await
    }

    /// The post's comments shaped into one-level threads.
    pub async fn get_post_threads(&self, post_id: &EntityId) -> Result<(Vec<Comment>, Vec<CommentThread>)> {
        let comments = self.get_post_comments(post_id).await?;

        let hidden = orphans(&comments);
        if !hidden.is_empty() {
            debug!(
                "{} comment(s) on post {} have no visible parent and are not shown",
                hidden.len(),
                post_id
            );
        }

        let threads = build_threads(&comments);
        Ok((comments, threads))
    }

    /// Whether the top-level comment form of the post is waiting on the store.
    pub fn is_submitting(&self, post_id: &EntityId) -> bool {
        self.submissions.is_in_flight(&FormKey::Comment {
            post_id: post_id.clone(),
            parent: None,
        })
    }

    /// Creates a comment, or a reply when the form names a parent.
    pub async fn create_comment(&self, post_id: &EntityId, form: NewCommentForm) -> Result<Comment> {
        form.validate()?;
        let author = self.store.user.require()?;
        let _in_flight = self.submissions.begin(FormKey::Comment {
            post_id: post_id.clone(),
            parent: form.parent(),
        })?;

        let new_comment = form.into_new_comment(post_id.clone(), &author, Utc::now());
        info!(
            "Creating {} on post {} as {}",
            if new_comment.parent_comment_id.is_some() { "reply" } else { "comment" },
            post_id,
            author.username
        );

        let created = self.query.api().create_comment(&new_comment).await?;
        self.query.settle(&Mutation::CreateComment {
            post_id: post_id.clone(),
        });

        Ok(created)
    }

    /// Likes the comment for the current user, or takes the like back.
    pub async fn toggle_like(&self, post_id: &EntityId, comment_id: &EntityId) -> Result<Comment> {
        let user = self.store.user.require()?;
        let _lock = self.queue.lock(EntityRef::Comment(comment_id.clone())).await;

        // The store has no single-comment read, so take it from a fresh listing.
        let current = self
            .query
            .api()
            .list_comments(post_id)
            .await?
            .into_iter()
            .find(|c| &c.id == comment_id)
            .ok_or_else(|| AppError::not_found("Comment"))?;

        let next = current.like_state().toggled(&user.id);
        info!(
            "{} comment {} for user {} ({} -> {} likes)",
            if current.is_liked_by(&user.id) { "Unliking" } else { "Liking" },
            comment_id,
            user.id,
            current.likes,
            next.likes
        );

        let updated = self.query.api().update_comment_likes(comment_id, &next).await?;
        self.query.settle(&Mutation::LikeComment {
            post_id: post_id.clone(),
        });

        Ok(updated)
    }
}
