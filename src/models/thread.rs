use serde::Serialize;

use super::Comment;

/// A top-level comment and its direct replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Groups a post's comments into top-level threads, one level deep.
///
/// Replies are matched to their parent by id equality only. A reply to a
/// reply, or to a comment that is not in `comments`, belongs to no thread.
/// Input order is kept both for threads and for the replies inside them.
pub fn build_threads(comments: &[Comment]) -> Vec<CommentThread> {
    comments
        .iter()
        .filter(|c| c.is_top_level())
        .map(|top| CommentThread {
            comment: top.clone(),
            replies: comments
                .iter()
                .filter(|c| c.parent_comment_id.as_ref() == Some(&top.id))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Comments that [`build_threads`] leaves out.
pub fn orphans(comments: &[Comment]) -> Vec<&Comment> {
    comments
        .iter()
        .filter(|c| match &c.parent_comment_id {
            None => false,
            Some(parent) => !comments
                .iter()
                .any(|p| p.is_top_level() && &p.id == parent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityId;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn comment(id: u64, parent: Option<u64>) -> Comment {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Comment {
            id: EntityId::Number(id),
            post_id: EntityId::Number(1),
            parent_comment_id: parent.map(EntityId::Number),
            author_id: None,
            author: None,
            content: format!("comment {}", id),
            created_at: at,
            updated_at: at,
            likes: 0,
            liked_by: Vec::new(),
            replies: 0,
        }
    }

    fn thread_ids(threads: &[CommentThread]) -> Vec<(String, Vec<String>)> {
        threads
            .iter()
            .map(|t| {
                (
                    t.comment.id.to_string(),
                    t.replies.iter().map(|r| r.id.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(build_threads(&[]).is_empty());
    }

    #[test]
    fn test_groups_replies_in_input_order() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(3)),
            comment(5, Some(1)),
        ];

        let threads = build_threads(&comments);

        assert_eq!(
            thread_ids(&threads),
            vec![
                ("1".to_string(), vec!["2".to_string(), "5".to_string()]),
                ("3".to_string(), vec!["4".to_string()]),
            ]
        );
    }

    #[test]
    fn test_orphans_and_nested_replies_are_hidden() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, Some(99)),
        ];

        let threads = build_threads(&comments);
        assert_eq!(
            thread_ids(&threads),
            vec![("1".to_string(), vec!["2".to_string()])]
        );

        let hidden: Vec<String> = orphans(&comments).iter().map(|c| c.id.to_string()).collect();
        assert_eq!(hidden, vec!["3".to_string(), "4".to_string()]);
    }

    fn arb_comments() -> impl Strategy<Value = Vec<Comment>> {
        proptest::collection::vec(proptest::option::of(0u64..30), 0..25).prop_map(|parents| {
            parents
                .into_iter()
                .enumerate()
                .map(|(i, parent)| comment(i as u64, parent))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_every_comment_lands_once_or_is_orphaned(comments in arb_comments()) {
            let threads = build_threads(&comments);
            let hidden = orphans(&comments);

            for c in &comments {
                let as_top = threads.iter().filter(|t| t.comment.id == c.id).count();
                let as_reply = threads
                    .iter()
                    .flat_map(|t| t.replies.iter())
                    .filter(|r| r.id == c.id)
                    .count();
                let is_hidden = hidden.iter().any(|h| h.id == c.id);

                match &c.parent_comment_id {
                    None => {
                        prop_assert_eq!(as_top, 1);
                        prop_assert_eq!(as_reply, 0);
                    }
                    Some(parent) => {
                        let parent_shown = comments.iter().any(|p| p.is_top_level() && &p.id == parent);
                        prop_assert_eq!(as_top, 0);
                        prop_assert_eq!(as_reply, usize::from(parent_shown));
                        prop_assert_eq!(is_hidden, !parent_shown);
                    }
                }
            }
        }
    }
}
