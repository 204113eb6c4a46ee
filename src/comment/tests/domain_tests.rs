//! Tests for comment bodies, visibility and edits.

use crate::comment::domain::{Comment, CommentBody, CommentDomainError, CommentPatch, NewComment};
use crate::task::domain::TaskId;
use crate::user::domain::{Actor, Role, UserId};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("Looks good".to_owned(), true)]
#[case("x".repeat(2000), true)]
#[case("x".repeat(2001), false)]
#[case(String::new(), false)]
#[case("   ".to_owned(), false)]
fn bodies_are_bounded(#[case] raw: String, #[case] valid: bool) {
    let result = CommentBody::new(raw);
    assert_eq!(result.is_ok(), valid);
    if !valid {
        assert_eq!(result, Err(CommentDomainError::InvalidBody));
    }
}

struct Cast {
    author: UserId,
    recipient: UserId,
    question: Comment,
}

fn private_question() -> Cast {
    let author = UserId::new();
    let recipient = UserId::new();
    let question = Comment::new(
        TaskId::new(),
        author,
        NewComment {
            body: CommentBody::new("Can we meet?").expect("valid body"),
            is_private: true,
            recipient_id: Some(recipient),
            meeting_info: Some("Tuesday 10:00".to_owned()),
        },
        &DefaultClock,
    );
    Cast {
        author,
        recipient,
        question,
    }
}

#[test]
fn private_questions_are_limited_to_participants_and_staff() {
    let cast = private_question();
    assert!(cast.question.is_visible_to(Actor::new(cast.author, Role::Student)));
    assert!(cast.question.is_visible_to(Actor::new(cast.recipient, Role::Student)));
    assert!(cast.question.is_visible_to(Actor::new(UserId::new(), Role::Mentor)));
    assert!(cast.question.is_visible_to(Actor::new(UserId::new(), Role::Hr)));
    assert!(!cast.question.is_visible_to(Actor::new(UserId::new(), Role::Student)));
}

#[test]
fn edits_replace_body_and_keep_unset_fields() {
    let mut cast = private_question();
    cast.question.edit(CommentPatch {
        body: CommentBody::new("Can we meet on Wednesday?").expect("valid body"),
        is_private: Some(false),
        recipient_id: None,
        meeting_info: None,
    });

    assert_eq!(cast.question.body().as_str(), "Can we meet on Wednesday?");
    assert!(!cast.question.is_private());
    assert_eq!(cast.question.recipient_id(), Some(cast.recipient));
    assert_eq!(cast.question.meeting_info(), Some("Tuesday 10:00"));
}
