//! Behaviour tests for the shared feed, comments and friendships.
//!
//! Each scenario drives the full `/api` surface in process over in-memory
//! storage, signing users in through real session cookies.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared harness has helpers used by other integration suites.
#[allow(dead_code)]
#[path = "support/app.rs"]
mod app;

use std::cell::RefCell;
use std::collections::HashMap;

use actix_web::cookie::Cookie;
use actix_web::test::TestRequest;
use app::{Reply, TestApp};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

struct FeedWorld {
    app: TestApp,
    cookies: RefCell<HashMap<String, Cookie<'static>>>,
    latest_post: RefCell<Option<String>>,
}

impl FeedWorld {
    fn new() -> Self {
        Self {
            app: TestApp::new(),
            cookies: RefCell::new(HashMap::new()),
            latest_post: RefCell::new(None),
        }
    }

    fn cookie(&self, user: &str) -> Cookie<'static> {
        self.cookies
            .borrow()
            .get(user)
            .cloned()
            .unwrap_or_else(|| panic!("{user} is not signed in"))
    }

    fn send_as(&self, user: &str, req: TestRequest) -> Reply {
        let (reply, _) = self.app.send(req.cookie(self.cookie(user)));
        assert!(
            (200..300).contains(&reply.status),
            "{user}: unexpected {} {}",
            reply.status,
            reply.body
        );
        reply
    }

    fn get(&self, uri: &str) -> Value {
        let (reply, _) = self.app.send(TestRequest::get().uri(uri));
        assert_eq!(reply.status, 200, "GET {uri}: {}", reply.body);
        reply.body
    }

    fn latest_post(&self) -> String {
        self.latest_post.borrow().clone().expect("a post was published")
    }
}

#[fixture]
fn world() -> FeedWorld {
    FeedWorld::new()
}

#[given("a signed-in user {name}")]
fn a_signed_in_user(world: &FeedWorld, name: String) {
    let cookie = world.app.sign_up_and_login(&name);
    world.cookies.borrow_mut().insert(name, cookie);
}

#[when("{from} sends a friend request to {to}")]
fn sends_a_friend_request(world: &FeedWorld, from: String, to: String) {
    let reply = world.send_as(
        &from,
        TestRequest::post().uri(&format!("/api/friend/requests/{to}")),
    );
    assert_eq!(reply.body["msg"], "Sent request!");
}

#[when("{to} accepts the friend request from {from}")]
fn accepts_the_friend_request(world: &FeedWorld, to: String, from: String) {
    let reply = world.send_as(
        &to,
        TestRequest::put().uri(&format!("/api/friend/accept/{from}")),
    );
    assert_eq!(reply.body["msg"], "Accepted request!");
}

#[then("{user} lists {friend} as a friend")]
fn lists_as_a_friend(world: &FeedWorld, user: String, friend: String) {
    let reply = world.send_as(&user, TestRequest::get().uri("/api/friends"));
    assert_eq!(reply.body, json!([friend]));
}

#[then("{user} has no pending friend requests")]
fn has_no_pending_requests(world: &FeedWorld, user: String) {
    let reply = world.send_as(&user, TestRequest::get().uri("/api/friend/requests"));
    let pending = reply
        .body
        .as_array()
        .expect("request list")
        .iter()
        .filter(|request| request["status"] == "pending")
        .count();
    assert_eq!(pending, 0);
}

#[when("{author} publishes the post {content}")]
fn publishes_the_post(world: &FeedWorld, author: String, content: String) {
    let reply = world.send_as(
        &author,
        TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "content": content })),
    );
    let id = reply.body["post"]["id"]
        .as_str()
        .expect("post id")
        .to_owned();
    *world.latest_post.borrow_mut() = Some(id);
}

#[when("{author} comments {content} on the latest post")]
fn comments_on_the_latest_post(world: &FeedWorld, author: String, content: String) {
    let post = world.latest_post();
    let reply = world.send_as(
        &author,
        TestRequest::post()
            .uri("/api/comments")
            .set_json(json!({ "postId": post, "content": content })),
    );
    assert_eq!(reply.body["msg"], "Comment successfully created!");
}

#[when("{user} deletes their account")]
fn deletes_their_account(world: &FeedWorld, user: String) {
    let reply = world.send_as(&user, TestRequest::delete().uri("/api/users"));
    assert_eq!(reply.body["msg"], "User deleted!");
    world.cookies.borrow_mut().remove(&user);
}

#[then("the latest post has the comment {content} by {author}")]
fn the_latest_post_has_the_comment(world: &FeedWorld, content: String, author: String) {
    let post = world.latest_post();
    let comments = world.get(&format!("/api/comments?postId={post}"));
    assert_eq!(comments[0]["content"], content.as_str());
    assert_eq!(comments[0]["author"], author.as_str());
}

#[then("the feed shows the post {content} by {author}")]
fn the_feed_shows_the_post(world: &FeedWorld, content: String, author: String) {
    let posts = world.get("/api/posts");
    let found = posts
        .as_array()
        .expect("post list")
        .iter()
        .any(|post| post["content"] == content.as_str() && post["author"] == author.as_str());
    assert!(found, "no post {content} by {author} in {posts}");
}

#[scenario(path = "tests/features/social_feed.feature", index = 0)]
fn friend_request_becomes_friendship(world: FeedWorld) {
    drop(world);
}

#[scenario(path = "tests/features/social_feed.feature", index = 1)]
fn comments_show_commenter(world: FeedWorld) {
    drop(world);
}

#[scenario(path = "tests/features/social_feed.feature", index = 2)]
fn deleted_authors_are_anonymised(world: FeedWorld) {
    drop(world);
}
