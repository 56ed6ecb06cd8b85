//! HTTP inbound adapter exposing the `/api` REST surface.

use actix_web::web;

pub mod comments;
pub mod error;
pub mod events;
pub mod friends;
pub mod goals;
pub mod health;
pub mod posts;
pub mod responses;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register extractor error handlers and every `/api` handler.
///
/// Session middleware is applied by the caller so tests can supply their own
/// key.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("/api")
                .service(users::current_session)
                .service(users::list_users)
                .service(users::update_username)
                .service(users::update_password)
                .service(users::get_user)
                .service(users::create_user)
                .service(users::delete_user)
                .service(users::login)
                .service(users::logout)
                .service(posts::get_posts)
                .service(posts::create_post)
                .service(posts::update_post)
                .service(posts::delete_post)
                .service(comments::get_comments)
                .service(comments::create_comment)
                .service(comments::update_comment)
                .service(comments::delete_comment)
                .service(friends::get_friends)
                .service(friends::remove_friend)
                .service(friends::get_requests)
                .service(friends::send_request)
                .service(friends::remove_request)
                .service(friends::accept_request)
                .service(friends::reject_request)
                .service(events::get_events)
                .service(events::create_event)
                .service(events::update_event)
                .service(events::delete_event)
                .service(goals::get_goals)
                .service(goals::create_goal)
                .service(goals::update_goal)
                .service(goals::delete_goal),
        );
}
