//! Shared fixtures for concept service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{PasswordDigest, User, UserAccount, UserId, Username};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 18, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn account(username: &str) -> UserAccount {
    let at = fixture_timestamp();
    UserAccount {
        user: User {
            id: UserId::generate(),
            username: Username::new(username).expect("fixture username"),
        },
        password: PasswordDigest::from_phc(format!("$fixture${username}")),
        date_created: at,
        date_updated: at,
    }
}
