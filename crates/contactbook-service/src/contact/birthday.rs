//! Upcoming-birthday window.

use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use contactbook_core::config::ContactsConfig;
use contactbook_core::error::AppError;
use contactbook_core::traits::Clock;
use contactbook_core::types::PageRequest;
use contactbook_database::ContactStore;
use contactbook_entity::contact::Contact;

use crate::context::RequestContext;

/// The next occurrence of the birthday `date_of_birth` on or after `today`.
///
/// Feb 29 falls on Feb 28 in non-leap years.
pub fn next_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = anchor(date_of_birth, today.year());
    if this_year < today {
        anchor(date_of_birth, today.year() + 1)
    } else {
        this_year
    }
}

fn anchor(date_of_birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date_of_birth.month(), date_of_birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date_of_birth)
}

/// Whether the next birthday lies in `[today, today + days]`.
pub fn in_window(date_of_birth: NaiveDate, today: NaiveDate, days: u32) -> bool {
    let end = today
        .checked_add_days(Days::new(days.into()))
        .unwrap_or(NaiveDate::MAX);
    next_birthday(date_of_birth, today) <= end
}

/// Lists contacts whose birthday comes up within the configured window.
#[derive(Debug, Clone)]
pub struct BirthdayService {
    contacts: Arc<dyn ContactStore>,
    clock: Arc<dyn Clock>,
    window_days: u32,
}

impl BirthdayService {
    pub fn new(contacts: Arc<dyn ContactStore>, clock: Arc<dyn Clock>, config: &ContactsConfig) -> Self {
        Self {
            contacts,
            clock,
            window_days: config.birthday_window_days,
        }
    }

    /// Contacts with a birthday in the window, soonest first, paginated.
    pub async fn upcoming(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<Vec<Contact>, AppError> {
        let today = self.clock.today();

        // rows arrive in creation order; the stable sort keeps it for ties
        let mut matches: Vec<(NaiveDate, Contact)> = self
            .contacts
            .find_by_user(ctx.user_id)
            .await?
            .into_iter()
            .filter(|c| in_window(c.date_of_birth, today, self.window_days))
            .map(|c| (next_birthday(c.date_of_birth, today), c))
            .collect();
        matches.sort_by_key(|(next, _)| *next);

        debug!(user_id = %ctx.user_id, %today, matched = matches.len(), "Birthday window");
        Ok(page.slice(matches.into_iter().map(|(_, c)| c)))
    }
}
