//! Pure pieces of the weekly release newsletter: the release window, message
//! fan-out, run reports and trigger arithmetic. The run itself lives in the
//! server crate.

mod mailer;
mod report;
mod schedule;
mod window;

pub use mailer::{weekly_digest, EmailMessage, MailError, Mailer, WEEKLY_SUBJECT};
pub use report::{FailedDelivery, NotificationReport, NotifyError};
pub use schedule::{ScheduleError, Trigger};
pub use window::{upcoming_window, RELEASE_WINDOW_DAYS};
