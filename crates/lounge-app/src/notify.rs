//! Desktop notification port
//!
//! Announcements are best-effort: nothing is shown unless permission was
//! granted, and a failing surface is logged and forgotten.

use lounge_core::prelude::*;
use lounge_core::TimerMode;

use crate::pomodoro::IntervalCompletion;

/// Permission state of the notification surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// Never asked
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Copy for the end of a Pomodoro interval
    pub fn interval_completed(completion: &IntervalCompletion) -> Self {
        match completion.to {
            TimerMode::Break => Self::new(
                "Great work!",
                format!(
                    "Session {} complete. Take a {}break!",
                    completion.completed_sessions,
                    if completion.is_long_break { "long " } else { "" }
                ),
            ),
            TimerMode::Work => Self::new("Break over!", "Time to focus again!"),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;

    fn show(&self, notification: &Notification) -> Result<()>;
}

/// Show `notification` if allowed; never fails
pub fn announce(notifier: &dyn Notifier, notification: &Notification) {
    match notifier.permission() {
        NotificationPermission::Granted => {
            if let Err(e) = notifier.show(notification) {
                warn!("Notification failed: {}", e);
            }
        }
        permission => {
            debug!(
                "Skipping notification {:?} (permission {:?})",
                notification.title, permission
            );
        }
    }
}

/// Writes announcements to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    fn show(&self, notification: &Notification) -> Result<()> {
        info!("{}: {}", notification.title, notification.body);
        Ok(())
    }
}

/// Surface with permission denied; nothing is ever shown
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Denied
    }

    fn show(&self, _notification: &Notification) -> Result<()> {
        Err(Error::notification("notifications are disabled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(to: TimerMode, sessions: u32, long: bool) -> IntervalCompletion {
        IntervalCompletion {
            from: to.flipped(),
            to,
            completed_sessions: sessions,
            is_long_break: long,
        }
    }

    #[test]
    fn test_copy_after_work() {
        let n = Notification::interval_completed(&completion(TimerMode::Break, 2, false));
        assert_eq!(n.title, "Great work!");
        assert_eq!(n.body, "Session 2 complete. Take a break!");

        let n = Notification::interval_completed(&completion(TimerMode::Break, 4, true));
        assert_eq!(n.body, "Session 4 complete. Take a long break!");
    }

    #[test]
    fn test_copy_after_break() {
        let n = Notification::interval_completed(&completion(TimerMode::Work, 4, true));
        assert_eq!(n.title, "Break over!");
        assert_eq!(n.body, "Time to focus again!");
    }

    #[test]
    fn test_announce_skips_without_permission() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(NotificationPermission::Default);
        notifier.expect_show().times(0);

        announce(&notifier, &Notification::new("t", "b"));
    }

    #[test]
    fn test_announce_swallows_show_failure() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(NotificationPermission::Granted);
        notifier
            .expect_show()
            .times(1)
            .returning(|_| Err(Error::notification("surface gone")));

        announce(&notifier, &Notification::new("t", "b"));
    }

    #[test]
    fn test_disabled_notifier_is_denied() {
        announce(&DisabledNotifier, &Notification::new("t", "b"));
        assert_eq!(DisabledNotifier.permission(), NotificationPermission::Denied);
    }
}
