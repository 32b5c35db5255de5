use std::fmt;

use tracing::debug;

use crate::session::CalendarSession;

/// The single open picker on a page.
///
/// Hosts keep one of these and route every activation through it, so that
/// opening the picker on one field tears down the dialog open on another.
/// `K` identifies a host field.
pub struct ActiveSession<K> {
    open: Option<(K, CalendarSession)>,
}

impl<K> Default for ActiveSession<K> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<K: PartialEq + fmt::Debug> ActiveSession<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `key`, starting it with `start` if needed.
    ///
    /// Re-activating the field that is already open keeps its session.
    pub fn activate(
        &mut self,
        key: K,
        start: impl FnOnce() -> CalendarSession,
    ) -> &mut CalendarSession {
        let other_open = matches!(&self.open, Some((open_key, _)) if *open_key != key);
        if other_open {
            if let Some((old_key, old)) = self.open.take() {
                debug!("closing date picker for {old_key:?}, opening {key:?}");
                old.cancel();
            }
        }

        &mut self.open.get_or_insert_with(|| (key, start())).1
    }

    pub fn active_key(&self) -> Option<&K> {
        self.open.as_ref().map(|(key, _)| key)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The open session, if it belongs to `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut CalendarSession> {
        match &mut self.open {
            Some((open_key, session)) if open_key == key => Some(session),
            _ => None,
        }
    }

    /// Commits the open session, returning the field and its new text.
    pub fn commit(&mut self) -> Option<(K, String)> {
        let (key, session) = self.open.take()?;
        Some((key, session.commit()))
    }

    /// Cancels the open session, returning the field it belonged to.
    pub fn cancel(&mut self) -> Option<K> {
        let (key, session) = self.open.take()?;
        session.cancel();
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crate::value::CalendarValue;
    use pretty_assertions::assert_eq;

    fn start(text: &'static str) -> impl FnOnce() -> CalendarSession {
        move || {
            CalendarSession::with_today(
                text,
                PickerConfig::default(),
                CalendarValue::new(2024, 0, 1).unwrap(),
            )
        }
    }

    #[test]
    fn same_field_reuses_session() {
        let mut slot = ActiveSession::new();
        slot.activate("start", start("15-03-2024")).navigate_next();

        let session = slot.activate("start", start("01-01-2000"));
        assert_eq!(session.reference().month(), 3);
    }

    #[test]
    fn other_field_replaces_session() {
        let mut slot = ActiveSession::new();
        slot.activate("start", start("15-03-2024"));
        let session = slot.activate("end", start("20-05-2024"));

        assert_eq!(session.reference().month(), 4);
        assert_eq!(slot.active_key(), Some(&"end"));
        assert!(slot.get_mut(&"start").is_none());
    }

    #[test]
    fn commit_and_cancel_empty_the_slot() {
        let mut slot = ActiveSession::new();
        slot.activate("start", start("15-03-2024"));
        assert_eq!(
            slot.commit(),
            Some(("start", "15-03-2024".to_string()))
        );
        assert!(!slot.is_open());

        slot.activate("end", start("15-03-2024"));
        assert_eq!(slot.cancel(), Some("end"));
        assert!(!slot.is_open());
        assert_eq!(slot.cancel(), None);
    }
}
