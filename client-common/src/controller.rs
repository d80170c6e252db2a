use std::{collections::VecDeque, time::Duration};

use tracing::trace;

use crate::{form::{Effect, Event, FormState}, service::{self, PasswordService}};

/// Drives a `FormState` by awaiting remote effects inline. Used where there is no ui event loop
/// to hand the futures to (the cli, tests).
pub struct Controller<S> {
    state: FormState,
    service: S,
}

impl<S: PasswordService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self {
            state: FormState::default(),
            service,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Applies one event and hands back the effects without running them.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        trace!(?event, "handling");
        let state = std::mem::take(&mut self.state);
        let (state, effects) = state.update(event);
        self.state = state;
        effects
    }

    /// Applies `event` and every remote call it leads to. Returns the close animation delay if
    /// the modal started closing: the caller waits it out and sends `Event::CloseAnimationDone`.
    pub async fn dispatch(&mut self, event: Event) -> Option<Duration> {
        let mut queue = VecDeque::new();
        queue.push_back(event);

        let mut close_after = None;
        while let Some(event) = queue.pop_front() {
            for effect in self.handle(event) {
                match effect {
                    Effect::Remote(call) => queue.push_back(service::perform(&self.service, call).await),
                    Effect::CloseAfter(delay) => close_after = Some(delay),
                }
            }
        }
        close_after
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use common::{api, consts::CLOSE_ANIMATION};

    use super::*;
    use crate::form::{CheckOutcome, CloseReason, FieldId, FieldState, Flash, Modal, Notice, RemoteCall, SubmitOutcome};

    /// accepts a single current password, records what it was sent
    struct FakeService {
        password: &'static str,
        reachable: bool,
        validated: RefCell<Vec<String>>,
        changed: RefCell<Vec<api::ChangePassword>>,
    }

    impl FakeService {
        fn new(password: &'static str) -> Self {
            Self { password, reachable: true, validated: RefCell::default(), changed: RefCell::default() }
        }

        fn unreachable() -> Self {
            Self { reachable: false, ..Self::new("") }
        }
    }

    #[async_trait(?Send)]
    impl PasswordService for FakeService {
        async fn validate_password(&self, req: &api::ValidatePassword) -> api::Result<bool> {
            self.validated.borrow_mut().push(req.current_password.clone());
            if !self.reachable {
                return Err(eyre::eyre!("connection refused").into());
            }
            Ok(req.current_password == self.password)
        }

        async fn change_password(&self, req: &api::ChangePassword) -> api::Result<()> {
            self.changed.borrow_mut().push(req.clone());
            if req.current_password != self.password {
                return Err(api::Error::IncorrectPassword);
            }
            Ok(())
        }
    }

    fn input(field: FieldId, v: &str) -> Event {
        Event::Input(field, v.to_owned())
    }

    #[tokio::test]
    async fn full_password_change() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.dispatch(Event::Open).await;
        c.dispatch(input(FieldId::Current, "old123")).await;
        c.dispatch(Event::CurrentBlur).await;
        assert_eq!(c.state().field(FieldId::Current), &FieldState::success());

        c.dispatch(input(FieldId::New, "Abcdef1")).await;
        c.dispatch(input(FieldId::Confirm, "Abcdef1")).await;
        assert!(c.state().submit_enabled());

        let close = c.dispatch(Event::Submit).await;
        assert_eq!(close, Some(CLOSE_ANIMATION));
        assert_eq!(c.state().modal(), Modal::Closing);
        assert_eq!(c.state().flash(), Some(&Flash::Changed));
        assert_eq!(c.service.changed.borrow().len(), 1);

        c.dispatch(Event::CloseAnimationDone).await;
        assert_eq!(c.state().modal(), Modal::Closed);
        assert!(!c.state().submit_enabled());
    }

    #[tokio::test]
    async fn wrong_current_password() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.dispatch(Event::Open).await;
        c.dispatch(input(FieldId::Current, " old12 ")).await;
        c.dispatch(Event::CurrentBlur).await;

        assert_eq!(c.state().field(FieldId::Current), &FieldState::error(Notice::CurrentPasswordIncorrect));
        assert_eq!(c.service.validated.borrow().as_slice(), ["old12".to_owned()]);
    }

    #[tokio::test]
    async fn unreachable_server_is_reported_inline() {
        let mut c = Controller::new(FakeService::unreachable());
        c.dispatch(Event::Open).await;
        c.dispatch(input(FieldId::Current, "old123")).await;
        assert_eq!(c.dispatch(Event::CurrentBlur).await, None);

        assert_eq!(c.state().field(FieldId::Current), &FieldState::error(Notice::ValidationFailed));

        // other fields keep working
        c.dispatch(input(FieldId::New, "Abcdef1")).await;
        assert!(c.state().field(FieldId::New).valid);
    }

    #[tokio::test]
    async fn empty_blur_does_not_call_the_server() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.dispatch(Event::Open).await;
        c.dispatch(Event::CurrentBlur).await;
        assert!(c.service.validated.borrow().is_empty());
        assert_eq!(c.state().field(FieldId::Current), &FieldState::error(Notice::CurrentPasswordMissing));
    }

    #[tokio::test]
    async fn rejected_submission_keeps_the_modal_open() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.dispatch(Event::Open).await;
        c.dispatch(input(FieldId::Current, "old123")).await;
        c.dispatch(Event::CurrentBlur).await;
        c.dispatch(input(FieldId::New, "Abcdef1")).await;
        c.dispatch(input(FieldId::Confirm, "Abcdef1")).await;

        // the password changed server side between the check and the submission
        c.service.password = "other1";
        assert_eq!(c.dispatch(Event::Submit).await, None);
        assert_eq!(c.state().modal(), Modal::Open);
        assert_eq!(c.state().flash(), Some(&Flash::IncorrectPassword));
    }

    #[tokio::test]
    async fn stale_check_from_handle() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.handle(Event::Open);
        c.handle(input(FieldId::Current, "old123"));
        let effects = c.handle(Event::CurrentBlur);
        let call = match effects.into_iter().next() {
            Some(Effect::Remote(call @ RemoteCall::CheckCurrent { .. })) => call,
            e => panic!("unexpected effect {:?}", e),
        };

        // the user edits the field while the request is in flight
        c.handle(input(FieldId::Current, "old1234"));
        let late = service::perform(&c.service, call).await;
        assert!(matches!(late, Event::CheckDone { outcome: CheckOutcome::Valid, .. }));
        c.handle(late);

        assert!(!c.state().field(FieldId::Current).valid);
    }

    #[tokio::test]
    async fn submission_answered_after_cancel_is_ignored() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.dispatch(Event::Open).await;
        c.dispatch(input(FieldId::Current, "old123")).await;
        c.dispatch(Event::CurrentBlur).await;
        c.dispatch(input(FieldId::New, "Abcdef1")).await;
        c.dispatch(input(FieldId::Confirm, "Abcdef1")).await;

        let call = match c.handle(Event::Submit).into_iter().next() {
            Some(Effect::Remote(call @ RemoteCall::ChangePassword { .. })) => call,
            e => panic!("unexpected effect {:?}", e),
        };
        c.handle(Event::Close(CloseReason::Cancel));
        c.handle(Event::CloseAnimationDone);

        let late = service::perform(&c.service, call).await;
        assert!(matches!(late, Event::SubmitDone { outcome: SubmitOutcome::Changed, .. }));
        assert!(c.handle(late).is_empty());
        assert_eq!(c.state().modal(), Modal::Closed);
        assert_eq!(c.state().flash(), None);
    }

    #[tokio::test]
    async fn close_returns_the_animation_delay() {
        let mut c = Controller::new(FakeService::new("old123"));
        c.dispatch(Event::Open).await;
        assert_eq!(c.dispatch(Event::Close(CloseReason::Cancel)).await, Some(CLOSE_ANIMATION));
        assert_eq!(c.dispatch(Event::Close(CloseReason::Cancel)).await, None);
    }
}
