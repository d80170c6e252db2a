use async_trait::async_trait;
use common::api::{self, Rpc};
use tracing::{Instrument, info_span, warn};

use crate::form::{CheckOutcome, Event, RemoteCall, SubmitOutcome};

/// The two server endpoints the modal talks to.
#[async_trait(?Send)] // reqwest futures aren't Send on wasm
pub trait PasswordService {
    /// `Ok(true)` iff the server recognizes `req.current_password`.
    async fn validate_password(&self, req: &api::ValidatePassword) -> api::Result<bool>;
    async fn change_password(&self, req: &api::ChangePassword) -> api::Result<()>;
}

/// Runs a remote effect to completion. Never fails: errors become the matching outcome event.
pub async fn perform<S: PasswordService + ?Sized>(service: &S, call: RemoteCall) -> Event {
    match call {
        RemoteCall::CheckCurrent { generation, req } => {
            let outcome = match service.validate_password(&req)
                .instrument(info_span!(api::ValidatePassword::DISPLAY_NAME, generation))
                .await {
                    Ok(true) => CheckOutcome::Valid,
                    Ok(false) => CheckOutcome::Incorrect,
                    Err(e) => {
                        warn!("password check failed: {:#}", e);
                        CheckOutcome::Failed
                    }
                };
            Event::CheckDone { generation, outcome }
        }
        RemoteCall::ChangePassword { submission, req } => {
            let res = service.change_password(&req)
                .instrument(info_span!(api::ChangePassword::DISPLAY_NAME, submission))
                .await;
            if let Err(e) = &res {
                warn!("password change failed: {:#}", e);
            }
            Event::SubmitDone { submission, outcome: SubmitOutcome::from(res) }
        }
    }
}
